//! Content codecs translating bound values to and from file bytes.

use crate::{Result, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

/// Converts between a bound value and the bytes stored in a virtual file.
pub trait ContentCodec: Send + Sync + 'static {
	/// Value type produced by [`decode`](Self::decode).
	type Value: Send + Sync + 'static;

	/// Serialize `value` into file content.
	fn encode(&self, value: &Self::Value) -> Result<Vec<u8>>;

	/// Parse file content into a value.
	fn decode(&self, bytes: &[u8]) -> Result<Self::Value>;
}

/// UTF-8 text content.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl ContentCodec for TextCodec {
	type Value = String;

	fn encode(&self, value: &String) -> Result<Vec<u8>> {
		Ok(value.as_bytes().to_vec())
	}

	fn decode(&self, bytes: &[u8]) -> Result<String> {
		String::from_utf8(bytes.to_vec()).map_err(|e| StorageError::Codec(e.to_string()))
	}
}

/// JSON content, pretty-printed on write.
///
/// # Examples
///
/// ```
/// use filebind_storage::{ContentCodec, JsonCodec};
/// use serde_json::json;
///
/// let codec = JsonCodec::<serde_json::Value>::new();
/// let bytes = codec.encode(&json!({"title": "draft"})).unwrap();
/// assert_eq!(codec.decode(&bytes).unwrap()["title"], "draft");
/// ```
pub struct JsonCodec<T> {
	_marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
	/// Create a JSON codec for `T`.
	pub fn new() -> Self {
		Self {
			_marker: PhantomData,
		}
	}
}

impl<T> Default for JsonCodec<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Clone for JsonCodec<T> {
	fn clone(&self) -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for JsonCodec<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("JsonCodec")
			.field("type", &std::any::type_name::<T>())
			.finish()
	}
}

impl<T> ContentCodec for JsonCodec<T>
where
	T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
	type Value = T;

	fn encode(&self, value: &T) -> Result<Vec<u8>> {
		Ok(serde_json::to_vec_pretty(value)?)
	}

	fn decode(&self, bytes: &[u8]) -> Result<T> {
		Ok(serde_json::from_slice(bytes)?)
	}
}
