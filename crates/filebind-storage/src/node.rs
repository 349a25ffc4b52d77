//! Backing nodes: typed read/write access to one virtual file.

use crate::{ContentCodec, Result, StorageBackend};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// A readable and writable resource behind a key.
///
/// # Examples
///
/// ```rust,no_run
/// use filebind_storage::{BackingNode, Result};
///
/// async fn touch(node: &dyn BackingNode<String>) -> Result<()> {
///     let content = node.read().await?;
///     node.write(&format!("{content}\n")).await
/// }
/// ```
#[async_trait]
pub trait BackingNode<V>: Send + Sync {
	/// Load the node's current value.
	async fn read(&self) -> Result<V>;

	/// Persist `value`, replacing the node's content.
	async fn write(&self, value: &V) -> Result<()>;
}

/// A file inside a [`StorageBackend`], decoded with a [`ContentCodec`].
pub struct VirtualFile<C> {
	storage: Arc<dyn StorageBackend>,
	name: String,
	codec: Arc<C>,
}

impl<C> VirtualFile<C> {
	/// Create a virtual file named `name` inside `storage`.
	pub fn new(storage: Arc<dyn StorageBackend>, name: impl Into<String>, codec: Arc<C>) -> Self {
		Self {
			storage,
			name: name.into(),
			codec,
		}
	}

	/// Path of the file inside its storage.
	pub fn name(&self) -> &str {
		&self.name
	}
}

impl<C> fmt::Debug for VirtualFile<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("VirtualFile")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

#[async_trait]
impl<C: ContentCodec> BackingNode<C::Value> for VirtualFile<C> {
	async fn read(&self) -> Result<C::Value> {
		let bytes = self.storage.open(&self.name).await?;
		self.codec.decode(&bytes)
	}

	async fn write(&self, value: &C::Value) -> Result<()> {
		let bytes = self.codec.encode(value)?;
		self.storage.save(&self.name, &bytes).await
	}
}
