//! In-memory storage backend.
//!
//! Useful for tests and for sessions that never touch the disk.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{Result, StorageBackend, StorageError};

/// Storage backend keeping every file in a shared map.
///
/// Clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
	files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
	/// Create an empty in-memory store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a store pre-populated with `files`.
	///
	/// # Examples
	///
	/// ```
	/// use filebind_storage::MemoryStorage;
	///
	/// let storage = MemoryStorage::with_files([("a.txt", "hello")]);
	/// assert_eq!(storage.len(), 1);
	/// ```
	pub fn with_files<I, K, C>(files: I) -> Self
	where
		I: IntoIterator<Item = (K, C)>,
		K: Into<String>,
		C: Into<Vec<u8>>,
	{
		let files = files
			.into_iter()
			.map(|(name, content)| (name.into(), content.into()))
			.collect();
		Self {
			files: Arc::new(RwLock::new(files)),
		}
	}

	/// Number of stored files.
	pub fn len(&self) -> usize {
		self.files.read().len()
	}

	/// Whether no file is stored.
	pub fn is_empty(&self) -> bool {
		self.files.read().is_empty()
	}

	/// Raw content of `name`, if stored.
	pub fn get(&self, name: &str) -> Option<Vec<u8>> {
		self.files.read().get(name).cloned()
	}
}

#[async_trait]
impl StorageBackend for MemoryStorage {
	async fn save(&self, name: &str, content: &[u8]) -> Result<()> {
		if name.is_empty() {
			return Err(StorageError::InvalidName(name.to_string()));
		}
		self.files.write().insert(name.to_string(), content.to_vec());
		Ok(())
	}

	async fn open(&self, name: &str) -> Result<Vec<u8>> {
		self.get(name)
			.ok_or_else(|| StorageError::NotFound(name.to_string()))
	}
}
