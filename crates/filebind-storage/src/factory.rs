//! Factory function for creating storage backends.

use crate::{MemoryStorage, Result, StorageBackend, StorageConfig};
use std::sync::Arc;

/// Create a storage backend from configuration.
///
/// # Examples
///
/// ```rust
/// use filebind_storage::{create_storage, StorageConfig};
///
/// let storage = create_storage(StorageConfig::Memory).unwrap();
/// ```
pub fn create_storage(config: StorageConfig) -> Result<Arc<dyn StorageBackend>> {
	match config {
		#[cfg(feature = "local")]
		StorageConfig::Local(local_config) => {
			let storage = crate::backends::local::LocalStorage::new(local_config)?;
			Ok(Arc::new(storage))
		}
		StorageConfig::Memory => Ok(Arc::new(MemoryStorage::new())),
	}
}
