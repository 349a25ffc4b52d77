//! Key to node resolution.

use crate::{BackingNode, ContentCodec, StorageBackend, VirtualFile};
use std::sync::Arc;

/// Maps a logical key to the node backing it.
///
/// Returning `None` means the key has no content behind it (a directory, or a
/// key outside any store). Callers treat that as an empty state, not an error.
pub trait NodeResolver<V>: Send + Sync {
	fn resolve(&self, key: &str) -> Option<Arc<dyn BackingNode<V>>>;
}

/// Resolves keys to [`VirtualFile`]s of one storage backend.
///
/// Empty keys and keys ending in `/` name directories and do not resolve.
///
/// # Examples
///
/// ```
/// use filebind_storage::{MemoryStorage, NodeResolver, StorageResolver, TextCodec};
/// use std::sync::Arc;
///
/// let resolver = StorageResolver::new(Arc::new(MemoryStorage::new()), TextCodec);
/// assert!(resolver.resolve("notes/a.md").is_some());
/// assert!(resolver.resolve("notes/").is_none());
/// ```
pub struct StorageResolver<C> {
	storage: Arc<dyn StorageBackend>,
	codec: Arc<C>,
}

impl<C> StorageResolver<C> {
	pub fn new(storage: Arc<dyn StorageBackend>, codec: C) -> Self {
		Self {
			storage,
			codec: Arc::new(codec),
		}
	}

	/// The backend files are resolved in.
	pub fn storage(&self) -> Arc<dyn StorageBackend> {
		Arc::clone(&self.storage)
	}
}

impl<C: ContentCodec> NodeResolver<C::Value> for StorageResolver<C> {
	fn resolve(&self, key: &str) -> Option<Arc<dyn BackingNode<C::Value>>> {
		if key.is_empty() || key.ends_with('/') {
			return None;
		}
		Some(Arc::new(VirtualFile::new(
			Arc::clone(&self.storage),
			key,
			Arc::clone(&self.codec),
		)))
	}
}
