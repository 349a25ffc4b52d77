//! Storage backend trait definition.

use crate::Result;
use async_trait::async_trait;

/// Byte-level storage backend behind virtual files.
///
/// Backends know nothing about the values bound to a file; they move raw
/// bytes. Typed access goes through [`crate::VirtualFile`].
///
/// All methods are asynchronous and return `` `Result<T, StorageError>` ``.
///
/// # Examples
///
/// ```rust,no_run
/// use filebind_storage::{StorageBackend, Result};
///
/// async fn example(storage: &dyn StorageBackend) -> Result<()> {
///     storage.save("example.txt", b"Hello, world!").await?;
///
///     let content = storage.open("example.txt").await?;
///     println!("{} bytes", content.len());
///
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait StorageBackend: Send + Sync {
	/// Save a file, replacing any previous content.
	///
	/// # Arguments
	///
	/// * `name` - The file path/name
	/// * `content` - The file content as bytes
	///
	/// # Errors
	///
	/// Returns `` `StorageError::InvalidName` `` if the name escapes the storage root.
	/// Returns `` `StorageError::Io` `` if the write fails.
	async fn save(&self, name: &str, content: &[u8]) -> Result<()>;

	/// Open (read) a file.
	///
	/// # Errors
	///
	/// Returns `` `StorageError::NotFound` `` if the file doesn't exist.
	/// Returns `` `StorageError::Io` `` if the read fails.
	async fn open(&self, name: &str) -> Result<Vec<u8>>;
}
