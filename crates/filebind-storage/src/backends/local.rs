//! Local file system storage backend implementation.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::config::LocalConfig;
use crate::{Result, StorageBackend, StorageError};

/// Local file system storage backend.
///
/// File names are interpreted relative to the base directory. Names that are
/// absolute or contain `..` are rejected with `` `StorageError::InvalidName` ``.
#[derive(Debug, Clone)]
pub struct LocalStorage {
	base_path: PathBuf,
}

impl LocalStorage {
	/// Create a new local storage backend.
	///
	/// # Errors
	///
	/// Returns `` `StorageError::ConfigError` `` if the base path does not exist
	/// or is not a directory.
	pub fn new(config: LocalConfig) -> Result<Self> {
		let base_path = PathBuf::from(config.base_path);

		if !base_path.exists() {
			return Err(StorageError::ConfigError(format!(
				"Base path does not exist: {}",
				base_path.display()
			)));
		}

		if !base_path.is_dir() {
			return Err(StorageError::ConfigError(format!(
				"Base path is not a directory: {}",
				base_path.display()
			)));
		}

		Ok(Self { base_path })
	}

	/// Base directory all names are resolved against.
	pub fn base_path(&self) -> &Path {
		&self.base_path
	}

	/// Get the full file path, refusing names that leave the base directory.
	fn get_path(&self, name: &str) -> Result<PathBuf> {
		let relative = Path::new(name);
		let escapes = relative
			.components()
			.any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

		if name.is_empty() || escapes {
			return Err(StorageError::InvalidName(name.to_string()));
		}

		Ok(self.base_path.join(relative))
	}
}

fn map_not_found(err: std::io::Error, name: &str) -> StorageError {
	if err.kind() == ErrorKind::NotFound {
		StorageError::NotFound(name.to_string())
	} else {
		StorageError::Io(err)
	}
}

#[async_trait]
impl StorageBackend for LocalStorage {
	async fn save(&self, name: &str, content: &[u8]) -> Result<()> {
		let path = self.get_path(name)?;

		// Create parent directories if they don't exist
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).await?;
		}

		fs::write(&path, content).await?;
		tracing::debug!(name, bytes = content.len(), "wrote local file");

		Ok(())
	}

	async fn open(&self, name: &str) -> Result<Vec<u8>> {
		let path = self.get_path(name)?;
		fs::read(&path).await.map_err(|e| map_not_found(e, name))
	}
}
