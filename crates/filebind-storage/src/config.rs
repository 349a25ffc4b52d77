//! Configuration types for storage backends.

use crate::{Result, StorageError};
use std::env;
use std::str::FromStr;

/// Environment variable selecting the backend type.
pub const BACKEND_ENV: &str = "FILEBIND_STORAGE_BACKEND";
/// Environment variable holding the local backend's base directory.
pub const LOCAL_BASE_PATH_ENV: &str = "FILEBIND_LOCAL_BASE_PATH";

/// Storage backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
	/// Local file system
	Local,
	/// In-memory map
	Memory,
}

impl std::fmt::Display for BackendType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			BackendType::Local => write!(f, "Local"),
			BackendType::Memory => write!(f, "Memory"),
		}
	}
}

impl FromStr for BackendType {
	type Err = StorageError;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_lowercase().as_str() {
			"local" => Ok(BackendType::Local),
			"memory" => Ok(BackendType::Memory),
			_ => Err(StorageError::ConfigError(format!(
				"Invalid backend type: {}",
				s
			))),
		}
	}
}

/// Configuration for local file system backend.
#[cfg(feature = "local")]
#[derive(Debug, Clone)]
pub struct LocalConfig {
	/// Base directory path for file storage
	pub base_path: String,
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub enum StorageConfig {
	#[cfg(feature = "local")]
	Local(LocalConfig),
	Memory,
}

impl StorageConfig {
	/// Backend type this configuration builds.
	pub fn backend_type(&self) -> BackendType {
		match self {
			#[cfg(feature = "local")]
			StorageConfig::Local(_) => BackendType::Local,
			StorageConfig::Memory => BackendType::Memory,
		}
	}

	/// Load configuration from environment variables.
	///
	/// # Environment Variables
	///
	/// - `FILEBIND_STORAGE_BACKEND`: Backend type ("local", "memory"), defaults to "memory"
	///
	/// ## Local Backend
	/// - `FILEBIND_LOCAL_BASE_PATH`: Base directory path (required)
	pub fn from_env() -> Result<Self> {
		let backend_type = match env::var(BACKEND_ENV) {
			Ok(value) => value.parse::<BackendType>()?,
			Err(_) => BackendType::Memory,
		};

		match backend_type {
			#[cfg(feature = "local")]
			BackendType::Local => {
				let base_path = env::var(LOCAL_BASE_PATH_ENV).map_err(|_| {
					StorageError::ConfigError(format!(
						"{} environment variable not set",
						LOCAL_BASE_PATH_ENV
					))
				})?;

				Ok(StorageConfig::Local(LocalConfig { base_path }))
			}
			BackendType::Memory => Ok(StorageConfig::Memory),
			#[allow(unreachable_patterns)]
			_ => Err(StorageError::ConfigError(format!(
				"Backend type not enabled: {:?}",
				backend_type
			))),
		}
	}
}
