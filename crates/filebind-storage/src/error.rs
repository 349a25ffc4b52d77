//! Error types for storage operations.

use thiserror::Error;

/// Errors raised by storage backends, codecs and backing nodes.
#[derive(Debug, Error)]
pub enum StorageError {
	/// The requested file does not exist.
	#[error("File not found: {0}")]
	NotFound(String),

	/// The file name is empty or escapes the storage root.
	#[error("Invalid file name: {0}")]
	InvalidName(String),

	/// Underlying I/O failure.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// Content could not be encoded or decoded.
	#[error("Codec error: {0}")]
	Codec(String),

	/// Backend configuration is missing or invalid.
	#[error("Configuration error: {0}")]
	ConfigError(String),
}

impl StorageError {
	/// Returns `true` when the error means the file simply does not exist yet.
	pub fn is_not_found(&self) -> bool {
		matches!(self, StorageError::NotFound(_))
	}
}

impl From<serde_json::Error> for StorageError {
	fn from(err: serde_json::Error) -> Self {
		StorageError::Codec(err.to_string())
	}
}

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
