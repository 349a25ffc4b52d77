//! Error types for binding configuration.

use thiserror::Error;

/// Invalid binding settings.
///
/// This is the only error the binding layer returns to callers. Load and save
/// failures are logged where they happen instead.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Settings document could not be parsed.
	#[error("Invalid settings: {0}")]
	Toml(#[from] toml::de::Error),

	/// An environment override holds an unusable value.
	#[error("Invalid value for {name}: {value:?}")]
	InvalidEnv { name: &'static str, value: String },
}

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
