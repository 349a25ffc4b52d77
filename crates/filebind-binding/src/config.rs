//! Binding configuration.
//!
//! [`BindingSettings`] is the serializable form (TOML document or environment),
//! [`BindingConfig`] is what a [`crate::Binding`] is built from.

use crate::error::{ConfigError, Result};
use filebind_autosave::DEFAULT_QUIET_WINDOW;
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Environment variable overriding the quiet window, in milliseconds.
pub const QUIET_WINDOW_ENV: &str = "FILEBIND_QUIET_WINDOW_MS";

/// Runtime configuration of a binding.
#[derive(Debug, Clone)]
pub struct BindingConfig<V> {
	/// Value shown while no content is cached for the current key.
	pub initial_fallback: Option<V>,
	/// Inactivity required before an edit is saved.
	pub quiet_window: Duration,
}

impl<V> Default for BindingConfig<V> {
	fn default() -> Self {
		Self {
			initial_fallback: None,
			quiet_window: DEFAULT_QUIET_WINDOW,
		}
	}
}

impl<V> BindingConfig<V> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the value shown while nothing is cached.
	///
	/// # Examples
	///
	/// ```
	/// use filebind_binding::BindingConfig;
	/// use std::time::Duration;
	///
	/// let config = BindingConfig::new()
	///     .with_fallback(String::new())
	///     .with_quiet_window(Duration::from_millis(250));
	/// assert_eq!(config.initial_fallback.as_deref(), Some(""));
	/// ```
	pub fn with_fallback(mut self, fallback: V) -> Self {
		self.initial_fallback = Some(fallback);
		self
	}

	pub fn with_quiet_window(mut self, quiet_window: Duration) -> Self {
		self.quiet_window = quiet_window;
		self
	}
}

impl<V> From<BindingSettings<V>> for BindingConfig<V> {
	fn from(settings: BindingSettings<V>) -> Self {
		Self {
			initial_fallback: settings.initial_fallback,
			quiet_window: Duration::from_millis(settings.quiet_window_ms),
		}
	}
}

/// Serializable binding settings.
///
/// ```toml
/// initial_fallback = ""
/// quiet_window_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, bound(deserialize = "V: Deserialize<'de>"))]
pub struct BindingSettings<V> {
	pub initial_fallback: Option<V>,
	pub quiet_window_ms: u64,
}

impl<V> Default for BindingSettings<V> {
	fn default() -> Self {
		Self {
			initial_fallback: None,
			quiet_window_ms: DEFAULT_QUIET_WINDOW.as_millis() as u64,
		}
	}
}

impl<V> BindingSettings<V> {
	/// Parse settings from a TOML document. Missing fields keep their defaults.
	pub fn from_toml(document: &str) -> Result<Self>
	where
		V: for<'de> Deserialize<'de>,
	{
		Ok(toml::from_str(document)?)
	}

	/// Default settings with environment overrides applied.
	///
	/// # Environment Variables
	///
	/// - `FILEBIND_QUIET_WINDOW_MS`: quiet window in milliseconds
	pub fn from_env() -> Result<Self> {
		Self::default().with_env_overrides()
	}

	/// Apply environment overrides on top of these settings.
	pub fn with_env_overrides(mut self) -> Result<Self> {
		if let Ok(value) = env::var(QUIET_WINDOW_ENV) {
			self.quiet_window_ms = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
				name: QUIET_WINDOW_ENV,
				value,
			})?;
		}
		Ok(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	#[rstest]
	fn test_default_quiet_window_is_one_second() {
		let config: BindingConfig<String> = BindingConfig::default();

		assert_eq!(config.quiet_window, Duration::from_millis(1000));
		assert!(config.initial_fallback.is_none());
	}

	#[rstest]
	fn test_from_toml() {
		let settings: BindingSettings<String> = BindingSettings::from_toml(
			r#"
			initial_fallback = "untitled"
			quiet_window_ms = 250
			"#,
		)
		.unwrap();

		let config = BindingConfig::from(settings);

		assert_eq!(config.initial_fallback.as_deref(), Some("untitled"));
		assert_eq!(config.quiet_window, Duration::from_millis(250));
	}

	#[rstest]
	fn test_from_toml_missing_fields_use_defaults() {
		let settings: BindingSettings<String> = BindingSettings::from_toml("").unwrap();

		assert_eq!(settings, BindingSettings::default());
	}

	#[rstest]
	fn test_from_toml_rejects_wrong_type() {
		let result = BindingSettings::<String>::from_toml("quiet_window_ms = \"soon\"");

		assert!(matches!(result, Err(ConfigError::Toml(_))));
	}

	#[rstest]
	#[serial(binding_env)]
	fn test_env_override() {
		// SAFETY: serialized with every other test touching this variable
		unsafe {
			env::set_var(QUIET_WINDOW_ENV, "40");
		}

		let settings = BindingSettings::<String>::from_env();

		unsafe {
			env::remove_var(QUIET_WINDOW_ENV);
		}
		assert_eq!(settings.unwrap().quiet_window_ms, 40);
	}

	#[rstest]
	#[serial(binding_env)]
	fn test_env_override_invalid() {
		// SAFETY: serialized with every other test touching this variable
		unsafe {
			env::set_var(QUIET_WINDOW_ENV, "fast");
		}

		let result = BindingSettings::<String>::from_env();

		unsafe {
			env::remove_var(QUIET_WINDOW_ENV);
		}
		match result {
			Err(ConfigError::InvalidEnv { name, value }) => {
				assert_eq!(name, QUIET_WINDOW_ENV);
				assert_eq!(value, "fast");
			}
			other => panic!("expected InvalidEnv, got {:?}", other),
		}
	}

	#[rstest]
	#[serial(binding_env)]
	fn test_env_override_keeps_document_fallback() {
		let settings: BindingSettings<String> =
			BindingSettings::from_toml("initial_fallback = \"{}\"").unwrap();
		// SAFETY: serialized with every other test touching this variable
		unsafe {
			env::remove_var(QUIET_WINDOW_ENV);
		}

		let settings = settings.with_env_overrides().unwrap();

		assert_eq!(settings.initial_fallback.as_deref(), Some("{}"));
		assert_eq!(settings.quiet_window_ms, 1000);
	}
}
