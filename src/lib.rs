//! # Filebind
//!
//! Write-through content binding for virtual files with debounced autosave.
//!
//! A [`Binding`] serves the content of the "current key" from a shared
//! [`ContentCache`], loads it from a backing store the first time the key
//! becomes active, and saves edits through a per-key debounced writer. Edits
//! land in the cache at once; the store is written after a quiet window, or
//! right away when the key is switched away from.
//!
//! While a key's content is not loaded yet, the binding shows a fallback
//! value. That value is never saved, so a slow or failed load cannot end with
//! the fallback overwriting the real file.
//!
//! ## Crates
//!
//! - [`storage`] - storage backends, codecs and virtual files (`filebind-storage`)
//! - [`cache`] - the shared content cache (`filebind-cache`)
//! - [`autosave`] - debounced per-key writers (`filebind-autosave`)
//! - [`binding`] - the binding engine and key observation (`filebind-binding`)
//!
//! ## Feature Flags
//!
//! - `local` (default) - local file system backend
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use filebind::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() -> filebind::storage::Result<()> {
//! let storage = create_storage(StorageConfig::from_env()?)?;
//! let binding = Binding::new(
//!     ContentCache::new(),
//!     Arc::new(StorageResolver::new(storage, TextCodec)),
//!     BindingConfig::new().with_fallback(String::new()),
//! );
//!
//! binding.switch_key(Some("notes/today.md")).await;
//! binding.set("- buy milk".to_string());
//!
//! // Saves "notes/today.md" before loading the next file
//! binding.switch_key(Some("notes/tomorrow.md")).await;
//! binding.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod autosave;
pub mod binding;
pub mod cache;
pub mod storage;

pub use filebind_autosave::{DEFAULT_QUIET_WINDOW, DebouncedWriterRegistry};
pub use filebind_binding::{
	Binding, BindingConfig, BindingSettings, ChangeObserver, ConfigError, KeySignal,
	ValueListener,
};
pub use filebind_cache::{CacheStatistics, ContentCache};
pub use filebind_storage::{
	BackingNode, ContentCodec, JsonCodec, MemoryStorage, NodeResolver, StorageBackend,
	StorageConfig, StorageError, StorageResolver, TextCodec, VirtualFile, create_storage,
};
#[cfg(feature = "local")]
pub use filebind_storage::LocalStorage;

pub mod prelude {
	pub use crate::{
		Binding, BindingConfig, ChangeObserver, ContentCache, ContentCodec, DebouncedWriterRegistry,
		JsonCodec, KeySignal, MemoryStorage, NodeResolver, StorageBackend, StorageConfig,
		StorageResolver, TextCodec, create_storage,
	};

	#[cfg(feature = "local")]
	pub use crate::LocalStorage;
}
