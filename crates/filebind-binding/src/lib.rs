//! # filebind-binding
//!
//! Binds the content of the active key to an in-memory value with autosave.
//!
//! The [`Binding`] is the engine's public surface. It ties together:
//!
//! - the [`ContentCache`](filebind_cache::ContentCache) serving reads,
//! - the [`DebouncedWriterRegistry`](filebind_autosave::DebouncedWriterRegistry)
//!   coalescing edits into saves,
//! - the [`NodeResolver`](filebind_storage::NodeResolver) reaching the files.
//!
//! ## Lifecycle
//!
//! ```text
//! Unbound ──switch_key(K)──▶ Loading-or-Cached(K) ──switch_key(K2)──▶ flush(K), load(K2)
//! ```
//!
//! Loading never happens for a key that is already cached, and a save is
//! never scheduled for a key that is not. The fallback value shown for an
//! unloaded key therefore cannot overwrite the file behind it.

pub mod binding;
pub mod config;
pub mod error;
pub mod observer;

pub use binding::{Binding, ValueListener};
pub use config::{BindingConfig, BindingSettings};
pub use error::ConfigError;
pub use observer::{ChangeObserver, KeySignal};
