//! Debounced per-key writers.
//!
//! # Examples
//!
//! ```rust,no_run
//! use filebind::autosave::{DEFAULT_QUIET_WINDOW, DebouncedWriterRegistry};
//! ```

pub use filebind_autosave::*;
