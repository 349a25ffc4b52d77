//! Storage backends and virtual files.
//!
//! # Examples
//!
//! ```rust,no_run
//! use filebind::storage::{MemoryStorage, StorageResolver, TextCodec};
//! ```

pub use filebind_storage::*;
