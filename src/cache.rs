//! Shared content cache.

pub use filebind_cache::*;
