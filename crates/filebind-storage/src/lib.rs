//! # filebind-storage
//!
//! Virtual file storage for filebind.
//!
//! This crate provides the byte-level [`StorageBackend`] abstraction together with
//! the typed layer the binding engine consumes: a [`BackingNode`] reads and writes
//! decoded values, and a [`NodeResolver`] maps a logical key (a path) to a node.
//!
//! ## Features
//!
//! - **Unified API**: Single `` `StorageBackend` `` trait for every byte store
//! - **Async I/O**: All operations are asynchronous using Tokio
//! - **Codecs**: Plain text and JSON content through [`ContentCodec`]
//! - **Feature Flags**: The local file system backend sits behind `local`
//!
//! ## Example
//!
//! ```rust,no_run
//! use filebind_storage::{BackingNode, NodeResolver, StorageResolver, TextCodec, create_storage, StorageConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = create_storage(StorageConfig::from_env()?)?;
//!     let resolver = StorageResolver::new(storage, TextCodec);
//!
//!     if let Some(node) = resolver.resolve("notes/today.md") {
//!         node.write(&"# Today".to_string()).await?;
//!         let content = node.read().await?;
//!         println!("{content}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod backends;
pub mod codec;
pub mod config;
pub mod error;
pub mod factory;
pub mod node;
pub mod resolver;

pub use backend::StorageBackend;
pub use backends::memory::MemoryStorage;
#[cfg(feature = "local")]
pub use backends::local::LocalStorage;
pub use codec::{ContentCodec, JsonCodec, TextCodec};
pub use config::{BackendType, StorageConfig};
pub use error::{Result, StorageError};
pub use factory::create_storage;
pub use node::{BackingNode, VirtualFile};
pub use resolver::{NodeResolver, StorageResolver};
