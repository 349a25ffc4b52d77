//! Test fixtures for storage backend tests.
//!
//! All fixtures are designed to work with rstest and can be composed together.

#![allow(dead_code)]

use filebind_storage::{MemoryStorage, StorageBackend, StorageConfig, create_storage};
use rstest::fixture;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Test directory wrapper for local storage.
///
/// The temp directory is removed when the wrapper is dropped, so tests keep
/// it alive for as long as they use the backend.
pub struct LocalTestDir {
	temp_dir: TempDir,
	backend: Arc<dyn StorageBackend>,
}

impl LocalTestDir {
	pub fn new() -> Self {
		let temp_dir = TempDir::new().expect("Failed to create temp dir");
		let base_path = temp_dir.path().to_str().unwrap().to_string();

		let config = StorageConfig::Local(filebind_storage::config::LocalConfig { base_path });
		let backend = create_storage(config).expect("Failed to create local backend");

		Self { temp_dir, backend }
	}

	pub fn backend(&self) -> Arc<dyn StorageBackend> {
		Arc::clone(&self.backend)
	}

	pub fn path(&self) -> &Path {
		self.temp_dir.path()
	}
}

/// Local test directory fixture.
#[fixture]
pub fn local_dir() -> LocalTestDir {
	LocalTestDir::new()
}

/// Empty in-memory backend fixture.
#[fixture]
pub fn memory_storage() -> MemoryStorage {
	MemoryStorage::new()
}
