//! Test fixtures for binding tests.
//!
//! [`RecordingResolver`] stores files in memory and records every read and
//! write with the (paused) Tokio clock, so tests can assert exactly when the
//! backing store was touched.

#![allow(dead_code)]

use async_trait::async_trait;
use filebind_binding::{Binding, BindingConfig};
use filebind_cache::ContentCache;
use filebind_storage::{
	BackingNode, MemoryStorage, NodeResolver, StorageError, StorageResolver, TextCodec,
};
use parking_lot::Mutex;
use rstest::fixture;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub const QUIET_WINDOW: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
	Read(String),
	Write(String, String),
}

#[derive(Debug, Clone)]
pub struct Event {
	pub op: Op,
	pub at: Instant,
}

#[derive(Default)]
struct Faults {
	reads: HashSet<String>,
	writes: HashSet<String>,
}

/// In-memory resolver that records every backing-store access.
#[derive(Clone)]
pub struct RecordingResolver {
	storage: MemoryStorage,
	files: Arc<StorageResolver<TextCodec>>,
	events: Arc<Mutex<Vec<Event>>>,
	faults: Arc<Mutex<Faults>>,
	read_delay: Duration,
	write_delay: Duration,
}

impl RecordingResolver {
	pub fn new(storage: MemoryStorage) -> Self {
		Self {
			files: Arc::new(StorageResolver::new(Arc::new(storage.clone()), TextCodec)),
			storage,
			events: Arc::new(Mutex::new(Vec::new())),
			faults: Arc::new(Mutex::new(Faults::default())),
			read_delay: Duration::ZERO,
			write_delay: Duration::ZERO,
		}
	}

	/// Make every read take `delay` on the Tokio clock.
	pub fn with_read_delay(mut self, delay: Duration) -> Self {
		self.read_delay = delay;
		self
	}

	/// Make every write take `delay` on the Tokio clock before it reaches storage.
	pub fn with_write_delay(mut self, delay: Duration) -> Self {
		self.write_delay = delay;
		self
	}

	pub fn fail_reads(&self, key: &str) {
		self.faults.lock().reads.insert(key.to_string());
	}

	pub fn fail_writes(&self, key: &str) {
		self.faults.lock().writes.insert(key.to_string());
	}

	pub fn storage(&self) -> &MemoryStorage {
		&self.storage
	}

	pub fn events(&self) -> Vec<Event> {
		self.events.lock().clone()
	}

	pub fn ops(&self) -> Vec<Op> {
		self.events().into_iter().map(|e| e.op).collect()
	}

	pub fn reads_of(&self, key: &str) -> usize {
		self.ops()
			.iter()
			.filter(|op| matches!(op, Op::Read(k) if k == key))
			.count()
	}

	/// Values written to `key`, oldest first.
	pub fn writes_to(&self, key: &str) -> Vec<String> {
		self.ops()
			.into_iter()
			.filter_map(|op| match op {
				Op::Write(k, value) if k == key => Some(value),
				_ => None,
			})
			.collect()
	}

	/// Writes to `key` with the time they happened at.
	pub fn timed_writes_to(&self, key: &str) -> Vec<(String, Instant)> {
		self.events()
			.into_iter()
			.filter_map(|e| match e.op {
				Op::Write(k, value) if k == key => Some((value, e.at)),
				_ => None,
			})
			.collect()
	}

	fn record(&self, op: Op) {
		self.events.lock().push(Event {
			op,
			at: Instant::now(),
		});
	}
}

struct RecordingNode {
	key: String,
	file: Arc<dyn BackingNode<String>>,
	resolver: RecordingResolver,
}

#[async_trait]
impl BackingNode<String> for RecordingNode {
	async fn read(&self) -> filebind_storage::Result<String> {
		self.resolver.record(Op::Read(self.key.clone()));
		if !self.resolver.read_delay.is_zero() {
			tokio::time::sleep(self.resolver.read_delay).await;
		}
		if self.resolver.faults.lock().reads.contains(&self.key) {
			return Err(StorageError::Io(std::io::Error::other("read failed")));
		}
		self.file.read().await
	}

	async fn write(&self, value: &String) -> filebind_storage::Result<()> {
		self.resolver
			.record(Op::Write(self.key.clone(), value.clone()));
		if !self.resolver.write_delay.is_zero() {
			tokio::time::sleep(self.resolver.write_delay).await;
		}
		if self.resolver.faults.lock().writes.contains(&self.key) {
			return Err(StorageError::Io(std::io::Error::other("write failed")));
		}
		self.file.write(value).await
	}
}

impl NodeResolver<String> for RecordingResolver {
	fn resolve(&self, key: &str) -> Option<Arc<dyn BackingNode<String>>> {
		let file = self.files.resolve(key)?;
		Some(Arc::new(RecordingNode {
			key: key.to_string(),
			file,
			resolver: self.clone(),
		}))
	}
}

/// Resolver over an empty store.
#[fixture]
pub fn resolver() -> RecordingResolver {
	RecordingResolver::new(MemoryStorage::new())
}

/// Binding with an empty-string fallback and a one second quiet window.
pub fn text_binding(resolver: &RecordingResolver) -> Binding<String> {
	Binding::new(
		ContentCache::new(),
		Arc::new(resolver.clone()),
		BindingConfig::new()
			.with_fallback(String::new())
			.with_quiet_window(QUIET_WINDOW),
	)
}
