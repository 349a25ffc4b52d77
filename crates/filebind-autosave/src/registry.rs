//! Debounced writer registry

use filebind_storage::NodeResolver;
use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Quiet window used when none is configured.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(1000);

/// Buffered, not yet persisted value for one key.
struct PendingWrite<V> {
	value: V,
	generation: u64,
	timer: JoinHandle<()>,
}

/// Serializes the writes of one key. Holds the generation last written.
type WriteSlot = Arc<tokio::sync::Mutex<Option<u64>>>;

struct Pending<V> {
	writes: HashMap<String, PendingWrite<V>>,
	next_generation: u64,
}

struct RegistryInner<V> {
	resolver: Arc<dyn NodeResolver<V>>,
	quiet_window: Duration,
	pending: Mutex<Pending<V>>,
	slots: Mutex<HashMap<String, WriteSlot>>,
}

/// One debounced writer per key with unsaved edits.
///
/// Writes of the same key never overlap and an older value is never written
/// after a newer one. [`flush`](Self::flush) and [`flush_all`](Self::flush_all)
/// return only once the writes they cover, including ones a timer already
/// started, have finished.
///
/// Clones share the same pending writes.
///
/// Timers are Tokio tasks, so [`schedule`](Self::schedule) must be called
/// from within a Tokio runtime.
///
/// # Examples
///
/// ```rust,no_run
/// use filebind_autosave::DebouncedWriterRegistry;
/// use filebind_storage::{MemoryStorage, StorageResolver, TextCodec};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # async fn example() {
/// let resolver = StorageResolver::new(Arc::new(MemoryStorage::new()), TextCodec);
/// let writers = DebouncedWriterRegistry::new(Arc::new(resolver), Duration::from_millis(500));
///
/// writers.schedule("notes.md", "d".to_string());
/// writers.schedule("notes.md", "dr".to_string());
/// writers.schedule("notes.md", "draft".to_string());
///
/// // Saves "draft" once, without waiting for the quiet window
/// writers.flush("notes.md").await;
/// # }
/// ```
pub struct DebouncedWriterRegistry<V> {
	inner: Arc<RegistryInner<V>>,
}

impl<V> Clone for DebouncedWriterRegistry<V> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<V> fmt::Debug for DebouncedWriterRegistry<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DebouncedWriterRegistry")
			.field("quiet_window", &self.inner.quiet_window)
			.field("pending", &self.inner.pending.lock().writes.len())
			.field("writing", &self.inner.slots.lock().len())
			.finish()
	}
}

impl<V> DebouncedWriterRegistry<V>
where
	V: Send + Sync + 'static,
{
	/// Create a registry saving through `resolver` after `quiet_window` of inactivity.
	pub fn new(resolver: Arc<dyn NodeResolver<V>>, quiet_window: Duration) -> Self {
		Self {
			inner: Arc::new(RegistryInner {
				resolver,
				quiet_window,
				pending: Mutex::new(Pending {
					writes: HashMap::new(),
					next_generation: 0,
				}),
				slots: Mutex::new(HashMap::new()),
			}),
		}
	}

	pub fn quiet_window(&self) -> Duration {
		self.inner.quiet_window
	}

	/// Buffer `value` as the latest edit for `key` and restart its quiet window.
	///
	/// # Panics
	///
	/// Panics when called outside a Tokio runtime.
	pub fn schedule(&self, key: &str, value: V) {
		// Generations are handed out under the lock so that the entry left in
		// the map always carries the highest one.
		let mut pending = self.inner.pending.lock();
		let generation = pending.next_generation;
		pending.next_generation += 1;

		let timer = tokio::spawn({
			let inner = Arc::clone(&self.inner);
			let key = key.to_string();
			async move {
				tokio::time::sleep(inner.quiet_window).await;
				inner.fire(&key, generation).await;
			}
		});

		let previous = pending.writes.insert(
			key.to_string(),
			PendingWrite {
				value,
				generation,
				timer,
			},
		);
		if let Some(previous) = previous {
			previous.timer.abort();
		}
	}

	/// Persist the pending edit for `key` now, skipping the rest of the quiet window.
	///
	/// A write of `key` already under way is waited for as well. Returns
	/// `false` when nothing was pending.
	pub async fn flush(&self, key: &str) -> bool {
		match self.inner.take(key) {
			Some((entry, slot)) => {
				entry.timer.abort();
				self.inner
					.persist(key, &entry.value, entry.generation, slot)
					.await;
				true
			}
			None => {
				let slot = self.inner.slots.lock().get(key).cloned();
				if let Some(slot) = slot {
					self.inner.settle(key, slot).await;
				}
				false
			}
		}
	}

	/// Persist every pending edit and wait for writes already under way.
	/// Used on shutdown.
	///
	/// Returns the number of pending edits flushed.
	pub async fn flush_all(&self) -> usize {
		let (drained, writing) = {
			let mut pending = self.inner.pending.lock();
			let drained: Vec<_> = pending
				.writes
				.drain()
				.map(|(key, entry)| {
					let slot = self.inner.slot(&key);
					(key, entry, slot)
				})
				.collect();
			let writing: Vec<(String, WriteSlot)> = self
				.inner
				.slots
				.lock()
				.iter()
				.map(|(key, slot)| (key.clone(), Arc::clone(slot)))
				.collect();
			(drained, writing)
		};
		let count = drained.len();

		let saves = drained.into_iter().map(|(key, entry, slot)| {
			entry.timer.abort();
			let inner = Arc::clone(&self.inner);
			async move {
				inner
					.persist(&key, &entry.value, entry.generation, slot)
					.await
			}
		});
		let settles = writing.into_iter().map(|(key, slot)| {
			let inner = Arc::clone(&self.inner);
			async move { inner.settle(&key, slot).await }
		});
		tokio::join!(join_all(saves), join_all(settles));

		count
	}

	/// Whether `key` has a buffered edit waiting for its quiet window.
	pub fn is_pending(&self, key: &str) -> bool {
		self.inner.pending.lock().writes.contains_key(key)
	}

	/// Whether a write of `key` is under way or queued.
	pub fn is_writing(&self, key: &str) -> bool {
		self.inner.slots.lock().contains_key(key)
	}

	/// Keys with buffered edits, in no particular order.
	pub fn pending_keys(&self) -> Vec<String> {
		self.inner.pending.lock().writes.keys().cloned().collect()
	}
}

impl<V> RegistryInner<V>
where
	V: Send + Sync + 'static,
{
	/// Timer expiry. A newer `schedule` or a `flush` retires the generation,
	/// in which case there is nothing left to do.
	async fn fire(&self, key: &str, generation: u64) {
		let taken = {
			let mut pending = self.pending.lock();
			let current = pending
				.writes
				.get(key)
				.is_some_and(|entry| entry.generation == generation);
			if current {
				pending
					.writes
					.remove(key)
					.map(|entry| (entry, self.slot(key)))
			} else {
				None
			}
		};

		if let Some((entry, slot)) = taken {
			self.persist(key, &entry.value, entry.generation, slot)
				.await;
		}
	}

	/// Remove the pending entry of `key` together with its write slot.
	fn take(&self, key: &str) -> Option<(PendingWrite<V>, WriteSlot)> {
		let mut pending = self.pending.lock();
		let entry = pending.writes.remove(key)?;
		Some((entry, self.slot(key)))
	}

	/// The write slot of `key`, created on first use.
	///
	/// Taken while the pending entry is removed, so the slot outlives every
	/// write that has left the map.
	fn slot(&self, key: &str) -> WriteSlot {
		Arc::clone(self.slots.lock().entry(key.to_string()).or_default())
	}

	/// Drop the slot of `key` once nobody else holds it.
	fn release(&self, key: &str, slot: WriteSlot) {
		let mut slots = self.slots.lock();
		let idle = slots
			.get(key)
			.is_some_and(|held| Arc::ptr_eq(held, &slot) && Arc::strong_count(&slot) == 2);
		if idle {
			slots.remove(key);
		}
	}

	/// Wait until every write of `key` queued so far has finished.
	async fn settle(&self, key: &str, slot: WriteSlot) {
		drop(slot.lock().await);
		self.release(key, slot);
	}

	async fn persist(&self, key: &str, value: &V, generation: u64, slot: WriteSlot) {
		{
			let mut written = slot.lock().await;
			if (*written).is_some_and(|last| last > generation) {
				debug!(key, "newer value already saved, dropping stale write");
			} else {
				self.write(key, value).await;
				*written = Some(generation);
			}
		}
		self.release(key, slot);
	}

	async fn write(&self, key: &str, value: &V) {
		let Some(node) = self.resolver.resolve(key) else {
			debug!(key, "no backing node for key, skipping save");
			return;
		};

		match node.write(value).await {
			Ok(()) => debug!(key, "saved"),
			Err(error) => error!(key, %error, "failed to save"),
		}
	}
}
