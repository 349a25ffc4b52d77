//! # filebind-cache
//!
//! Content cache keyed by logical path.
//!
//! Presence is meaningful: a key is present only once a value has been
//! explicitly recorded for it, by a consumer's write or by a successful load.
//! Displaying a fallback for a key never makes it present. Entries are never
//! evicted, so a key that became present stays present for the cache's
//! lifetime.

mod statistics;

pub use statistics::CacheStatistics;

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared map from key to last-known content.
///
/// Clones are handles to the same cache.
///
/// # Examples
///
/// ```
/// use filebind_cache::ContentCache;
///
/// let cache: ContentCache<Option<String>> = ContentCache::new();
/// assert_eq!(cache.get("a.txt"), None);
///
/// cache.set("a.txt", None);
/// assert!(cache.has("a.txt"));
/// assert_eq!(cache.get("a.txt"), Some(None));
/// ```
pub struct ContentCache<V> {
	entries: Arc<RwLock<HashMap<String, V>>>,
	hits: Arc<AtomicU64>,
	misses: Arc<AtomicU64>,
}

impl<V> Clone for ContentCache<V> {
	fn clone(&self) -> Self {
		Self {
			entries: Arc::clone(&self.entries),
			hits: Arc::clone(&self.hits),
			misses: Arc::clone(&self.misses),
		}
	}
}

impl<V> Default for ContentCache<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> fmt::Debug for ContentCache<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ContentCache")
			.field("entries", &self.entries.read().len())
			.finish_non_exhaustive()
	}
}

impl<V> ContentCache<V> {
	/// Create an empty cache.
	pub fn new() -> Self {
		Self {
			entries: Arc::new(RwLock::new(HashMap::new())),
			hits: Arc::new(AtomicU64::new(0)),
			misses: Arc::new(AtomicU64::new(0)),
		}
	}

	/// Whether a value was ever recorded for `key`.
	pub fn has(&self, key: &str) -> bool {
		self.entries.read().contains_key(key)
	}

	/// Record `value` for `key`, overwriting any previous value.
	pub fn set(&self, key: impl Into<String>, value: V) {
		self.entries.write().insert(key.into(), value);
	}

	/// Record `value` only if nothing is recorded for `key` yet.
	///
	/// Returns `true` if the value was stored.
	pub fn set_if_absent(&self, key: impl Into<String>, value: V) -> bool {
		let mut entries = self.entries.write();
		match entries.entry(key.into()) {
			std::collections::hash_map::Entry::Occupied(_) => false,
			std::collections::hash_map::Entry::Vacant(slot) => {
				slot.insert(value);
				true
			}
		}
	}

	/// Number of present keys.
	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}

	/// All present keys, in no particular order.
	pub fn keys(&self) -> Vec<String> {
		self.entries.read().keys().cloned().collect()
	}

	/// Hit/miss counters for [`get`](Self::get) plus the entry count.
	pub fn statistics(&self) -> CacheStatistics {
		let hits = self.hits.load(Ordering::Relaxed);
		let misses = self.misses.load(Ordering::Relaxed);
		CacheStatistics {
			hits,
			misses,
			total_requests: hits + misses,
			entry_count: self.len() as u64,
		}
	}
}

impl<V: Clone> ContentCache<V> {
	/// Recorded value for `key`, or `None` if the key is absent.
	///
	/// A present value that is itself null-like (for example `Some(None)`
	/// with `V = Option<T>`) is still returned as present.
	pub fn get(&self, key: &str) -> Option<V> {
		let value = self.entries.read().get(key).cloned();
		let counter = if value.is_some() {
			&self.hits
		} else {
			&self.misses
		};
		counter.fetch_add(1, Ordering::Relaxed);
		value
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_absent_key() {
		let cache: ContentCache<String> = ContentCache::new();

		assert!(!cache.has("a.txt"));
		assert_eq!(cache.get("a.txt"), None);
		assert!(cache.is_empty());
	}

	#[rstest]
	fn test_set_makes_key_present() {
		let cache = ContentCache::new();

		cache.set("a.txt", "hello".to_string());

		assert!(cache.has("a.txt"));
		assert_eq!(cache.get("a.txt").as_deref(), Some("hello"));
	}

	#[rstest]
	fn test_set_overwrites() {
		let cache = ContentCache::new();

		cache.set("a.txt", 1);
		cache.set("a.txt", 2);

		assert_eq!(cache.get("a.txt"), Some(2));
		assert_eq!(cache.len(), 1);
	}

	#[rstest]
	fn test_present_null_is_distinct_from_absent() {
		let cache: ContentCache<Option<String>> = ContentCache::new();

		cache.set("empty.txt", None);

		assert_eq!(cache.get("empty.txt"), Some(None));
		assert_eq!(cache.get("other.txt"), None);
	}

	#[rstest]
	fn test_set_if_absent_keeps_existing_value() {
		let cache = ContentCache::new();
		cache.set("a.txt", "edited".to_string());

		let stored = cache.set_if_absent("a.txt", "loaded".to_string());

		assert!(!stored);
		assert_eq!(cache.get("a.txt").as_deref(), Some("edited"));
		assert!(cache.set_if_absent("b.txt", "loaded".to_string()));
		assert!(cache.has("b.txt"));
	}

	#[rstest]
	fn test_clones_share_entries() {
		let cache = ContentCache::new();
		let handle = cache.clone();

		handle.set("shared.txt", 7);

		assert!(cache.has("shared.txt"));
		assert_eq!(cache.keys(), vec!["shared.txt".to_string()]);
	}

	#[rstest]
	fn test_presence_survives_many_other_writes() {
		let cache = ContentCache::new();
		cache.set("keep.txt", 0);

		for i in 0..100 {
			cache.set(format!("file-{i}.txt"), i);
		}

		assert!(cache.has("keep.txt"));
		assert_eq!(cache.len(), 101);
	}

	#[rstest]
	fn test_statistics_track_get() {
		let cache = ContentCache::new();
		cache.set("a.txt", 1);

		let _ = cache.get("a.txt");
		let _ = cache.get("a.txt");
		let _ = cache.get("missing.txt");
		let _ = cache.has("missing.txt");

		let stats = cache.statistics();
		assert_eq!(stats.hits, 2);
		assert_eq!(stats.misses, 1);
		assert_eq!(stats.total_requests, 3);
		assert_eq!(stats.entry_count, 1);
	}
}
