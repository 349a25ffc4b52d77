//! The binding between the active key and its content.

use crate::config::BindingConfig;
use crate::observer::ChangeObserver;
use filebind_autosave::DebouncedWriterRegistry;
use filebind_cache::ContentCache;
use filebind_storage::NodeResolver;
use futures::FutureExt;
use futures::future::{BoxFuture, WeakShared};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error};

/// Listener notified with the key and the new value.
pub type ValueListener<V> = Arc<dyn Fn(&str, &V) + Send + Sync>;

type LoadFuture = BoxFuture<'static, ()>;

/// In-flight loads by key. Only weak handles are kept so a load nobody
/// awaits any more is dropped, and its entry with it.
type InFlightLoads = Mutex<HashMap<String, (u64, WeakShared<LoadFuture>)>>;

struct BindingInner<V> {
	cache: ContentCache<V>,
	writers: DebouncedWriterRegistry<V>,
	resolver: Arc<dyn NodeResolver<V>>,
	fallback: Option<V>,
	key: RwLock<Option<String>>,
	loads: InFlightLoads,
	next_load: AtomicU64,
	listeners: RwLock<Vec<ValueListener<V>>>,
}

/// Read/write accessor for the content of the active key.
///
/// Reads are served from the shared [`ContentCache`]; while nothing is cached
/// for the key the configured fallback is shown instead. Writes land in the
/// cache at once and are saved through the key's debounced writer.
///
/// A save is only ever scheduled for a key that is present in the cache. The
/// fallback never makes a key present, so showing it can never overwrite a
/// file whose real content has not finished loading.
///
/// Clones are handles to the same binding.
///
/// # Examples
///
/// ```rust,no_run
/// use filebind_binding::{Binding, BindingConfig};
/// use filebind_cache::ContentCache;
/// use filebind_storage::{MemoryStorage, StorageResolver, TextCodec};
/// use std::sync::Arc;
///
/// # async fn example() {
/// let resolver = StorageResolver::new(Arc::new(MemoryStorage::new()), TextCodec);
/// let binding = Binding::new(
///     ContentCache::new(),
///     Arc::new(resolver),
///     BindingConfig::new().with_fallback(String::new()),
/// );
///
/// binding.switch_key(Some("notes.md")).await;
/// assert_eq!(binding.get().as_deref(), Some(""));
///
/// binding.set("# Notes".to_string());
/// binding.shutdown().await;
/// # }
/// ```
pub struct Binding<V> {
	inner: Arc<BindingInner<V>>,
}

impl<V> Clone for Binding<V> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<V> fmt::Debug for Binding<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Binding")
			.field("key", &*self.inner.key.read())
			.field("cache", &self.inner.cache)
			.field("writers", &self.inner.writers)
			.finish_non_exhaustive()
	}
}

impl<V> Binding<V>
where
	V: Clone + Send + Sync + 'static,
{
	/// Create an unbound binding over `cache`, resolving keys with `resolver`.
	pub fn new(
		cache: ContentCache<V>,
		resolver: Arc<dyn NodeResolver<V>>,
		config: BindingConfig<V>,
	) -> Self {
		let writers = DebouncedWriterRegistry::new(Arc::clone(&resolver), config.quiet_window);
		Self {
			inner: Arc::new(BindingInner {
				cache,
				writers,
				resolver,
				fallback: config.initial_fallback,
				key: RwLock::new(None),
				loads: Mutex::new(HashMap::new()),
				next_load: AtomicU64::new(0),
				listeners: RwLock::new(Vec::new()),
			}),
		}
	}

	/// The active key, if any.
	pub fn current_key(&self) -> Option<String> {
		self.inner.key.read().clone()
	}

	/// The shared content cache.
	pub fn cache(&self) -> &ContentCache<V> {
		&self.inner.cache
	}

	/// The debounced writers saving this binding's edits.
	pub fn writers(&self) -> &DebouncedWriterRegistry<V> {
		&self.inner.writers
	}

	/// Content for the active key.
	///
	/// Returns the cached value when the key is present (even a null-like
	/// one), the configured fallback otherwise, and `None` without a key.
	pub fn get(&self) -> Option<V> {
		let key = self.current_key()?;
		self.inner
			.cache
			.get(&key)
			.or_else(|| self.inner.fallback.clone())
	}

	/// Replace the content of the active key.
	///
	/// The value is recorded in the cache, which makes the key present, and a
	/// save is scheduled. Without an active key this does nothing.
	pub fn set(&self, value: V) {
		let Some(key) = self.current_key() else {
			return;
		};
		self.inner.cache.set(key.as_str(), value.clone());
		self.inner.notify(&key, &value);
		self.on_value_changed(&value);
	}

	/// Handle a value change for the active key.
	///
	/// Schedules a save only when the key is present in the cache at this
	/// moment. A value surfaced while nothing is cached (the fallback) is
	/// never saved.
	pub fn on_value_changed(&self, value: &V) {
		let Some(key) = self.current_key() else {
			return;
		};
		if !self.inner.cache.has(&key) {
			debug!(key = %key, "content not loaded, skipping save");
			return;
		}
		self.inner.writers.schedule(&key, value.clone());
	}

	/// Make `key` the active key.
	///
	/// Pending edits of the previous key are saved and the new key is loaded
	/// unless it is already cached. Switching to the active key does nothing.
	pub async fn switch_key<K: Into<String>>(&self, key: Option<K>) {
		let new = key.map(Into::into);
		if let Some(old) = self.replace_key(new.clone()) {
			self.on_key_changed(old.as_deref(), new.as_deref()).await;
		}
	}

	/// Store `new` as the active key. Returns the previous key, or `None`
	/// when `new` already is the active key.
	fn replace_key(&self, new: Option<String>) -> Option<Option<String>> {
		let mut current = self.inner.key.write();
		if *current == new {
			return None;
		}
		Some(std::mem::replace(&mut *current, new))
	}

	/// Handle a change of the active key from `old` to `new`.
	///
	/// The flush of `old` starts before the load of `new`; both then run
	/// concurrently.
	pub async fn on_key_changed(&self, old: Option<&str>, new: Option<&str>) {
		let flush = async {
			if let Some(old) = old {
				self.inner.writers.flush(old).await;
			}
		};
		let load = async {
			if let Some(new) = new {
				self.load(new).await;
			}
		};
		tokio::join!(flush, load);
	}

	/// Load `key` into the cache unless it is already present.
	///
	/// Concurrent loads of the same key share a single read. A failed read is
	/// logged and leaves the key absent.
	pub async fn load(&self, key: &str) {
		if self.inner.cache.has(key) {
			return;
		}

		let load = {
			let mut loads = self.inner.loads.lock();
			match loads.get(key).and_then(|(_, load)| load.upgrade()) {
				Some(in_flight) => in_flight,
				None => {
					let id = self.inner.next_load.fetch_add(1, Ordering::Relaxed);
					let load = BindingInner::read_into_cache(Arc::clone(&self.inner), key.to_string(), id)
						.boxed()
						.shared();
					if let Some(weak) = load.downgrade() {
						loads.insert(key.to_string(), (id, weak));
					}
					load
				}
			}
		};
		load.await;
	}

	/// Whether a read for `key` is in flight.
	pub fn is_loading(&self, key: &str) -> bool {
		self.inner.loads.lock().contains_key(key)
	}

	/// Register a listener for new values: explicit writes and completed loads.
	///
	/// Listeners only observe. Nothing they see is saved on their behalf.
	pub fn subscribe<F>(&self, listener: F)
	where
		F: Fn(&str, &V) + Send + Sync + 'static,
	{
		self.inner.listeners.write().push(Arc::new(listener));
	}

	/// Save the active key's pending edit now. Returns whether one was pending.
	pub async fn flush(&self) -> bool {
		match self.current_key() {
			Some(key) => self.inner.writers.flush(&key).await,
			None => false,
		}
	}

	/// Save every pending edit. Returns the number of keys saved.
	pub async fn shutdown(&self) -> usize {
		self.inner.writers.flush_all().await
	}
}

impl<V> BindingInner<V>
where
	V: Clone + Send + Sync + 'static,
{
	async fn read_into_cache(inner: Arc<Self>, key: String, id: u64) {
		let _entry = LoadEntry {
			loads: &inner.loads,
			key: &key,
			id,
		};
		inner.read_and_record(&key).await;
	}

	async fn read_and_record(&self, key: &str) {
		let Some(node) = self.resolver.resolve(key) else {
			debug!(key, "no backing node for key, nothing to load");
			return;
		};

		match node.read().await {
			// An edit made while the read was in flight wins over the stale content
			Ok(value) => {
				if self.cache.set_if_absent(key, value.clone()) {
					debug!(key, "loaded");
					self.notify(key, &value);
				}
			}
			Err(error) if error.is_not_found() => {
				debug!(key, "no content stored yet");
			}
			Err(error) => error!(key, %error, "failed to load"),
		}
	}

	fn notify(&self, key: &str, value: &V) {
		let listeners = self.listeners.read().clone();
		for listener in listeners {
			listener(key, value);
		}
	}
}

/// Removes a load's in-flight entry when the load completes or is dropped.
struct LoadEntry<'a> {
	loads: &'a InFlightLoads,
	key: &'a str,
	id: u64,
}

impl Drop for LoadEntry<'_> {
	fn drop(&mut self) {
		let mut loads = self.loads.lock();
		if loads.get(self.key).is_some_and(|(id, _)| *id == self.id) {
			loads.remove(self.key);
		}
	}
}

impl<V> ChangeObserver<V> for Binding<V>
where
	V: Clone + Send + Sync + 'static,
{
	/// Mirror the new key, then flush and load on a spawned task.
	///
	/// The key flushed is the one this binding had active, which is `old`
	/// unless the binding was also switched through
	/// [`switch_key`](Binding::switch_key). A change to the key the binding
	/// already has does nothing.
	///
	/// # Panics
	///
	/// Panics when called outside a Tokio runtime.
	fn key_changed(&self, old: Option<&str>, new: Option<&str>) {
		let new = new.map(str::to_string);
		let Some(previous) = self.replace_key(new.clone()) else {
			return;
		};
		if previous.as_deref() != old {
			debug!(?previous, ?old, "key source out of step with binding");
		}

		let binding = self.clone();
		tokio::spawn(async move {
			binding
				.on_key_changed(previous.as_deref(), new.as_deref())
				.await;
		});
	}

	fn value_changed(&self, value: &V) {
		self.on_value_changed(value);
	}
}
