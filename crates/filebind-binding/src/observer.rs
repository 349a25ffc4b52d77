//! Change notification between the binding layer and the engine.
//!
//! Whatever tracks the "current key" (a UI selection, a router, a test)
//! reports changes through [`ChangeObserver`]. [`KeySignal`] is a minimal
//! synchronous source of key changes for callers without a reactive layer.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Receives key and value change events.
///
/// Events are delivered synchronously and in the order the mutations happen.
pub trait ChangeObserver<V>: Send + Sync {
	/// The active key changed from `old` to `new`.
	fn key_changed(&self, old: Option<&str>, new: Option<&str>);

	/// The value bound to the active key changed.
	fn value_changed(&self, value: &V);
}

/// Receiver function type for key changes
pub type KeyReceiverFn = Arc<dyn Fn(Option<&str>, Option<&str>) + Send + Sync>;

/// Holds the active key and notifies connected receivers when it changes.
///
/// # Examples
///
/// ```
/// use filebind_binding::KeySignal;
/// use std::sync::{Arc, Mutex};
///
/// let signal = KeySignal::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// signal.connect({
///     let seen = Arc::clone(&seen);
///     move |old: Option<&str>, new: Option<&str>| {
///         seen.lock().unwrap().push((old.map(String::from), new.map(String::from)));
///     }
/// });
///
/// signal.set(Some("a.txt"));
/// signal.set(Some("a.txt")); // unchanged, not delivered
/// signal.set(None::<&str>);
///
/// assert_eq!(seen.lock().unwrap().len(), 2);
/// ```
#[derive(Default)]
pub struct KeySignal {
	current: RwLock<Option<String>>,
	receivers: RwLock<Vec<KeyReceiverFn>>,
}

impl fmt::Debug for KeySignal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("KeySignal")
			.field("current", &*self.current.read())
			.field("receivers", &self.receivers.read().len())
			.finish()
	}
}

impl KeySignal {
	/// Create a signal with no active key.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a signal with `key` already active.
	pub fn with_key(key: impl Into<String>) -> Self {
		Self {
			current: RwLock::new(Some(key.into())),
			receivers: RwLock::new(Vec::new()),
		}
	}

	/// The active key.
	pub fn get(&self) -> Option<String> {
		self.current.read().clone()
	}

	/// Change the active key.
	///
	/// Receivers run before this returns, in connection order. Setting the key
	/// it already has delivers nothing. Returns whether the key changed.
	pub fn set<K: Into<String>>(&self, key: Option<K>) -> bool {
		let new = key.map(Into::into);
		let old = {
			let mut current = self.current.write();
			if *current == new {
				return false;
			}
			std::mem::replace(&mut *current, new.clone())
		};

		// Receivers may connect more receivers; dispatch from a snapshot.
		let receivers = self.receivers.read().clone();
		for receiver in receivers {
			receiver(old.as_deref(), new.as_deref());
		}
		true
	}

	/// Connect a receiver for future key changes.
	pub fn connect<F>(&self, receiver: F)
	where
		F: Fn(Option<&str>, Option<&str>) + Send + Sync + 'static,
	{
		self.receivers.write().push(Arc::new(receiver));
	}

	/// Connect `observer` and immediately report the active key to it as a
	/// change from no key.
	pub fn observe<V: 'static>(&self, observer: Arc<dyn ChangeObserver<V>>) {
		let current = self.get();
		if current.is_some() {
			observer.key_changed(None, current.as_deref());
		}
		self.connect(move |old, new| observer.key_changed(old, new));
	}

	/// Number of connected receivers.
	pub fn receivers_count(&self) -> usize {
		self.receivers.read().len()
	}
}
