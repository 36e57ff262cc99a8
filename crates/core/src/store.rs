//! Process-wide observable state cells.
//!
//! A [`Store`] holds one value and notifies registered callbacks after
//! every change. It replaces the original client's global observable
//! stores: the holder is constructed once at startup and passed by
//! reference, so no singleton is involved.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Handle returned by [`Store::subscribe`]; pass it to
/// [`Store::unsubscribe`] to stop receiving notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A mutable state cell with subscriber notification on change.
pub struct Store<T> {
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    value: T,
    next_id: u64,
    subscribers: HashMap<u64, Callback<T>>,
}

impl<T: Clone> Store<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(Inner {
                value,
                next_id: 0,
                subscribers: HashMap::new(),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        let (snapshot, callbacks) = {
            let mut inner = self.lock();
            inner.value = value;
            (
                inner.value.clone(),
                inner.subscribers.values().cloned().collect::<Vec<_>>(),
            )
        };
        // Callbacks run outside the lock so they may re-enter the store.
        for callback in callbacks {
            callback(&snapshot);
        }
    }

    /// Apply `f` to the value in place, then notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let (snapshot, callbacks) = {
            let mut inner = self.lock();
            f(&mut inner.value);
            (
                inner.value.clone(),
                inner.subscribers.values().cloned().collect::<Vec<_>>(),
            )
        };
        for callback in callbacks {
            callback(&snapshot);
        }
    }

    /// Register a callback invoked with the new value after every change.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(id, Arc::new(callback));
        SubscriptionId(id)
    }

    /// Remove a subscription. Returns `true` if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().subscribers.remove(&id.0).is_some()
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
