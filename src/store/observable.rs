//! Observable value holder.
//!
//! The value lives in an [`ArcSwap`], so readers always see a complete value
//! and replacement is a single pointer swap. Writers (`set`, `update`,
//! `subscribe`) are serialized by a mutex, which keeps every subscriber's view
//! of the update sequence in the order values were set.
//!
//! Callbacks run on the writer's thread after the swap. A callback must not
//! call `set`, `update` or `subscribe` on the store that is notifying it;
//! `get` and dropping a [`Subscription`] are fine.

use arc_swap::ArcSwap;
use parking_lot::{Mutex, RwLock};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A value that notifies subscribers on every replacement.
pub struct Observable<T> {
    value: ArcSwap<T>,
    subscribers: RwLock<Vec<(u64, Callback<T>)>>,
    write: Mutex<()>,
    next_id: AtomicU64,
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: ArcSwap::from_pointee(initial),
            subscribers: RwLock::new(Vec::new()),
            write: Mutex::new(()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Latest value.
    pub fn get(&self) -> Arc<T> {
        self.value.load_full()
    }

    /// Replace the value and notify subscribers in subscription order.
    pub fn set(&self, value: T) {
        let _guard = self.write.lock();
        self.value.store(Arc::new(value));
        self.notify();
    }

    /// Replace the value with one derived from the current value.
    #[allow(dead_code)]
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let _guard = self.write.lock();
        let current = self.value.load_full();
        self.value.store(Arc::new(f(current.as_ref())));
        self.notify();
    }

    /// Register `callback`, call it with the current value, then again after
    /// every replacement until the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<'_, T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let _guard = self.write.lock();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let callback: Callback<T> = Arc::new(callback);
        self.subscribers.write().push((id, Arc::clone(&callback)));
        callback(self.value.load_full().as_ref());
        Subscription { store: self, id }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    fn unsubscribe(&self, id: u64) {
        self.subscribers.write().retain(|(sub_id, _)| *sub_id != id);
    }

    /// Call every subscriber with the current value.
    ///
    /// Callbacks are snapshotted first so they may unsubscribe themselves.
    fn notify(&self) {
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        let value = self.value.load_full();
        for callback in callbacks {
            callback(value.as_ref());
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Registration handle; dropping it detaches the callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription<'a, T> {
    store: &'a Observable<T>,
    id: u64,
}

impl<T> Subscription<'_, T> {
    /// Detach the callback now rather than at end of scope.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<T> Drop for Subscription<'_, T> {
    fn drop(&mut self) {
        self.store.unsubscribe(self.id);
    }
}
