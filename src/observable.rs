// SPDX-License-Identifier: MPL-2.0
//! A value holder that notifies listeners when its value changes.
//!
//! Listeners run synchronously inside [`Observable::set`], after the new value
//! is visible through [`Observable::get`]. Setting a value equal to the
//! current one does not notify.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

pub struct Observable<T> {
    value: Mutex<T>,
    listeners: Mutex<Vec<(Subscription, Listener<T>)>>,
    next_id: AtomicU64,
}

impl<T: Clone + PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn get(&self) -> T {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the value. Returns `true` if it changed and listeners were notified.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.value.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == value {
                return false;
            }
            *current = value.clone();
        }

        // Snapshot so listeners may subscribe or unsubscribe while being called.
        let listeners: Vec<Listener<T>> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&value);
        }
        true
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = Subscription(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != subscription);
        listeners.len() != before
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.get())
            .finish_non_exhaustive()
    }
}
