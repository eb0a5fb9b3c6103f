use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

/// Single-value conflating channel: a new value replaces whatever is still pending.
///
/// Behaves like a capacity-1 channel that overwrites instead of blocking the sender. Any number
/// of producers may call [`LatestSlot::put`]; one consumer awaits [`LatestSlot::take`].
#[derive(Debug)]
pub struct LatestSlot<T> {
    value: Mutex<Option<T>>,
    notify: Notify,
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
            notify: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<T>> {
        // A panicking producer cannot leave the Option half-written.
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `value` and wake the consumer. Returns the pending value it superseded, if any.
    pub fn put(&self, value: T) -> Option<T> {
        let superseded = self.lock().replace(value);
        self.notify.notify_one();
        superseded
    }

    pub fn try_take(&self) -> Option<T> {
        self.lock().take()
    }

    /// Wait until a value is pending and take it.
    pub async fn take(&self) -> T {
        loop {
            if let Some(value) = self.try_take() {
                return value;
            }
            self.notify.notified().await;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dispatch/slot.rs"]
mod tests;
