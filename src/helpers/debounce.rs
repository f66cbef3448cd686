//! Debounced callbacks for search input
//!
//! A call schedules the callback after `delay`; a newer call inside the window
//! cancels the pending one, so only the last value is delivered.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Trailing-edge debouncer; must be used from within a tokio runtime
pub struct Debouncer<T> {
    delay: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(delay: Duration, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    /// Schedule `value`, replacing any value still waiting
    pub fn call(&self, value: T) {
        let callback = self.callback.clone();
        let delay = self.delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(value);
        });

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }

    /// Drop the pending value without delivering it
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(task) = pending.take() {
            task.abort();
        }
    }

    /// Whether a value is still waiting for its delay to elapse
    pub fn is_pending(&self) -> bool {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(task) = pending.take() {
                task.abort();
            }
        }
    }
}
