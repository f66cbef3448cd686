//! UI Events
//!
//! Events emitted from the state layer to the front-end for notifications
//! and other user-facing feedback.

use crate::constants::TOAST_HISTORY_CAPACITY;
use crate::loaders::LoadStatus;
use std::collections::VecDeque;
use std::sync::Arc;

/// UI events for user feedback
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UIEvent {
    /// Display a toast notification
    Toast {
        /// Message to display
        message: Arc<str>,
        /// Whether this is an error (affects styling)
        is_error: bool,
    },

    /// Loading state changed
    LoadingChanged {
        /// Page collection, e.g. `characters`
        collection: &'static str,
        /// Whether loading
        loading: bool,
    },

    /// A page finished loading
    Loaded {
        collection: &'static str,
        status: LoadStatus,
        rows: usize,
    },
}

impl UIEvent {
    pub fn error_toast(message: impl Into<Arc<str>>) -> Self {
        UIEvent::Toast {
            message: message.into(),
            is_error: true,
        }
    }

    pub fn info_toast(message: impl Into<Arc<str>>) -> Self {
        UIEvent::Toast {
            message: message.into(),
            is_error: false,
        }
    }
}

/// A toast kept in history
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: Arc<str>,
    pub is_error: bool,
}

/// Most recent toasts, oldest dropped first
#[derive(Debug)]
pub struct ToastLog {
    toasts: VecDeque<Toast>,
    capacity: usize,
}

impl Default for ToastLog {
    fn default() -> Self {
        Self::new(TOAST_HISTORY_CAPACITY)
    }
}

impl ToastLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            toasts: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, toast: Toast) {
        if self.toasts.len() == self.capacity {
            self.toasts.pop_front();
        }
        self.toasts.push_back(toast);
    }

    /// Record the event if it is a toast; returns whether it was
    pub fn record(&mut self, event: &UIEvent) -> bool {
        match event {
            UIEvent::Toast { message, is_error } => {
                self.push(Toast {
                    message: message.clone(),
                    is_error: *is_error,
                });
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }
}
