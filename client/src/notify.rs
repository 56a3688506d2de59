//! User-facing notifications

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn success(&self, message: &str) {
        self.notify(Toast {
            kind: ToastKind::Success,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Toast {
            kind: ToastKind::Error,
            message: message.to_string(),
        });
    }

    fn info(&self, message: &str) {
        self.notify(Toast {
            kind: ToastKind::Info,
            message: message.to_string(),
        });
    }
}

/// Writes notifications to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => warn!(target: "station_client::toast", "{}", toast.message),
            _ => info!(target: "station_client::toast", "{}", toast.message),
        }
    }
}

/// Keeps the most recent notifications, newest first
#[derive(Debug)]
pub struct ToastLog {
    toasts: Mutex<VecDeque<Toast>>,
    capacity: usize,
}

impl ToastLog {
    pub const DEFAULT_CAPACITY: usize = 20;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            toasts: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn latest(&self) -> Option<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .front()
            .cloned()
    }

    pub fn clear(&self) {
        self.toasts.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Default for ToastLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        TracingNotifier.notify(toast.clone());
        let mut toasts = self.toasts.lock().unwrap_or_else(|e| e.into_inner());
        toasts.push_front(toast);
        toasts.truncate(self.capacity);
    }
}
