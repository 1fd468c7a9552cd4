//! Toast notification state
//!
//! Toasts are keyed by [`ToastId`] and can be replaced in place, which is how
//! a loading toast turns into a success or error toast once the tracked
//! request settles. Every toast carries a dismissal signal that other tasks
//! can await (deferred navigation does).

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::watch;

/// Number of toast states kept for [`ToastManager::history`]
pub const HISTORY_LIMIT: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Loading,
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn settles(self) -> bool {
        !matches!(self, ToastLevel::Loading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Messages shown over the lifetime of a tracked request
#[derive(Debug, Clone, Copy)]
pub struct ToastMessages<'a> {
    pub loading: &'a str,
    pub success: &'a str,
    pub error: &'a str,
}

#[derive(Debug)]
struct ToastEntry {
    toast: Toast,
    dismissed: watch::Sender<bool>,
}

#[derive(Debug, Default)]
struct ToastState {
    next_id: u64,
    active: Vec<ToastEntry>,
    history: VecDeque<Toast>,
}

impl ToastState {
    fn record(&mut self, toast: Toast) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(toast);
    }
}

/// Shared toast manager handle
#[derive(Debug, Clone, Default)]
pub struct ToastManager {
    inner: Arc<Mutex<ToastState>>,
    auto_dismiss: Option<Duration>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settled toasts dismiss themselves after `duration`
    pub fn with_auto_dismiss(duration: Duration) -> Self {
        Self {
            inner: Arc::default(),
            auto_dismiss: Some(duration),
        }
    }

    pub fn loading(&self, message: impl Into<String>) -> ToastId {
        self.push(ToastLevel::Loading, message)
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.push(ToastLevel::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.push(ToastLevel::Error, message)
    }

    pub fn push(&self, level: ToastLevel, message: impl Into<String>) -> ToastId {
        let id = {
            let mut state = self.inner.lock();
            state.next_id += 1;
            let id = ToastId(state.next_id);
            let toast = Toast {
                id,
                level,
                message: message.into(),
                created_at: Utc::now(),
            };
            let (dismissed, _) = watch::channel(false);
            state.record(toast.clone());
            state.active.push(ToastEntry { toast, dismissed });
            id
        };

        if level.settles() {
            self.schedule_auto_dismiss(id);
        }
        id
    }

    /// Replace an active toast's level and message. Returns false when the
    /// toast was already dismissed.
    pub fn resolve(
        &self,
        id: ToastId,
        level: ToastLevel,
        message: impl Into<String>,
    ) -> bool {
        {
            let mut state = self.inner.lock();
            let Some(entry) = state.active.iter_mut().find(|e| e.toast.id == id)
            else {
                return false;
            };
            entry.toast.level = level;
            entry.toast.message = message.into();
            let snapshot = entry.toast.clone();
            state.record(snapshot);
        }

        if level.settles() {
            self.schedule_auto_dismiss(id);
        }
        true
    }

    pub fn dismiss(&self, id: ToastId) {
        let mut state = self.inner.lock();
        if let Some(pos) = state.active.iter().position(|e| e.toast.id == id) {
            let entry = state.active.remove(pos);
            entry.dismissed.send_replace(true);
            log::trace!("Dismissed {}", id);
        }
    }

    pub fn clear(&self) {
        let mut state = self.inner.lock();
        for entry in state.active.drain(..) {
            entry.dismissed.send_replace(true);
        }
    }

    pub fn is_active(&self, id: ToastId) -> bool {
        self.inner.lock().active.iter().any(|e| e.toast.id == id)
    }

    pub fn get(&self, id: ToastId) -> Option<Toast> {
        self.inner
            .lock()
            .active
            .iter()
            .find(|e| e.toast.id == id)
            .map(|e| e.toast.clone())
    }

    /// Currently visible toasts, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner
            .lock()
            .active
            .iter()
            .map(|e| e.toast.clone())
            .collect()
    }

    /// The last [`HISTORY_LIMIT`] states any toast has been shown in,
    /// oldest first
    pub fn history(&self) -> Vec<Toast> {
        self.inner.lock().history.iter().cloned().collect()
    }

    /// Resolves once the toast is dismissed (immediately if it is not active)
    pub fn dismissed(
        &self,
        id: ToastId,
    ) -> impl Future<Output = ()> + Send + use<> {
        let receiver = self
            .inner
            .lock()
            .active
            .iter()
            .find(|e| e.toast.id == id)
            .map(|e| e.dismissed.subscribe());

        async move {
            if let Some(mut receiver) = receiver {
                // A dropped sender also means the toast is gone
                let _ = receiver.wait_for(|dismissed| *dismissed).await;
            }
        }
    }

    /// Show a loading toast while `future` runs, then replace it with the
    /// success or error message
    pub async fn track<T, E, F>(
        &self,
        messages: ToastMessages<'_>,
        future: F,
    ) -> (ToastId, Result<T, E>)
    where
        F: Future<Output = Result<T, E>>,
    {
        let id = self.loading(messages.loading);
        let result = future.await;
        match &result {
            Ok(_) => self.resolve(id, ToastLevel::Success, messages.success),
            Err(_) => self.resolve(id, ToastLevel::Error, messages.error),
        };
        (id, result)
    }

    fn schedule_auto_dismiss(&self, id: ToastId) {
        let Some(duration) = self.auto_dismiss else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let manager = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(duration).await;
            manager.dismiss(id);
        });
    }
}
