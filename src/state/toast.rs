//! Transient notification queue with auto-dismiss timers.
//!
//! DESIGN
//! ======
//! Toasts live in an append-only `Vec` behind `Arc<Mutex<..>>` so views and
//! the login flow can share one queue handle. Each push spawns a tokio timer
//! that holds only a `Weak` reference to the queue.
//!
//! Timers are scoped to their item: dismissing a toast early aborts its
//! timer, and dropping the last queue handle aborts every outstanding timer,
//! so no callback ever fires against a removed item.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::TOAST_DISMISS_AFTER;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub title: String,
    pub message: Option<String>,
}

#[derive(Default)]
struct ToastInner {
    items: Vec<Toast>,
    timers: HashMap<Uuid, JoinHandle<()>>,
}

impl Drop for ToastInner {
    fn drop(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
    }
}

#[derive(Clone)]
pub struct ToastQueue {
    inner: Arc<Mutex<ToastInner>>,
    dismiss_after: Duration,
}

impl std::fmt::Debug for ToastQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastQueue")
            .field("len", &self.len())
            .field("dismiss_after", &self.dismiss_after)
            .finish()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::with_dismiss_after(TOAST_DISMISS_AFTER)
    }

    #[must_use]
    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        Self { inner: Arc::new(Mutex::new(ToastInner::default())), dismiss_after }
    }

    /// Append a toast and schedule its dismissal. Returns the toast's ID.
    ///
    /// Outside a tokio runtime the toast stays until dismissed explicitly.
    pub fn push(&self, kind: ToastKind, title: impl Into<String>, message: Option<String>) -> Uuid {
        let toast = Toast { id: Uuid::new_v4(), kind, title: title.into(), message };
        let id = toast.id;

        let mut inner = self.lock();
        inner.items.push(toast);

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let weak = Arc::downgrade(&self.inner);
            let delay = self.dismiss_after;
            let timer = handle.spawn(async move {
                tokio::time::sleep(delay).await;
                expire(&weak, id);
            });
            inner.timers.insert(id, timer);
        } else {
            tracing::debug!(%id, "no tokio runtime; toast will not auto-dismiss");
        }
        id
    }

    /// Remove a toast before its timer fires and cancel the timer.
    pub fn dismiss(&self, id: Uuid) {
        let mut inner = self.lock();
        inner.items.retain(|t| t.id != id);
        if let Some(timer) = inner.timers.remove(&id) {
            timer.abort();
        }
    }

    /// Remove every toast and cancel every timer.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.items.clear();
        for (_, timer) in inner.timers.drain() {
            timer.abort();
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        self.lock().items.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of timers still scheduled.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.lock().timers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ToastInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn expire(weak: &Weak<Mutex<ToastInner>>, id: Uuid) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
    inner.items.retain(|t| t.id != id);
    inner.timers.remove(&id);
}

#[cfg(test)]
#[path = "toast_test.rs"]
mod tests;
