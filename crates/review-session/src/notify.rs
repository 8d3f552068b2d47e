//! Transient confirmation toasts.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// Active toasts, each removed by its own timer after [`TOAST_DURATION`].
///
/// Dropping the set cancels pending timers.
#[derive(Debug, Default)]
pub struct Notifications {
    active: Arc<Mutex<Vec<Toast>>>,
    timers: Vec<JoinHandle<()>>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`. Outside a Tokio runtime the toast stays until dismissed.
    pub fn push(&mut self, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        lock(&self.active).push(Toast {
            id,
            message: message.into(),
        });

        self.timers.retain(|timer| !timer.is_finished());
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let active = Arc::clone(&self.active);
                self.timers.push(handle.spawn(async move {
                    tokio::time::sleep(TOAST_DURATION).await;
                    lock(&active).retain(|toast| toast.id != id);
                }));
            }
            Err(_) => tracing::warn!(id, "no runtime available, toast will not auto-dismiss"),
        }
        id
    }

    pub fn dismiss(&self, id: u64) {
        lock(&self.active).retain(|toast| toast.id != id);
    }

    pub fn active(&self) -> Vec<Toast> {
        lock(&self.active).clone()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.active).is_empty()
    }
}

impl Drop for Notifications {
    fn drop(&mut self) {
        for timer in &self.timers {
            timer.abort();
        }
    }
}

fn lock(toasts: &Mutex<Vec<Toast>>) -> MutexGuard<'_, Vec<Toast>> {
    toasts.lock().unwrap_or_else(PoisonError::into_inner)
}
