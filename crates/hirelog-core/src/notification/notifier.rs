//! Tokio-backed auto-dismiss layer over [`NotificationCenter`].
//!
//! Each `open()` spawns one sleep task that runs the deferred close after
//! the dismiss delay. Armed timers are never revoked; a manual `close()`
//! leaves them running and they no-op when they fire.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

use super::center::{NotificationCenter, NotificationState, DEFAULT_DISMISS_AFTER_MS};
use crate::events::Event;

/// Point-in-time view of the center, published on every state change.
///
/// `watch::Receiver::borrow` is the `get()` of the observable contract and
/// `changed()` the `subscribe()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSnapshot {
    pub state: NotificationState,
    pub message: String,
    pub pending_timers: usize,
}

struct Inner {
    center: Mutex<NotificationCenter>,
    tx: watch::Sender<NotificationSnapshot>,
}

impl Inner {
    fn snapshot_of(center: &NotificationCenter) -> NotificationSnapshot {
        NotificationSnapshot {
            state: center.state(),
            message: center.message().to_string(),
            pending_timers: center.pending_timers(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NotificationCenter> {
        self.center.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, center: &NotificationCenter) {
        self.tx.send_replace(Self::snapshot_of(center));
    }
}

/// Async notification handle.
///
/// Owns the center behind a mutex; there is one logical mutator context and
/// the deferred closes run on the same Tokio runtime.
pub struct Notifier {
    inner: Arc<Inner>,
    dismiss_after: Duration,
}

impl Notifier {
    pub fn new(dismiss_after: Duration) -> Self {
        let center = NotificationCenter::with_dismiss_after_ms(dismiss_after.as_millis() as u64);
        let (tx, _rx) = watch::channel(Inner::snapshot_of(&center));
        Self {
            inner: Arc::new(Inner {
                center: Mutex::new(center),
                tx,
            }),
            dismiss_after,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        self.inner.lock().is_open()
    }

    pub fn message(&self) -> String {
        self.inner.lock().message().to_string()
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.lock().pending_timers()
    }

    /// Subscribe to state snapshots. The receiver immediately holds the
    /// current state; every `open()`/`close()` publishes a new one.
    pub fn watch(&self) -> watch::Receiver<NotificationSnapshot> {
        self.inner.tx.subscribe()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Open the notification and schedule its deferred close.
    ///
    /// Must be called from within a Tokio runtime: the deferred close is a
    /// spawned sleep task. Calling `open` again before an earlier task fires
    /// schedules an additional task; none are cancelled.
    pub fn open(&self, message: impl Into<String>) -> Event {
        let event = {
            let mut center = self.inner.lock();
            let event = center.open(message);
            self.inner.publish(&center);
            event
        };

        let inner = Arc::clone(&self.inner);
        let delay = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut center = inner.lock();
            if center.fire_next().is_some() {
                debug!("deferred close fired");
            }
            inner.publish(&center);
        });

        event
    }

    /// Close the notification now. Idempotent; armed timers keep running
    /// and no-op when they fire.
    pub fn close(&self) -> Option<Event> {
        let mut center = self.inner.lock();
        let event = center.close();
        if event.is_some() {
            self.inner.publish(&center);
        }
        event
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DISMISS_AFTER_MS))
    }
}
