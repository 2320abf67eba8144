//! Notification center implementation.
//!
//! The center is a wall-clock-based state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` periodically.
//!
//! ## State Transitions
//!
//! ```text
//! Closed -> Open    on open(message)
//! Open   -> Closed  on close()  (manual call or fired deadline)
//! ```
//!
//! `open()` arms exactly one new deadline per call and never cancels the
//! previous one: re-opening inside the dismiss window stacks deadlines, and
//! every fired deadline runs `close()`, which is idempotent.
//!
//! ## Usage
//!
//! ```ignore
//! let mut center = NotificationCenter::new();
//! center.open("Network error");
//! // In a loop:
//! center.tick(); // Returns Some(Event) when a deadline closes the toast
//! ```

use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::Event;

/// Fixed auto-dismiss delay in milliseconds.
pub const DEFAULT_DISMISS_AFTER_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationState {
    Closed,
    Open,
}

/// Core notification center.
///
/// Operates on wall-clock deadlines -- no internal thread.
/// The caller is responsible for calling `tick()` periodically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCenter {
    state: NotificationState,
    /// Only meaningful while `state` is `Open`.
    message: String,
    /// Auto-dismiss delay in milliseconds applied to newly armed deadlines.
    dismiss_after_ms: u64,
    /// Armed deadlines (ms since epoch), oldest first. Never cancelled.
    #[serde(default)]
    deadlines: VecDeque<u64>,
}

impl NotificationCenter {
    /// Create a closed center with the default dismiss delay.
    pub fn new() -> Self {
        Self::with_dismiss_after_ms(DEFAULT_DISMISS_AFTER_MS)
    }

    /// Create a closed center with a custom dismiss delay.
    pub fn with_dismiss_after_ms(dismiss_after_ms: u64) -> Self {
        Self {
            state: NotificationState::Closed,
            message: String::new(),
            dismiss_after_ms,
            deadlines: VecDeque::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> NotificationState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == NotificationState::Open
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn dismiss_after_ms(&self) -> u64 {
        self.dismiss_after_ms
    }

    /// Deadlines armed but not yet fired.
    pub fn pending_timers(&self) -> usize {
        self.deadlines.len()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            message: self.message.clone(),
            pending_timers: self.deadlines.len(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Open the notification with `message` and arm one auto-dismiss deadline.
    ///
    /// `message` may be any text, including empty. Deadlines already armed
    /// stay armed; there is no cancel-on-reopen.
    pub fn open(&mut self, message: impl Into<String>) -> Event {
        let deadline = now_ms().saturating_add(self.dismiss_after_ms);
        self.message = message.into();
        self.state = NotificationState::Open;
        self.deadlines.push_back(deadline);
        debug!(message = %self.message, deadline, "notification opened");
        Event::NotificationOpened {
            message: self.message.clone(),
            dismiss_at_epoch_ms: deadline,
            at: Utc::now(),
        }
    }

    /// Close the notification. Idempotent: closing an already-closed center
    /// is a no-op state-wise and returns `None`.
    pub fn close(&mut self) -> Option<Event> {
        self.close_internal(false)
    }

    /// Call periodically. Fires every deadline that is due, in arming order,
    /// and returns `Some(Event::NotificationClosed)` if one of them closed
    /// the toast.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Fire deadlines due at `now_epoch_ms`. Exposed so deterministic
    /// callers can drive time themselves.
    pub fn tick_at(&mut self, now_epoch_ms: u64) -> Option<Event> {
        let mut fired = false;
        while let Some(&deadline) = self.deadlines.front() {
            if deadline > now_epoch_ms {
                break;
            }
            self.deadlines.pop_front();
            fired = true;
        }
        if fired {
            debug!("auto-dismiss deadline fired");
            self.close_internal(true)
        } else {
            None
        }
    }

    /// Run the deferred close for the oldest armed deadline.
    ///
    /// This is the path a scheduled timer callback takes: it consumes its
    /// deadline and closes the toast. Safe to invoke any number of times;
    /// once the center is closed further calls only drain deadlines.
    pub fn fire_next(&mut self) -> Option<Event> {
        self.deadlines.pop_front();
        self.close_internal(true)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn close_internal(&mut self, auto: bool) -> Option<Event> {
        if self.state == NotificationState::Closed {
            return None;
        }
        self.state = NotificationState::Closed;
        debug!(auto, "notification closed");
        Some(Event::NotificationClosed {
            auto,
            at: Utc::now(),
        })
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
