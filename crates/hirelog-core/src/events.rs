use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notification::NotificationState;

/// Every notification state change produces an Event.
/// The CLI prints them; async consumers receive snapshots over a watch channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    NotificationOpened {
        message: String,
        /// Deadline armed by this open call (ms since epoch).
        dismiss_at_epoch_ms: u64,
        at: DateTime<Utc>,
    },
    NotificationClosed {
        /// True when an armed deadline fired the close, false for a manual call.
        auto: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: NotificationState,
        message: String,
        /// Deadlines armed but not yet fired.
        pending_timers: usize,
        at: DateTime<Utc>,
    },
}
