//! Transient notification (toast) support.
//!
//! Two layers share the same state machine:
//!
//! - [`NotificationCenter`] -- a wall-clock state machine. The caller drives
//!   `tick()` periodically and armed deadlines fire in arming order.
//! - [`Notifier`] -- a Tokio-backed wrapper that schedules the deferred close
//!   for each `open()` and publishes state snapshots over a watch channel.

pub mod center;
pub mod notifier;

pub use center::{NotificationCenter, NotificationState, DEFAULT_DISMISS_AFTER_MS};
pub use notifier::{NotificationSnapshot, Notifier};
