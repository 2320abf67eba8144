//! # Hirelog Core Library
//!
//! This library provides the core logic for Hirelog, a job-interview
//! tracker. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary; any GUI would be a thin layer over
//! the same core library.
//!
//! ## Architecture
//!
//! - **Notification Center**: A wall-clock-based state machine for transient
//!   toasts that requires the caller to periodically invoke `tick()`, plus a
//!   Tokio-backed `Notifier` that schedules the deferred closes itself
//! - **Interview Records**: Record types, validation, and SQLite persistence
//! - **Storage**: SQLite-based record storage and TOML-based configuration
//! - **Phone Mask**: The `(XXX) XXX-XXXX` input formatter
//!
//! ## Key Components
//!
//! - [`NotificationCenter`]: Core toast state machine
//! - [`Notifier`]: Async auto-dismiss handle
//! - [`Database`]: Interview and statistics persistence
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod interview;
pub mod notification;
pub mod phone;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use events::Event;
pub use interview::{Interview, Outcome, Stage};
pub use notification::{
    NotificationCenter, NotificationSnapshot, NotificationState, Notifier,
    DEFAULT_DISMISS_AFTER_MS,
};
pub use phone::{format_phone, PhoneInput};
pub use storage::{Config, Database, OutcomeStats};
