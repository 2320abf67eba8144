//! Notification center commands for CLI.
//!
//! The center is persisted in the kv store between invocations so that
//! `notify open`, `notify status`, and `notify close` behave as one logical
//! session. `--wait` instead drives the async notifier live and prints each
//! state change until the toast auto-dismisses.

use std::time::Duration;

use clap::Subcommand;
use hirelog_core::error::CoreError;
use hirelog_core::notification::{NotificationCenter, NotificationState, Notifier};
use hirelog_core::storage::{Config, Database};

const CENTER_KEY: &str = "notification_center";

#[derive(Subcommand)]
pub enum NotifyAction {
    /// Open a notification (arms one auto-dismiss deadline)
    Open {
        /// Message to display; may be empty
        message: String,
        /// Block until the armed deadline fires
        #[arg(long)]
        wait: bool,
    },
    /// Print current notification state as JSON (fires due deadlines)
    Status,
    /// Close the notification
    Close,
}

fn load_center(db: &Database, dismiss_after_ms: u64) -> NotificationCenter {
    if let Ok(Some(json)) = db.kv_get(CENTER_KEY) {
        if let Ok(center) = serde_json::from_str::<NotificationCenter>(&json) {
            return center;
        }
    }
    NotificationCenter::with_dismiss_after_ms(dismiss_after_ms)
}

fn save_center(db: &Database, center: &NotificationCenter) -> Result<(), CoreError> {
    let json = serde_json::to_string(center)?;
    db.kv_set(CENTER_KEY, &json)?;
    Ok(())
}

fn run_wait(message: &str, dismiss_after_ms: u64) -> Result<(), CoreError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    rt.block_on(async {
        let notifier = Notifier::new(Duration::from_millis(dismiss_after_ms));
        let mut rx = notifier.watch();
        let event = notifier.open(message);
        println!("{}", serde_json::to_string_pretty(&event)?);

        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            if snapshot.state == NotificationState::Closed {
                break;
            }
        }
        Ok(())
    })
}

pub fn run(action: NotifyAction) -> Result<(), CoreError> {
    let config = Config::load_or_default();
    let dismiss_after_ms = config.notifications.dismiss_after_ms;

    if let NotifyAction::Open { message, wait: true } = &action {
        return run_wait(message, dismiss_after_ms);
    }

    let db = Database::open()?;
    let mut center = load_center(&db, dismiss_after_ms);

    match action {
        NotifyAction::Open { message, .. } => {
            let event = center.open(message);
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        NotifyAction::Status => {
            // Tick to fire deadlines that came due since the last invocation.
            let closed = center.tick();
            println!("{}", serde_json::to_string_pretty(&center.snapshot())?);
            if let Some(event) = closed {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
        }
        NotifyAction::Close => match center.close() {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("{}", serde_json::to_string_pretty(&center.snapshot())?),
        },
    }

    save_center(&db, &center)?;
    Ok(())
}
