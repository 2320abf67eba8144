mod config;
pub mod database;

pub use config::{Config, NotificationsConfig, SessionConfig};
pub use database::{Database, OutcomeStats};

use std::path::PathBuf;

/// Returns the hirelog data directory.
///
/// Resolution order:
/// - `HIRELOG_DATA_DIR` -- explicit override (tests, portable installs)
/// - `~/.config/hirelog-dev/` when `HIRELOG_ENV=dev`
/// - `~/.config/hirelog/` otherwise
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = if let Ok(dir) = std::env::var("HIRELOG_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("HIRELOG_ENV").unwrap_or_else(|_| "production".to_string());

        if env == "dev" {
            base_dir.join("hirelog-dev")
        } else {
            base_dir.join("hirelog")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
