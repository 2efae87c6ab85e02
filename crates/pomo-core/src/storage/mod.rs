mod config;
pub mod kv;
pub mod settings;
pub mod stats;

pub use config::{Config, DisplayConfig, LoggingConfig, StorageConfig};
pub use kv::{KvStore, MemoryKv, SqliteKv};
pub use settings::{RawSettings, Settings, SettingsStore, SETTINGS_KEY};
pub use stats::{format_focus_time, DailyStats, StatsStore, STATS_KEY};

use std::path::PathBuf;

/// Returns the pomo data directory, creating it if needed.
///
/// `POMO_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/pomo/`, or `~/.config/pomo-dev/` when `POMO_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("POMO_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomo-dev")
            } else {
                base_dir.join("pomo")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
