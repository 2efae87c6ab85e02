pub mod config;
pub mod run;
pub mod settings;
pub mod stats;

use pomo_core::{Config, SqliteKv};

/// Open the configured SQLite store.
pub fn open_store(config: &Config) -> pomo_core::Result<SqliteKv> {
    let path = config.db_path()?;
    tracing::debug!(path = %path.display(), "opening store");
    Ok(SqliteKv::open(path)?)
}
