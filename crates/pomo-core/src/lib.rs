//! # pomo Core Library
//!
//! Core logic for the pomo Pomodoro timer: a work/break session state
//! machine, user settings and daily statistics persisted to a local
//! key-value store, and the orchestration that ties them to notifications
//! and a display. Front ends (the `pomo` CLI) are thin adapters over this
//! crate.
//!
//! ## Architecture
//!
//! - **Timer**: a tick-driven state machine. The caller delivers one
//!   `tick()` per elapsed second while running.
//! - **Storage**: a [`KvStore`] abstraction (SQLite or in-memory) holding
//!   the settings and stats records, plus TOML-based [`Config`].
//! - **Capabilities**: [`Notifier`] and [`UiSink`] are injected, so the
//!   core has no platform side effects of its own.
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: phase state machine
//! - [`SettingsStore`] / [`StatsStore`]: validation and persistence
//! - [`Orchestrator`]: wires ticks to stats, notifications and display

pub mod clock;
pub mod error;
pub mod events;
pub mod notify;
pub mod orchestrator;
pub mod storage;
pub mod timer;
pub mod ui;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, Result, StorageError};
pub use events::Event;
pub use notify::{Notifier, SilentNotifier};
pub use orchestrator::Orchestrator;
pub use storage::{
    format_focus_time, Config, DailyStats, KvStore, MemoryKv, RawSettings, Settings,
    SettingsStore, SqliteKv, StatsStore,
};
pub use timer::{Durations, Phase, PhaseCompletion, SessionState, SessionTimer};
pub use ui::{page_title, NullUi, UiSink};
