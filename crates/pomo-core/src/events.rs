use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::Settings;
use crate::timer::Phase;

/// Every state change the orchestrator makes produces an Event.
/// Front ends print or forward them; nothing in the core consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PhaseStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PhasePaused {
        phase: Phase,
        remaining_secs: u64,
        /// Focus seconds credited to today's stats by this pause.
        partial_focus_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        completed: Phase,
        next: Phase,
        completed_work_phases: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    SettingsUpdated {
        settings: Settings,
        /// Whether the stopped timer was reset to the new work length.
        timer_reset: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        phase_label: String,
        remaining_secs: u64,
        formatted_remaining: String,
        running: bool,
        completed_work_phases: u32,
        completed_sessions: u64,
        total_focus_secs: u64,
        at: DateTime<Utc>,
    },
}
