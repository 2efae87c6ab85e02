use serde::{Deserialize, Serialize};

use crate::storage::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Display string for the phase.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "Work Session",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, Phase::Work)
    }

    /// Notification title shown when this phase ends.
    pub fn completion_title(self) -> &'static str {
        match self {
            Phase::Work => "Work Session Complete!",
            Phase::ShortBreak => "Break Time!",
            Phase::LongBreak => "Long Break Time!",
        }
    }

    /// Notification body shown when this phase ends.
    pub fn completion_body(self) -> &'static str {
        match self {
            Phase::Work => "Great job! Time for a break.",
            Phase::ShortBreak => "Break is over. Ready to focus?",
            Phase::LongBreak => "Refreshed? Let's get back to work!",
        }
    }
}

/// The four fields of [`Settings`] the timer cares about.
///
/// Zero values are replaced by the validated defaults, so a phase can never
/// be zero seconds long and the long-break modulus is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub long_break_minutes: u32,
    pub sessions_until_long_break: u32,
}

impl Durations {
    pub fn from_settings(settings: &Settings) -> Self {
        let defaults = Settings::default();
        let or_default = |value: u32, default: u32| if value == 0 { default } else { value };
        Self {
            work_minutes: or_default(settings.work_minutes, defaults.work_minutes),
            break_minutes: or_default(settings.break_minutes, defaults.break_minutes),
            long_break_minutes: or_default(settings.long_break_minutes, defaults.long_break_minutes),
            sessions_until_long_break: or_default(
                settings.sessions_until_long_break,
                defaults.sessions_until_long_break,
            ),
        }
    }

    /// Work phases per long break. A zero that bypassed `from_settings`
    /// (e.g. a deserialized timer) falls back to the default.
    pub fn long_break_interval(&self) -> u32 {
        match self.sessions_until_long_break {
            0 => Settings::default().sessions_until_long_break,
            n => n,
        }
    }

    /// Length of a phase in seconds.
    pub fn phase_secs(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Work => self.work_minutes,
            Phase::ShortBreak => self.break_minutes,
            Phase::LongBreak => self.long_break_minutes,
        };
        u64::from(minutes).saturating_mul(60)
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}
