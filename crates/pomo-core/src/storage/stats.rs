//! Daily statistics with day-rollover reset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::kv::KvStore;
use crate::clock::Clock;
use crate::error::StorageError;

/// Key the stats record is stored under.
pub const STATS_KEY: &str = "pomodoro_stats";

/// Completed sessions and focus time for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: NaiveDate,
    pub completed_sessions: u64,
    #[serde(rename = "totalFocusSeconds")]
    pub total_focus_secs: u64,
}

impl DailyStats {
    /// A zeroed record for `date`.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            completed_sessions: 0,
            total_focus_secs: 0,
        }
    }
}

/// Loads and saves [`DailyStats`], stamping records with the clock's day.
pub struct StatsStore<S, C> {
    store: S,
    clock: C,
}

impl<S: KvStore, C: Clock> StatsStore<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Read today's stats.
    ///
    /// A record from an earlier (or later) day is replaced by a zeroed one,
    /// which is written back before returning.
    pub fn load(&self) -> DailyStats {
        let today = self.clock.today();
        let json = match self.store.get(STATS_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return DailyStats::empty(today),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stats, starting from zero");
                return DailyStats::empty(today);
            }
        };

        let Some(record) = serde_json::from_str::<Value>(&json)
            .ok()
            .filter(Value::is_object)
        else {
            tracing::warn!("stored stats are malformed, starting from zero");
            return DailyStats::empty(today);
        };

        let stored_date = record
            .get("date")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<NaiveDate>().ok());
        if stored_date != Some(today) {
            tracing::info!(?stored_date, %today, "new day, resetting daily stats");
            let fresh = DailyStats::empty(today);
            self.save(&fresh);
            return fresh;
        }

        let counter = |key: &str| record.get(key).and_then(Value::as_u64).unwrap_or(0);
        DailyStats {
            date: today,
            completed_sessions: counter("completedSessions"),
            total_focus_secs: counter("totalFocusSeconds"),
        }
    }

    /// Credit one completed work phase of `work_minutes`.
    pub fn record_completed_session(stats: &DailyStats, work_minutes: u32) -> DailyStats {
        DailyStats {
            completed_sessions: stats.completed_sessions.saturating_add(1),
            total_focus_secs: stats
                .total_focus_secs
                .saturating_add(u64::from(work_minutes) * 60),
            ..*stats
        }
    }

    /// Credit focus seconds from a work phase paused before it finished.
    pub fn record_partial_focus(stats: &DailyStats, secs: u64) -> DailyStats {
        DailyStats {
            total_focus_secs: stats.total_focus_secs.saturating_add(secs),
            ..*stats
        }
    }

    /// Persist stats stamped with today's date. Failures are logged and
    /// swallowed.
    pub fn save(&self, stats: &DailyStats) {
        let stamped = DailyStats {
            date: self.clock.today(),
            ..*stats
        };
        let result = serde_json::to_string(&stamped)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(STATS_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to save stats");
        }
    }
}

/// Focus time as `{hours}h {minutes}m`.
pub fn format_focus_time(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    format!("{hours}h {minutes}m")
}
