//! Session timer state machine.
//!
//! The timer does not own a clock or a thread. The caller delivers one
//! `tick()` per elapsed second while the timer is running and passes the
//! current instant to `start()`.
//!
//! ## Phase cycle
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> Work -> LongBreak -> Work
//!                                      (every Nth work phase)
//! ```
//!
//! Every transition pauses the timer; the next phase begins only on an
//! explicit `start()`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::phase::{Durations, Phase};
use crate::storage::Settings;

/// Mutable state of the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    /// Seconds left in the current phase. Zero only inside `tick()`.
    pub remaining_secs: u64,
    /// Work phases finished since the last reset.
    pub completed_work_phases: u32,
    pub running: bool,
    /// When the timer was last started. Cleared on pause, reset and transition.
    pub phase_started_at: Option<DateTime<Utc>>,
    /// Ticks delivered since `phase_started_at`.
    #[serde(default)]
    pub focus_ticks: u64,
}

/// Reported by `tick()` when the current phase runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCompletion {
    /// The phase that just ended.
    pub completed: Phase,
    /// The phase now loaded (paused).
    pub next: Phase,
    pub completed_work_phases: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    durations: Durations,
    state: SessionState,
}

impl SessionTimer {
    /// A stopped timer at the start of a work phase.
    pub fn new(settings: &Settings) -> Self {
        let durations = Durations::from_settings(settings);
        Self {
            state: SessionState {
                phase: Phase::Work,
                remaining_secs: durations.phase_secs(Phase::Work),
                completed_work_phases: 0,
                running: false,
                phase_started_at: None,
                focus_ticks: 0,
            },
            durations,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.state.remaining_secs
    }

    pub fn completed_work_phases(&self) -> u32 {
        self.state.completed_work_phases
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn phase_started_at(&self) -> Option<DateTime<Utc>> {
        self.state.phase_started_at
    }

    /// Full length of the current phase under the current durations.
    pub fn total_secs(&self) -> u64 {
        self.durations.phase_secs(self.state.phase)
    }

    /// 0.0 .. 1.0 progress within the current phase.
    ///
    /// A shortened phase after a running reconfigure can leave more time
    /// remaining than the total; progress is clamped in that case.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (1.0 - self.state.remaining_secs as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted_remaining(&self) -> String {
        let minutes = self.state.remaining_secs / 60;
        let seconds = self.state.remaining_secs % 60;
        format!("{minutes:02}:{seconds:02}")
    }

    pub fn current_phase_label(&self) -> &'static str {
        self.state.phase.label()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down. Returns `false` if already running.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.state.running {
            return false;
        }
        self.state.running = true;
        self.state.phase_started_at = Some(now);
        self.state.focus_ticks = 0;
        true
    }

    /// Stop counting down.
    ///
    /// Returns the focus seconds elapsed since the last `start()` when a
    /// running work phase is paused. Returns `None` when not running or
    /// when a break is paused.
    pub fn pause(&mut self) -> Option<u64> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        let partial = match (self.state.phase, self.state.phase_started_at) {
            (Phase::Work, Some(_)) => Some(self.state.focus_ticks),
            _ => None,
        };
        self.state.phase_started_at = None;
        self.state.focus_ticks = 0;
        partial
    }

    /// Back to a stopped first work phase with the counter cleared.
    ///
    /// Returns the partial focus seconds of a running work phase, like
    /// `pause()`.
    pub fn reset(&mut self) -> Option<u64> {
        let partial = self.pause();
        self.state.phase = Phase::Work;
        self.state.remaining_secs = self.durations.phase_secs(Phase::Work);
        self.state.completed_work_phases = 0;
        self.state.phase_started_at = None;
        self.state.focus_ticks = 0;
        partial
    }

    /// Deliver one elapsed second. Ignored while stopped.
    pub fn tick(&mut self) -> Option<PhaseCompletion> {
        if !self.state.running {
            return None;
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        self.state.focus_ticks += 1;
        if self.state.remaining_secs > 0 {
            return None;
        }
        Some(self.complete_phase())
    }

    /// Apply new durations.
    ///
    /// A stopped timer is reset so the new work length shows immediately and
    /// `true` is returned. A running timer keeps its current remaining time;
    /// only later phases pick up the new durations.
    pub fn reconfigure(&mut self, settings: &Settings) -> bool {
        self.durations = Durations::from_settings(settings);
        if self.state.running {
            return false;
        }
        self.reset();
        true
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self) -> PhaseCompletion {
        let completed = self.state.phase;
        self.state.running = false;
        self.state.phase_started_at = None;
        self.state.focus_ticks = 0;

        let next = match completed {
            Phase::Work => {
                self.state.completed_work_phases += 1;
                let every = self.durations.long_break_interval();
                if self.state.completed_work_phases % every == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.state.phase = next;
        self.state.remaining_secs = self.durations.phase_secs(next);

        tracing::debug!(
            ?completed,
            ?next,
            completed_work_phases = self.state.completed_work_phases,
            "phase completed"
        );

        PhaseCompletion {
            completed,
            next,
            completed_work_phases: self.state.completed_work_phases,
        }
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    /// Run the current phase out, restarting first.
    fn finish_phase(timer: &mut SessionTimer) -> PhaseCompletion {
        timer.start(now());
        loop {
            if let Some(done) = timer.tick() {
                return done;
            }
        }
    }

    #[test]
    fn new_timer_is_stopped_at_work() {
        let timer = SessionTimer::default();
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), 1500);
        assert!(!timer.is_running());
        assert_eq!(timer.formatted_remaining(), "25:00");
        assert_eq!(timer.current_phase_label(), "Work Session");
    }

    #[test]
    fn start_is_idempotent() {
        let mut timer = SessionTimer::default();
        let first = now();
        assert!(timer.start(first));
        assert!(!timer.start(first + chrono::Duration::seconds(5)));
        assert_eq!(timer.phase_started_at(), Some(first));
    }

    #[test]
    fn tick_is_ignored_while_stopped() {
        let mut timer = SessionTimer::default();
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_secs(), 1500);
    }

    #[test]
    fn full_work_phase_completes_once() {
        let mut timer = SessionTimer::default();
        timer.start(now());
        let mut completions = Vec::new();
        for _ in 0..1500 {
            if let Some(done) = timer.tick() {
                completions.push(done);
            }
        }
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].completed, Phase::Work);
        assert_eq!(completions[0].next, Phase::ShortBreak);
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(timer.remaining_secs(), 300);
        assert!(!timer.is_running());
        assert!(timer.phase_started_at().is_none());
    }

    #[test]
    fn pause_mid_work_reports_partial_focus() {
        let mut timer = SessionTimer::default();
        timer.start(now());
        for _ in 0..10 {
            assert!(timer.tick().is_none());
        }
        assert_eq!(timer.pause(), Some(10));
        assert!(!timer.is_running());
        assert!(timer.phase_started_at().is_none());
        assert_eq!(timer.remaining_secs(), 1490);
    }

    #[test]
    fn pause_counts_only_since_last_start() {
        let mut timer = SessionTimer::default();
        timer.start(now());
        for _ in 0..10 {
            timer.tick();
        }
        assert_eq!(timer.pause(), Some(10));
        timer.start(now());
        for _ in 0..4 {
            timer.tick();
        }
        assert_eq!(timer.pause(), Some(4));
    }

    #[test]
    fn pause_when_stopped_is_noop() {
        let mut timer = SessionTimer::default();
        assert_eq!(timer.pause(), None);
    }

    #[test]
    fn pause_during_break_reports_nothing() {
        let mut timer = SessionTimer::default();
        finish_phase(&mut timer);
        timer.start(now());
        timer.tick();
        assert_eq!(timer.pause(), None);
        assert!(!timer.is_running());
    }

    #[test]
    fn fourth_work_phase_leads_to_long_break() {
        let mut timer = SessionTimer::default();
        let mut visited = Vec::new();
        for _ in 0..4 {
            let done = finish_phase(&mut timer);
            assert_eq!(done.completed, Phase::Work);
            visited.push(done.next);
            let back = finish_phase(&mut timer);
            assert_eq!(back.next, Phase::Work);
        }
        assert_eq!(
            visited,
            vec![Phase::ShortBreak, Phase::ShortBreak, Phase::ShortBreak, Phase::LongBreak]
        );
        assert_eq!(timer.completed_work_phases(), 4);
    }

    #[test]
    fn long_break_length_comes_from_settings() {
        let settings = Settings {
            sessions_until_long_break: 2,
            long_break_minutes: 20,
            ..Settings::default()
        };
        let mut timer = SessionTimer::new(&settings);
        finish_phase(&mut timer);
        finish_phase(&mut timer);
        finish_phase(&mut timer);
        assert_eq!(timer.phase(), Phase::LongBreak);
        assert_eq!(timer.remaining_secs(), 20 * 60);
    }

    #[test]
    fn reset_restores_first_work_phase() {
        let mut timer = SessionTimer::default();
        finish_phase(&mut timer);
        timer.start(now());
        timer.tick();
        timer.reset();
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), 1500);
        assert_eq!(timer.completed_work_phases(), 0);
        assert!(!timer.is_running());
        assert!(timer.phase_started_at().is_none());
    }

    #[test]
    fn reconfigure_while_stopped_resets_to_new_work_length() {
        let mut timer = SessionTimer::default();
        let settings = Settings {
            work_minutes: 50,
            ..Settings::default()
        };
        assert!(timer.reconfigure(&settings));
        assert_eq!(timer.remaining_secs(), 3000);
        assert_eq!(timer.formatted_remaining(), "50:00");
    }

    #[test]
    fn reconfigure_while_running_keeps_remaining_time() {
        let mut timer = SessionTimer::default();
        timer.start(now());
        for _ in 0..30 {
            timer.tick();
        }
        let settings = Settings {
            work_minutes: 50,
            break_minutes: 10,
            ..Settings::default()
        };
        assert!(!timer.reconfigure(&settings));
        assert_eq!(timer.remaining_secs(), 1470);
        assert!(timer.is_running());

        // The current phase is unaffected; the next one uses the new break.
        let done = loop {
            if let Some(done) = timer.tick() {
                break done;
            }
        };
        assert_eq!(done.next, Phase::ShortBreak);
        assert_eq!(timer.remaining_secs(), 600);

        timer.reset();
        assert_eq!(timer.remaining_secs(), 3000);
    }

    #[test]
    fn zero_long_break_interval_uses_default() {
        let settings = Settings {
            sessions_until_long_break: 0,
            ..Settings::default()
        };
        let mut timer = SessionTimer::new(&settings);
        for _ in 0..3 {
            finish_phase(&mut timer);
            assert_eq!(timer.phase(), Phase::ShortBreak);
            finish_phase(&mut timer);
        }
        finish_phase(&mut timer);
        assert_eq!(timer.phase(), Phase::LongBreak);
    }

    #[test]
    fn formatted_remaining_pads_both_fields() {
        let mut timer = SessionTimer::new(&Settings {
            work_minutes: 1,
            ..Settings::default()
        });
        timer.start(now());
        for _ in 0..55 {
            timer.tick();
        }
        assert_eq!(timer.formatted_remaining(), "00:05");
    }

    #[test]
    fn progress_tracks_elapsed_fraction() {
        let mut timer = SessionTimer::new(&Settings {
            work_minutes: 1,
            ..Settings::default()
        });
        assert_eq!(timer.progress(), 0.0);
        timer.start(now());
        for _ in 0..30 {
            timer.tick();
        }
        assert!((timer.progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn state_survives_json_roundtrip() {
        let mut timer = SessionTimer::default();
        finish_phase(&mut timer);
        let json = serde_json::to_string(&timer).unwrap();
        let parsed: SessionTimer = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.state(), timer.state());
        assert_eq!(parsed.durations(), timer.durations());
    }

    #[test]
    fn deserialized_zero_interval_does_not_panic() {
        let mut value = serde_json::to_value(SessionTimer::default()).unwrap();
        value["durations"]["sessions_until_long_break"] = 0.into();
        value["state"]["remaining_secs"] = 1.into();
        let mut timer: SessionTimer = serde_json::from_value(value).unwrap();

        timer.start(now());
        let done = timer.tick().unwrap();
        assert_eq!(done.completed, Phase::Work);
        assert_eq!(done.next, Phase::ShortBreak);
        assert_eq!(timer.durations().long_break_interval(), 4);
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (1u32..=3, 1u32..=3, 1u32..=3, 2u32..=10).prop_map(|(w, b, l, n)| Settings {
            work_minutes: w,
            break_minutes: b,
            long_break_minutes: l,
            sessions_until_long_break: n,
            ..Settings::default()
        })
    }

    proptest! {
        #[test]
        fn break_after_nth_work_phase_follows_interval(
            settings in arb_settings(),
            rounds in 1u32..=12,
        ) {
            let mut timer = SessionTimer::new(&settings);
            for n in 1..=rounds {
                let done = finish_phase(&mut timer);
                prop_assert_eq!(done.completed, Phase::Work);
                prop_assert_eq!(done.completed_work_phases, n);
                if n % settings.sessions_until_long_break == 0 {
                    prop_assert_eq!(timer.phase(), Phase::LongBreak);
                    prop_assert_eq!(timer.remaining_secs(), u64::from(settings.long_break_minutes) * 60);
                } else {
                    prop_assert_eq!(timer.phase(), Phase::ShortBreak);
                    prop_assert_eq!(timer.remaining_secs(), u64::from(settings.break_minutes) * 60);
                }
                let back = finish_phase(&mut timer);
                prop_assert_eq!(back.next, Phase::Work);
            }
        }

        #[test]
        fn reset_always_yields_stopped_work(
            settings in arb_settings(),
            ticks in 0usize..400,
            running in any::<bool>(),
        ) {
            let mut timer = SessionTimer::new(&settings);
            timer.start(Utc::now());
            for _ in 0..ticks {
                if timer.tick().is_some() {
                    timer.start(Utc::now());
                }
            }
            if !running {
                timer.pause();
            }
            timer.reset();
            prop_assert_eq!(timer.phase(), Phase::Work);
            prop_assert_eq!(timer.remaining_secs(), u64::from(settings.work_minutes) * 60);
            prop_assert_eq!(timer.completed_work_phases(), 0);
            prop_assert!(!timer.is_running());
        }

        #[test]
        fn remaining_is_never_observed_at_zero(settings in arb_settings(), ticks in 0usize..2000) {
            let mut timer = SessionTimer::new(&settings);
            timer.start(Utc::now());
            for _ in 0..ticks {
                timer.tick();
                prop_assert!(timer.remaining_secs() > 0);
                if !timer.is_running() {
                    timer.start(Utc::now());
                }
            }
        }
    }
}
