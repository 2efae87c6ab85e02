//! Wires the session timer to stats, notifications and the display.
//!
//! The orchestrator owns the one [`SessionTimer`] and the current settings
//! and stats values. Front ends call `on_second()` once per elapsed second
//! while running and `refresh()` as often as they like.

use crate::clock::Clock;
use crate::events::Event;
use crate::notify::Notifier;
use crate::storage::{
    format_focus_time, DailyStats, KvStore, RawSettings, Settings, SettingsStore, StatsStore,
};
use crate::timer::{Phase, SessionTimer};
use crate::ui::{page_title, UiSink};

pub struct Orchestrator<K, C, N, U> {
    timer: SessionTimer,
    settings: Settings,
    stats: DailyStats,
    settings_store: SettingsStore<K>,
    stats_store: StatsStore<K, C>,
    clock: C,
    notifier: N,
    ui: U,
}

impl<K, C, N, U> Orchestrator<K, C, N, U>
where
    K: KvStore + Clone,
    C: Clock + Clone,
    N: Notifier,
    U: UiSink,
{
    /// Load settings and today's stats from `kv` and show the initial state.
    pub fn new(kv: K, clock: C, notifier: N, ui: U) -> Self {
        let settings_store = SettingsStore::new(kv.clone());
        let stats_store = StatsStore::new(kv, clock.clone());
        let settings = settings_store.load();
        let stats = stats_store.load();
        let timer = SessionTimer::new(&settings);

        let mut this = Self {
            timer,
            settings,
            stats,
            settings_store,
            stats_store,
            clock,
            notifier,
            ui,
        };
        this.ui.set_running(false);
        this.refresh();
        this
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn stats(&self) -> DailyStats {
        self.stats
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.timer.phase(),
            phase_label: self.timer.current_phase_label().to_string(),
            remaining_secs: self.timer.remaining_secs(),
            formatted_remaining: self.timer.formatted_remaining(),
            running: self.timer.is_running(),
            completed_work_phases: self.timer.completed_work_phases(),
            completed_sessions: self.stats.completed_sessions,
            total_focus_secs: self.stats.total_focus_secs,
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let now = self.clock.now();
        if !self.timer.start(now) {
            return None;
        }
        tracing::debug!(phase = ?self.timer.phase(), remaining = self.timer.remaining_secs(), "timer started");
        self.ui.set_running(true);
        self.refresh();
        Some(Event::PhaseStarted {
            phase: self.timer.phase(),
            remaining_secs: self.timer.remaining_secs(),
            at: now,
        })
    }

    /// Stop the countdown, crediting partial focus time of a work phase.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.timer.is_running() {
            return None;
        }
        let partial = self.timer.pause().unwrap_or(0);
        self.credit_partial_focus(partial);
        self.ui.set_running(false);
        self.refresh();
        Some(Event::PhasePaused {
            phase: self.timer.phase(),
            remaining_secs: self.timer.remaining_secs(),
            partial_focus_secs: partial,
            at: self.clock.now(),
        })
    }

    /// Back to the first work phase. Partial focus is discarded.
    pub fn reset(&mut self) -> Event {
        if let Some(discarded) = self.timer.reset() {
            tracing::debug!(discarded, "reset dropped partial focus");
        }
        self.ui.set_running(false);
        self.refresh();
        Event::TimerReset {
            at: self.clock.now(),
        }
    }

    /// One elapsed second.
    pub fn on_second(&mut self) -> Option<Event> {
        let done = self.timer.tick()?;

        if done.completed == Phase::Work {
            self.roll_over_day();
            self.stats = StatsStore::<K, C>::record_completed_session(
                &self.stats,
                self.settings.work_minutes,
            );
            self.save_stats();
        }

        let title = done.completed.completion_title();
        self.notifier.notify_phase_complete(
            title,
            done.completed.completion_body(),
            self.settings.sound_enabled,
            self.settings.notifications_enabled,
        );
        self.ui.show_banner(title);
        self.ui.set_running(false);
        self.refresh();

        Some(Event::PhaseCompleted {
            completed: done.completed,
            next: done.next,
            completed_work_phases: done.completed_work_phases,
            at: self.clock.now(),
        })
    }

    /// Validate and apply a settings submission, then persist it.
    pub fn update_settings(&mut self, raw: &RawSettings) -> Event {
        let validated = raw.validate();
        if !self.settings.notifications_enabled && validated.notifications_enabled {
            self.notifier.request_permission();
        }
        self.settings = validated;
        let timer_reset = self.timer.reconfigure(&validated);
        self.settings_store.save(&validated);
        self.refresh();
        Event::SettingsUpdated {
            settings: validated,
            timer_reset,
            at: self.clock.now(),
        }
    }

    /// Push the current state to the display. Does not touch the timer.
    pub fn refresh(&mut self) {
        self.roll_over_day();
        let time = self.timer.formatted_remaining();
        let label = self.timer.current_phase_label();
        self.ui.render_timer(&time, label, self.timer.is_running());
        self.ui.set_title(&page_title(&time, label));
        self.ui.render_stats(
            self.stats.completed_sessions,
            &format_focus_time(self.stats.total_focus_secs),
        );
    }

    /// Persist settings and stats ahead of process exit.
    pub fn shutdown(&mut self) {
        self.settings_store.save(&self.settings);
        self.save_stats();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn credit_partial_focus(&mut self, secs: u64) {
        if secs == 0 {
            return;
        }
        self.roll_over_day();
        self.stats = StatsStore::<K, C>::record_partial_focus(&self.stats, secs);
        self.save_stats();
    }

    /// `save` stamps today, so yesterday's counters must be dropped first.
    fn save_stats(&mut self) {
        self.roll_over_day();
        self.stats_store.save(&self.stats);
    }

    /// Stats loaded yesterday must not absorb credit earned after midnight.
    fn roll_over_day(&mut self) {
        let today = self.clock.today();
        if self.stats.date != today {
            tracing::info!(previous = %self.stats.date, %today, "day changed, resetting daily stats");
            self.stats = DailyStats::empty(today);
        }
    }
}
