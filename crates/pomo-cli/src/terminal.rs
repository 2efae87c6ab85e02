//! Terminal adapters for the core's display and notification capabilities.
//!
//! Everything goes to stderr so stdout stays clean for `--json` output.

use std::io::{self, IsTerminal, Write};

use pomo_core::{Notifier, UiSink};

/// Redraws one status line in place.
pub struct TerminalUi {
    enabled: bool,
    title_escapes: bool,
    time: String,
    label: String,
    running: bool,
    stats: String,
    last_line: String,
}

impl TerminalUi {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            title_escapes: enabled && io::stderr().is_terminal(),
            time: String::new(),
            label: String::new(),
            running: false,
            stats: String::new(),
            last_line: String::new(),
        }
    }

    /// The status line for the current fields.
    pub fn line(&self) -> String {
        let state = if self.running { "running" } else { "paused" };
        format!(
            "{}  {:<12}  [{state}]  today: {}",
            self.time, self.label, self.stats
        )
    }

    fn redraw(&mut self) {
        if !self.enabled {
            return;
        }
        let line = self.line();
        if line == self.last_line {
            return;
        }
        let mut err = io::stderr().lock();
        let _ = write!(err, "\r\x1b[2K{line}");
        let _ = err.flush();
        self.last_line = line;
    }

    /// Move off the status line before other output.
    pub fn finish(&mut self) {
        if self.enabled && !self.last_line.is_empty() {
            let _ = writeln!(io::stderr());
            self.last_line.clear();
        }
    }
}

impl UiSink for TerminalUi {
    fn render_timer(&mut self, formatted_time: &str, phase_label: &str, running: bool) {
        self.time = formatted_time.to_string();
        self.label = phase_label.to_string();
        self.running = running;
        self.redraw();
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn render_stats(&mut self, completed_sessions: u64, formatted_focus_time: &str) {
        let noun = if completed_sessions == 1 { "session" } else { "sessions" };
        self.stats = format!("{completed_sessions} {noun}, {formatted_focus_time}");
        self.redraw();
    }

    fn set_title(&mut self, title: &str) {
        if self.title_escapes {
            let _ = write!(io::stderr(), "\x1b]0;{title}\x07");
        }
    }

    fn show_banner(&mut self, title: &str) {
        if self.enabled {
            self.finish();
            let _ = writeln!(io::stderr(), "== {title} ==");
        }
    }
}

/// Terminal bell for sound, a stderr line for notifications.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify_phase_complete(
        &mut self,
        title: &str,
        body: &str,
        sound_enabled: bool,
        notifications_enabled: bool,
    ) {
        let mut err = io::stderr().lock();
        if sound_enabled {
            let _ = write!(err, "\x07");
        }
        if notifications_enabled {
            let _ = writeln!(err, "{title} {body}");
        }
        let _ = err.flush();
    }

    fn request_permission(&mut self) {
        tracing::debug!("terminal notifications need no permission");
    }
}
