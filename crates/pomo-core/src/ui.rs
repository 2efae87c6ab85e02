//! Presentation boundary.
//!
//! The core pushes display state into a [`UiSink`] and never reads from it.
//! Settings submissions go the other way, through `Orchestrator::update_settings`.

/// Receives display updates.
pub trait UiSink {
    /// Remaining time, phase label and whether the countdown is running.
    fn render_timer(&mut self, formatted_time: &str, phase_label: &str, running: bool);

    /// Enable start when stopped, pause when running.
    fn set_running(&mut self, running: bool);

    fn render_stats(&mut self, completed_sessions: u64, formatted_focus_time: &str);

    /// Window or terminal title.
    fn set_title(&mut self, _title: &str) {}

    /// In-app banner shown at a phase boundary.
    fn show_banner(&mut self, _title: &str) {}
}

impl<U: UiSink + ?Sized> UiSink for Box<U> {
    fn render_timer(&mut self, formatted_time: &str, phase_label: &str, running: bool) {
        (**self).render_timer(formatted_time, phase_label, running);
    }

    fn set_running(&mut self, running: bool) {
        (**self).set_running(running);
    }

    fn render_stats(&mut self, completed_sessions: u64, formatted_focus_time: &str) {
        (**self).render_stats(completed_sessions, formatted_focus_time);
    }

    fn set_title(&mut self, title: &str) {
        (**self).set_title(title);
    }

    fn show_banner(&mut self, title: &str) {
        (**self).show_banner(title);
    }
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUi;

impl UiSink for NullUi {
    fn render_timer(&mut self, _formatted_time: &str, _phase_label: &str, _running: bool) {}
    fn set_running(&mut self, _running: bool) {}
    fn render_stats(&mut self, _completed_sessions: u64, _formatted_focus_time: &str) {}
}

/// `MM:SS - Phase - Pomodoro Timer`.
pub fn page_title(formatted_time: &str, phase_label: &str) -> String {
    format!("{formatted_time} - {phase_label} - Pomodoro Timer")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_format() {
        assert_eq!(page_title("24:59", "Work Session"), "24:59 - Work Session - Pomodoro Timer");
    }
}
