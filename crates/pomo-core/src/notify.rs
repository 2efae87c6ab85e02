//! Phase-boundary notification capability.

/// Receives a call at every phase completion.
///
/// Fire-and-forget: implementations swallow their own failures and the core
/// never inspects a result. The flags are passed through so the
/// implementation decides what "sound" or "notification" means on its
/// platform.
pub trait Notifier {
    fn notify_phase_complete(
        &mut self,
        title: &str,
        body: &str,
        sound_enabled: bool,
        notifications_enabled: bool,
    );

    /// Called when the user turns notifications on.
    fn request_permission(&mut self) {}
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn notify_phase_complete(
        &mut self,
        title: &str,
        body: &str,
        sound_enabled: bool,
        notifications_enabled: bool,
    ) {
        (**self).notify_phase_complete(title, body, sound_enabled, notifications_enabled);
    }

    fn request_permission(&mut self) {
        (**self).request_permission();
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify_phase_complete(&mut self, _title: &str, _body: &str, _sound: bool, _notify: bool) {}
}
