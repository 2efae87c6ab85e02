mod phase;
mod session;

pub use phase::{Durations, Phase};
pub use session::{PhaseCompletion, SessionState, SessionTimer};
