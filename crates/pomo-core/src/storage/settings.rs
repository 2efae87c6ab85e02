//! User settings: validation and best-effort persistence.
//!
//! Input is never rejected. Each field is coerced independently: a value
//! that is not a number (or is zero) becomes the field default, then the
//! number is clamped into the field's range.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::kv::KvStore;
use crate::error::StorageError;

/// Key the settings record is stored under.
pub const SETTINGS_KEY: &str = "pomodoro_settings";

const WORK_RANGE: (u32, u32) = (1, 60);
const BREAK_RANGE: (u32, u32) = (1, 30);
const LONG_BREAK_RANGE: (u32, u32) = (1, 60);
const LONG_BREAK_INTERVAL_RANGE: (u32, u32) = (2, 10);

/// Validated user settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub work_minutes: u32,
    pub break_minutes: u32,
    pub long_break_minutes: u32,
    pub sessions_until_long_break: u32,
    pub sound_enabled: bool,
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
            long_break_minutes: 15,
            sessions_until_long_break: 4,
            sound_enabled: true,
            notifications_enabled: false,
        }
    }
}

/// An unvalidated settings submission.
///
/// Fields hold whatever arrived: numbers, numeric strings, garbage, or
/// nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSettings {
    pub work_minutes: Option<Value>,
    pub break_minutes: Option<Value>,
    pub long_break_minutes: Option<Value>,
    pub sessions_until_long_break: Option<Value>,
    pub sound_enabled: Option<Value>,
    pub notifications_enabled: Option<Value>,
}

impl From<Settings> for RawSettings {
    fn from(s: Settings) -> Self {
        Self {
            work_minutes: Some(s.work_minutes.into()),
            break_minutes: Some(s.break_minutes.into()),
            long_break_minutes: Some(s.long_break_minutes.into()),
            sessions_until_long_break: Some(s.sessions_until_long_break.into()),
            sound_enabled: Some(s.sound_enabled.into()),
            notifications_enabled: Some(s.notifications_enabled.into()),
        }
    }
}

impl RawSettings {
    /// Coerce and clamp into valid settings. See the module docs.
    pub fn validate(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            work_minutes: clamp_minutes(self.work_minutes.as_ref(), defaults.work_minutes, WORK_RANGE),
            break_minutes: clamp_minutes(
                self.break_minutes.as_ref(),
                defaults.break_minutes,
                BREAK_RANGE,
            ),
            long_break_minutes: clamp_minutes(
                self.long_break_minutes.as_ref(),
                defaults.long_break_minutes,
                LONG_BREAK_RANGE,
            ),
            sessions_until_long_break: clamp_minutes(
                self.sessions_until_long_break.as_ref(),
                defaults.sessions_until_long_break,
                LONG_BREAK_INTERVAL_RANGE,
            ),
            sound_enabled: coerce_flag(self.sound_enabled.as_ref(), defaults.sound_enabled),
            notifications_enabled: coerce_flag(
                self.notifications_enabled.as_ref(),
                defaults.notifications_enabled,
            ),
        }
    }
}

/// Loads, validates and saves [`Settings`].
pub struct SettingsStore<S> {
    store: S,
}

impl<S: KvStore> SettingsStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted settings.
    ///
    /// A missing, unreadable or non-object record yields the defaults. A
    /// corrupt field only resets that field.
    pub fn load(&self) -> Settings {
        let json = match self.store.get(SETTINGS_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return Settings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read settings, using defaults");
                return Settings::default();
            }
        };
        let raw = match serde_json::from_str::<Value>(&json) {
            Ok(value @ Value::Object(_)) => {
                serde_json::from_value::<RawSettings>(value).unwrap_or_default()
            }
            Ok(_) | Err(_) => {
                tracing::warn!("stored settings are malformed, using defaults");
                RawSettings::default()
            }
        };
        Self::validate(&raw)
    }

    /// Coerce and clamp a raw submission into valid settings.
    pub fn validate(raw: &RawSettings) -> Settings {
        raw.validate()
    }

    /// Persist settings. Failures are logged and swallowed.
    pub fn save(&self, settings: &Settings) {
        let result = serde_json::to_string(settings)
            .map_err(StorageError::from)
            .and_then(|json| self.store.set(SETTINGS_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to save settings");
        }
    }
}

fn clamp_minutes(value: Option<&Value>, default: u32, (min, max): (u32, u32)) -> u32 {
    let n = match value.and_then(coerce_int) {
        Some(0) | None => i64::from(default),
        Some(n) => n,
    };
    // In range after the clamp, so the cast is lossless.
    n.clamp(i64::from(min), i64::from(max)) as u32
}

/// Integer reading of a loosely typed value. Floats truncate; strings take
/// their leading signed digits.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Overlong digit runs saturate rather than fail.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn coerce_flag(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("true") => true,
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("false") => false,
        _ => default,
    }
}
