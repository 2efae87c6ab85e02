use clap::Subcommand;
use pomo_core::{Config, RawSettings, Settings, SettingsStore};
use serde_json::Value;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current settings as JSON
    Show,
    /// Change one or more settings. Out-of-range values are clamped.
    Set {
        /// Work phase length in minutes (1-60)
        #[arg(long)]
        work_minutes: Option<String>,
        /// Short break length in minutes (1-30)
        #[arg(long)]
        break_minutes: Option<String>,
        /// Long break length in minutes (1-60)
        #[arg(long)]
        long_break_minutes: Option<String>,
        /// Work phases before a long break (2-10)
        #[arg(long)]
        sessions_until_long_break: Option<String>,
        /// Ring the terminal bell at phase boundaries
        #[arg(long)]
        sound: Option<String>,
        /// Print a notification line at phase boundaries
        #[arg(long)]
        notifications: Option<String>,
    },
    /// Restore default settings
    Reset,
}

pub fn run(action: SettingsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let kv = super::open_store(config)?;
    let store = SettingsStore::new(&kv);

    let settings = match action {
        SettingsAction::Show => store.load(),
        SettingsAction::Set {
            work_minutes,
            break_minutes,
            long_break_minutes,
            sessions_until_long_break,
            sound,
            notifications,
        } => {
            let mut raw = RawSettings::from(store.load());
            let overrides = [
                (&mut raw.work_minutes, work_minutes),
                (&mut raw.break_minutes, break_minutes),
                (&mut raw.long_break_minutes, long_break_minutes),
                (&mut raw.sessions_until_long_break, sessions_until_long_break),
                (&mut raw.sound_enabled, sound),
                (&mut raw.notifications_enabled, notifications),
            ];
            for (field, value) in overrides {
                if let Some(value) = value {
                    *field = Some(Value::String(value));
                }
            }
            let validated = raw.validate();
            store.save(&validated);
            validated
        }
        SettingsAction::Reset => {
            let defaults = Settings::default();
            store.save(&defaults);
            defaults
        }
    };

    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
