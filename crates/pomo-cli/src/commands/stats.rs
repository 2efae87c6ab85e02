use clap::Subcommand;
use pomo_core::{format_focus_time, Clock, Config, DailyStats, StatsStore, SystemClock};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's completed sessions and focus time
    Today {
        /// Print the raw record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Zero today's stats
    Reset,
}

pub fn run(action: StatsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let kv = super::open_store(config)?;
    let store = StatsStore::new(&kv, SystemClock);

    match action {
        StatsAction::Today { json } => {
            let stats = store.load();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("date:      {}", stats.date);
                println!("sessions:  {}", stats.completed_sessions);
                println!("focus:     {}", format_focus_time(stats.total_focus_secs));
            }
        }
        StatsAction::Reset => {
            store.save(&DailyStats::empty(SystemClock.today()));
            println!("stats reset");
        }
    }
    Ok(())
}
