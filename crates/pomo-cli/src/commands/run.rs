use std::rc::Rc;
use std::time::Duration;

use clap::Args;
use pomo_core::{
    format_focus_time, Clock, Config, Event, KvStore, Notifier, Orchestrator, SystemClock,
};
use tokio::time::{interval, interval_at, Instant, MissedTickBehavior};

use crate::terminal::{TerminalNotifier, TerminalUi};

const TICK: Duration = Duration::from_secs(1);

#[derive(Args)]
pub struct RunArgs {
    /// Number of phases to run before exiting
    #[arg(long, default_value_t = 1)]
    pub phases: u32,
    /// Print events as JSON lines instead of drawing a status line
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let kv = Rc::new(super::open_store(config)?);
    let ui = TerminalUi::new(!args.json);
    let mut orch = Orchestrator::new(kv, SystemClock, TerminalNotifier, ui);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(drive(
        &mut orch,
        args.phases,
        config.refresh_interval(),
        args.json,
    ));

    orch.shutdown();
    if !args.json {
        print_summary(&orch);
    }
    result
}

/// Run `phases` phases, each started explicitly. Ctrl-C pauses and returns.
async fn drive<K, C, N>(
    orch: &mut Orchestrator<K, C, N, TerminalUi>,
    phases: u32,
    refresh: Duration,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>>
where
    K: KvStore + Clone,
    C: Clock + Clone,
    N: Notifier,
{
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut redraw = interval(refresh);
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

    for _ in 0..phases {
        emit(orch.start(), json)?;
        // Fresh schedule per phase so a partial second never carries over.
        let mut second = interval_at(Instant::now() + TICK, TICK);

        loop {
            tokio::select! {
                _ = second.tick() => {
                    if let Some(event) = orch.on_second() {
                        emit(Some(event), json)?;
                        break;
                    }
                }
                _ = redraw.tick() => orch.refresh(),
                signal = &mut ctrl_c => {
                    signal?;
                    let paused = orch.pause();
                    emit(paused, json)?;
                    return Ok(());
                }
            }
        }
    }
    Ok(())
}

fn emit(event: Option<Event>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(event), true) = (event, json) {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

fn print_summary<K, C, N>(orch: &Orchestrator<K, C, N, TerminalUi>)
where
    K: KvStore + Clone,
    C: Clock + Clone,
    N: Notifier,
{
    let stats = orch.stats();
    let timer = orch.timer();
    eprintln!();
    eprintln!(
        "today: {} completed, {} focused",
        stats.completed_sessions,
        format_focus_time(stats.total_focus_secs)
    );
    eprintln!(
        "next: {} ({})",
        timer.current_phase_label(),
        timer.formatted_remaining()
    );
}
