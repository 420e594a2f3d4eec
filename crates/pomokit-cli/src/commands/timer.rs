use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use pomokit_core::timer::format_mmss;
use pomokit_core::{AppConfig, Event, Mode, PomodoroApp, Store};
use tokio::time::MissedTickBehavior;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the timer in the foreground. Ctrl-C pauses and exits.
    Run {
        /// Phase to start in (work, short, long)
        #[arg(long)]
        mode: Option<Mode>,
        /// Task ID to credit finished pomodoros to
        #[arg(long)]
        task: Option<String>,
        /// Stop after this many phases have completed
        #[arg(long)]
        phases: Option<u32>,
        /// Do not draw the countdown line on stderr
        #[arg(long)]
        quiet: bool,
        /// Length of one timer second in milliseconds
        #[arg(long, default_value_t = 1000, hide = true)]
        tick_ms: u64,
    },
    /// Print timer defaults and today's progress as JSON
    Status,
}

pub fn run(action: TimerAction, config: &AppConfig) -> CliResult {
    let mut app = open_app(config)?;

    match action {
        TimerAction::Run {
            mode,
            task,
            phases,
            quiet,
            tick_ms,
        } => {
            if let Some(mode) = mode {
                app.switch_mode(mode);
            }
            app.bind_task(task.as_deref())?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(drive(
                &mut app,
                phases,
                Duration::from_millis(tick_ms.max(1)),
                quiet,
            ))?;
        }
        TimerAction::Status => {
            print_json(&app.status())?;
        }
    }
    Ok(())
}

/// Tick once per `period` until the phase limit is hit, the timer stops on
/// its own (autoNext off), or Ctrl-C.
async fn drive<S: Store>(
    app: &mut PomodoroApp<S>,
    limit: Option<u32>,
    period: Duration,
    quiet: bool,
) -> CliResult {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    ticker.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    emit(app.start())?;
    let mut completed = 0u32;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let events = app.tick()?;
                for event in &events {
                    if matches!(event, Event::PhaseCompleted { .. }) {
                        completed += 1;
                    }
                    emit(Some(event.clone()))?;
                }
                if !quiet {
                    render(app);
                }
                if limit.is_some_and(|n| completed >= n) {
                    emit(app.pause())?;
                    break;
                }
                if !app.timer().running {
                    tracing::debug!(mode = %app.timer().mode, "timer stopped on its own");
                    break;
                }
            }
            _ = &mut ctrl_c => {
                tracing::info!("interrupted, pausing timer");
                emit(app.pause())?;
                break;
            }
        }
    }

    if !quiet {
        eprintln!();
    }
    Ok(())
}

/// One JSON object per line on stdout.
fn emit(event: Option<Event>) -> CliResult {
    if let Some(event) = event {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}

fn render<S: Store>(app: &PomodoroApp<S>) {
    let state = app.timer();
    let task = app
        .active_task()
        .map(|t| format!("  {} ({})", t.title, t.progress_label()))
        .unwrap_or_default();
    let mut err = std::io::stderr().lock();
    let _ = write!(
        err,
        "\r{:<12} {}{}   ",
        state.mode.label(),
        format_mmss(state.seconds_left),
        task
    );
    let _ = err.flush();
}
