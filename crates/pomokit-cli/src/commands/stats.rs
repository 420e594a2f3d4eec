//! Statistics commands for CLI.

use clap::Subcommand;
use pomokit_core::AppConfig;
use serde_json::json;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Pomodoros finished today against the daily goal
    Today,
    /// Pomodoros per day for the last 7 days
    Week,
    /// Full dashboard
    All,
    /// Current and best streak
    Streak,
}

pub fn run(action: StatsAction, config: &AppConfig) -> CliResult {
    let app = open_app(config)?;
    let dashboard = app.dashboard();

    match action {
        StatsAction::Today => {
            print_json(&json!({
                "todayCount": dashboard.today_count,
                "goalPerDay": dashboard.goal_per_day,
                "goalPercent": dashboard.goal_percent,
            }))?;
        }
        StatsAction::Week => {
            print_json(&dashboard.series)?;
        }
        StatsAction::All => {
            print_json(&dashboard)?;
        }
        StatsAction::Streak => {
            print_json(app.streak())?;
        }
    }
    Ok(())
}
