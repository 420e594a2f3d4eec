use clap::Subcommand;
use pomokit_core::AppConfig;

use super::{open_app, CliResult};

#[derive(Subcommand)]
pub enum DataAction {
    /// Delete settings, tasks, log and streak
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction, config: &AppConfig) -> CliResult {
    match action {
        DataAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear all data without --yes".into());
            }
            let mut app = open_app(config)?;
            app.clear_all()?;
            println!("all data cleared");
        }
    }
    Ok(())
}
