use std::path::PathBuf;

use clap::Subcommand;
use pomokit_core::AppConfig;

use super::{open_app, CliResult};

#[derive(Subcommand)]
pub enum BackupAction {
    /// Write settings, tasks and log as one JSON document
    Export {
        /// Output file (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace stored documents with the ones present in a backup file
    Import {
        /// Backup file
        file: PathBuf,
    },
}

pub fn run(action: BackupAction, config: &AppConfig) -> CliResult {
    let mut app = open_app(config)?;

    match action {
        BackupAction::Export { output } => {
            let json = app.export_backup()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    eprintln!("Backup written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        BackupAction::Import { file } => {
            let json = std::fs::read_to_string(&file)?;
            let summary = app.import_backup(&json)?;
            if summary.is_empty() {
                println!("nothing to import");
                return Ok(());
            }
            if summary.settings {
                println!("settings restored");
            }
            if let Some(n) = summary.tasks {
                println!("{n} tasks restored");
            }
            if let Some(n) = summary.log {
                println!("{n} log entries restored");
            }
        }
    }
    Ok(())
}
