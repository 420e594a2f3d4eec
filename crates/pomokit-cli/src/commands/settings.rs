use clap::Subcommand;
use pomokit_core::{AppConfig, SettingField};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print one setting
    Get {
        /// Setting key (e.g. "workMin", "long_every", "sound")
        key: SettingField,
    },
    /// Change one setting. Out-of-range numbers are clamped.
    Set {
        /// Setting key
        key: SettingField,
        /// New value
        value: String,
    },
    /// Print the settings document
    List,
    /// Restore default settings
    Reset,
}

pub fn run(action: SettingsAction, config: &AppConfig) -> CliResult {
    let mut app = open_app(config)?;

    match action {
        SettingsAction::Get { key } => {
            println!("{}", app.settings().get(key));
        }
        SettingsAction::Set { key, value } => {
            let applied = app.edit_setting(key, &value)?;
            if applied != value.trim() {
                eprintln!("{key} stored as {applied}");
            }
            println!("{applied}");
        }
        SettingsAction::List => {
            print_json(app.settings())?;
        }
        SettingsAction::Reset => {
            app.reset_settings()?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
