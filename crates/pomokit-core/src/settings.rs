//! User settings document.
//!
//! Stored as the `settings` document in the store, camelCase JSON so that
//! documents written by earlier releases keep loading. Numeric fields are
//! clamped when edited through [`Settings::edit`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::timer::Mode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Work phase length in minutes.
    pub work_min: u32,
    pub short_min: u32,
    pub long_min: u32,
    /// Every n-th pomodoro of the bound task is followed by a long break.
    pub long_every: u32,
    /// Start the next phase as soon as one expires.
    pub auto_next: bool,
    pub sound: bool,
    pub goal_per_day: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_min: 25,
            short_min: 5,
            long_min: 15,
            long_every: 4,
            auto_next: true,
            sound: true,
            goal_per_day: 6,
        }
    }
}

impl Settings {
    /// Configured duration of a phase in seconds, never below one minute.
    pub fn phase_secs(&self, mode: Mode) -> u64 {
        let minutes = match mode {
            Mode::Work => self.work_min,
            Mode::Short => self.short_min,
            Mode::Long => self.long_min,
        };
        u64::from(minutes.max(1)) * 60
    }

    /// Long-break cadence, never zero.
    pub fn long_every(&self) -> u32 {
        self.long_every.max(1)
    }

    pub fn get(&self, field: SettingField) -> String {
        match field {
            SettingField::WorkMin => self.work_min.to_string(),
            SettingField::ShortMin => self.short_min.to_string(),
            SettingField::LongMin => self.long_min.to_string(),
            SettingField::LongEvery => self.long_every.to_string(),
            SettingField::AutoNext => self.auto_next.to_string(),
            SettingField::Sound => self.sound.to_string(),
            SettingField::GoalPerDay => self.goal_per_day.to_string(),
        }
    }

    /// Apply raw user input to one field and return the stored value.
    ///
    /// Numbers that fail to parse (or are zero) fall back to the field's
    /// default before clamping. Unparseable booleans keep the current value.
    pub fn edit(&mut self, field: SettingField, raw: &str) -> String {
        match field {
            SettingField::AutoNext => {
                self.auto_next = parse_flag(raw).unwrap_or(self.auto_next);
            }
            SettingField::Sound => {
                self.sound = parse_flag(raw).unwrap_or(self.sound);
            }
            SettingField::WorkMin => self.work_min = field.clamp_input(raw),
            SettingField::ShortMin => self.short_min = field.clamp_input(raw),
            SettingField::LongMin => self.long_min = field.clamp_input(raw),
            SettingField::LongEvery => self.long_every = field.clamp_input(raw),
            SettingField::GoalPerDay => self.goal_per_day = field.clamp_input(raw),
        }
        self.get(field)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Editable settings fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    WorkMin,
    ShortMin,
    LongMin,
    LongEvery,
    AutoNext,
    Sound,
    GoalPerDay,
}

impl SettingField {
    pub const ALL: [SettingField; 7] = [
        SettingField::WorkMin,
        SettingField::ShortMin,
        SettingField::LongMin,
        SettingField::LongEvery,
        SettingField::AutoNext,
        SettingField::Sound,
        SettingField::GoalPerDay,
    ];

    /// Document key of the field.
    pub fn key(&self) -> &'static str {
        match self {
            SettingField::WorkMin => "workMin",
            SettingField::ShortMin => "shortMin",
            SettingField::LongMin => "longMin",
            SettingField::LongEvery => "longEvery",
            SettingField::AutoNext => "autoNext",
            SettingField::Sound => "sound",
            SettingField::GoalPerDay => "goalPerDay",
        }
    }

    /// Inclusive range for numeric fields.
    pub fn range(&self) -> Option<(u32, u32)> {
        match self {
            SettingField::WorkMin => Some((1, 180)),
            SettingField::ShortMin => Some((1, 60)),
            SettingField::LongMin => Some((1, 120)),
            SettingField::LongEvery => Some((2, 12)),
            SettingField::GoalPerDay => Some((1, 48)),
            SettingField::AutoNext | SettingField::Sound => None,
        }
    }

    fn default_number(&self) -> u32 {
        let d = Settings::default();
        match self {
            SettingField::WorkMin => d.work_min,
            SettingField::ShortMin => d.short_min,
            SettingField::LongMin => d.long_min,
            SettingField::LongEvery => d.long_every,
            SettingField::GoalPerDay => d.goal_per_day,
            SettingField::AutoNext | SettingField::Sound => 0,
        }
    }

    fn clamp_input(&self, raw: &str) -> u32 {
        let Some((min, max)) = self.range() else {
            return 0;
        };
        let parsed = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n != 0.0)
            .unwrap_or_else(|| f64::from(self.default_number()));
        parsed.round().clamp(f64::from(min), f64::from(max)) as u32
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SettingField {
    type Err = ValidationError;

    /// Accepts the document key (`workMin`) or its snake_case form (`work_min`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        SettingField::ALL
            .into_iter()
            .find(|field| field.key().to_ascii_lowercase() == folded)
            .ok_or_else(|| ValidationError::UnknownSetting(s.to_string()))
    }
}
