//! Consecutive-day streak of completed pomodoros.
//!
//! A calendar day counts once it has at least one log entry. The streak is
//! re-evaluated right after every log append; evaluation is idempotent within
//! a day.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::session_log::LogEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Streak {
    pub current: u32,
    /// Always `>= current`.
    pub best: u32,
    /// Last day that extended the streak. Stored as `""` when unset.
    #[serde(with = "optional_date")]
    pub last_date: Option<NaiveDate>,
}

impl Streak {
    /// Re-evaluate against `log` as of `today`. Returns true if anything
    /// changed.
    pub fn recompute(&mut self, log: &[LogEntry], today: NaiveDate) -> bool {
        if !log.iter().any(|e| e.date == today) {
            return false;
        }
        if self.last_date == Some(today) {
            return false;
        }

        let yesterday = today.checked_sub_days(Days::new(1));
        let continues = self.last_date.is_some() && self.last_date == yesterday;

        self.current = if continues {
            self.current.saturating_add(1)
        } else {
            1
        };
        self.best = self.best.max(self.current);
        self.last_date = Some(today);
        true
    }
}

/// `Option<NaiveDate>` as `"YYYY-MM-DD"` or `""`.
mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
