use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Timer phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Work,
    Short,
    Long,
}

impl Mode {
    pub fn is_break(&self) -> bool {
        !matches!(self, Mode::Work)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "Focus",
            Mode::Short => "Short break",
            Mode::Long => "Long break",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Work => "work",
            Mode::Short => "short",
            Mode::Long => "long",
        })
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" | "focus" => Ok(Mode::Work),
            "short" | "short-break" => Ok(Mode::Short),
            "long" | "long-break" => Ok(Mode::Long),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("expected work, short or long, got '{other}'"),
            }),
        }
    }
}
