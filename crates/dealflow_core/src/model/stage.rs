//! Pipeline stage sequence.
//!
//! # Responsibility
//! - Own the single ordered catalog of linear stages and terminal stages.
//! - Answer position (`index`) and successor (`next`) queries.
//!
//! # Invariants
//! - Linear order is fixed: Lead -> Discussions -> Qualified -> RFQ -> Offered.
//! - Terminal stages (Won, Lost, Dropped) have no index and no successor.
//! - `Ord` follows declaration order, which is also the display order.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One discrete phase of a deal lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Lead,
    Discussions,
    Qualified,
    #[serde(rename = "RFQ")]
    Rfq,
    Offered,
    Won,
    Lost,
    Dropped,
}

impl Stage {
    /// Linear stages in progression order.
    pub const LINEAR: [Stage; 5] = [
        Stage::Lead,
        Stage::Discussions,
        Stage::Qualified,
        Stage::Rfq,
        Stage::Offered,
    ];

    /// Terminal stages, reachable only from `Offered`.
    pub const TERMINAL: [Stage; 3] = [Stage::Won, Stage::Lost, Stage::Dropped];

    /// Every stage in display order.
    pub const ALL: [Stage; 8] = [
        Stage::Lead,
        Stage::Discussions,
        Stage::Qualified,
        Stage::Rfq,
        Stage::Offered,
        Stage::Won,
        Stage::Lost,
        Stage::Dropped,
    ];

    /// Position in the linear list, `None` for terminal stages.
    pub fn index(self) -> Option<usize> {
        Self::LINEAR.iter().position(|stage| *stage == self)
    }

    /// Following linear stage.
    ///
    /// Returns `None` for `Offered` (its forward moves are the terminal
    /// stages) and for every terminal stage.
    pub fn next(self) -> Option<Stage> {
        let index = self.index()?;
        Self::LINEAR.get(index + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        Self::TERMINAL.contains(&self)
    }

    /// Linear stages strictly before this one.
    ///
    /// A terminal stage sits after the whole linear path, so every linear
    /// stage precedes it.
    pub fn preceding(self) -> &'static [Stage] {
        match self.index() {
            Some(index) => &Self::LINEAR[..index],
            None => &Self::LINEAR,
        }
    }

    /// Stable store value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Discussions => "Discussions",
            Self::Qualified => "Qualified",
            Self::Rfq => "RFQ",
            Self::Offered => "Offered",
            Self::Won => "Won",
            Self::Lost => "Lost",
            Self::Dropped => "Dropped",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = StageParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(StageParseError::Empty);
        }
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == normalized)
            .ok_or_else(|| StageParseError::Unknown(normalized.to_string()))
    }
}

/// Stage parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageParseError {
    Empty,
    Unknown(String),
}

impl Display for StageParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "stage value must not be empty"),
            Self::Unknown(value) => write!(f, "unknown stage: {value}"),
        }
    }
}

impl Error for StageParseError {}
