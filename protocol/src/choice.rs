//! Decisions a trainer submits for a round

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// A trainer's decision for one round
///
/// Indices are zero-based internally; the text form is one-based
/// (`move 1` selects the first move slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "action", content = "index")]
pub enum Choice {
    /// Use the move in this slot of the active combatant's move list
    Move(usize),

    /// Swap the active combatant for this roster entry
    Switch(usize),
}

impl Choice {
    /// Serialize choice to protocol format
    pub fn to_protocol_string(&self) -> String {
        match self {
            Self::Move(slot) => format!("move {}", slot + 1),
            Self::Switch(index) => format!("switch {}", index + 1),
        }
    }

    /// Parse a choice like "move 2" or "switch 3"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::EmptyMessage.into());
        }

        let (action, index) = s
            .split_once(' ')
            .ok_or_else(|| ParseError::MissingField("choice index".to_string()))?;
        let index: usize = index
            .trim()
            .parse()
            .map_err(|_| ParseError::InvalidFormat(format!("invalid choice index: {}", index)))?;
        if index == 0 {
            return Err(ParseError::InvalidFormat("choice indices start at 1".to_string()).into());
        }

        match action {
            "move" => Ok(Self::Move(index - 1)),
            "switch" => Ok(Self::Switch(index - 1)),
            other => Err(ParseError::InvalidFormat(format!("unknown action: {}", other)).into()),
        }
    }

    pub fn is_switch(&self) -> bool {
        matches!(self, Self::Switch(_))
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_protocol_string())
    }
}
