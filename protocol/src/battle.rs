//! Identifiers shared by battle events and decision requests

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Side of a battle (p1 or p2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    P1,
    P2,
}

impl Player {
    /// Both sides, in seat order
    pub const BOTH: [Player; 2] = [Player::P1, Player::P2];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
        }
    }

    /// Index into two-element per-side arrays
    pub fn index(&self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combatant identifier in the form "p1: Pikachu"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pokemon {
    /// Side the combatant fights for
    pub player: Player,
    /// Species name
    pub name: String,
}

impl Pokemon {
    pub fn new(player: Player, name: impl Into<String>) -> Self {
        Self {
            player,
            name: name.into(),
        }
    }

    /// Parse an identifier like "p1: Pikachu"
    pub fn parse(s: &str) -> Option<Self> {
        let (side, name) = s.split_once(": ")?;
        let player = Player::parse(side)?;
        if name.is_empty() {
            return None;
        }

        Some(Pokemon {
            player,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.player, self.name)
    }
}

/// Stats that carry a stage modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    pub const ALL: [Stat; 7] = [
        Stat::Atk,
        Stat::Def,
        Stat::Spa,
        Stat::Spd,
        Stat::Spe,
        Stat::Accuracy,
        Stat::Evasion,
    ];

    /// Parse a stat from its short wire name or its long data-file name
    /// (case-insensitive), e.g. "atk", "Attack", "SpecialDefense"
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "atk" | "attack" => Some(Stat::Atk),
            "def" | "defense" => Some(Stat::Def),
            "spa" | "spatk" | "specialattack" => Some(Stat::Spa),
            "spd" | "spdef" | "specialdefense" => Some(Stat::Spd),
            "spe" | "speed" => Some(Stat::Spe),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" | "evasiveness" => Some(Stat::Evasion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Spa => "spa",
            Stat::Spd => "spd",
            Stat::Spe => "spe",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasion",
        }
    }

    /// Name used in human-readable battle text
    pub fn display_name(&self) -> &'static str {
        match self {
            Stat::Atk => "Attack",
            Stat::Def => "Defense",
            Stat::Spa => "Sp. Atk",
            Stat::Spd => "Sp. Def",
            Stat::Spe => "Speed",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasiveness",
        }
    }

    /// Whether the stat uses the accuracy/evasion multiplier table
    pub fn is_accuracy_kind(&self) -> bool {
        matches!(self, Stat::Accuracy | Stat::Evasion)
    }
}

/// Helper to parse a Pokemon from message parts
pub fn parse_pokemon(parts: &[&str], index: usize) -> Result<Pokemon> {
    parts
        .get(index)
        .and_then(|s| Pokemon::parse(s))
        .ok_or_else(|| ParseError::MissingField("pokemon".to_string()).into())
}

/// Helper to parse a non-empty text field from message parts
pub fn parse_text(parts: &[&str], index: usize, field: &str) -> Result<String> {
    match parts.get(index) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(ParseError::MissingField(field.to_string()).into()),
    }
}

/// Helper to parse a number from message parts
pub fn parse_number<T: std::str::FromStr>(parts: &[&str], index: usize, field: &str) -> Result<T> {
    let raw = parts
        .get(index)
        .ok_or_else(|| ParseError::MissingField(field.to_string()))?;

    raw.parse()
        .map_err(|_| ParseError::InvalidFormat(format!("{} is not a number: {}", field, raw)).into())
}

/// Helper to parse a Stat from message parts
pub fn parse_stat(parts: &[&str], index: usize) -> Result<Stat> {
    let raw = parse_text(parts, index, "stat")?;
    Stat::parse(&raw).ok_or_else(|| ParseError::InvalidFormat(format!("unknown stat: {}", raw)).into())
}
