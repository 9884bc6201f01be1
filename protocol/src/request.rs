//! Decision requests
//!
//! A [`BattleRequest`] is the snapshot a decision provider sees when the engine
//! asks it for a [`Choice`](crate::Choice): its own active combatant with move
//! slots, its roster, and what it can see of the opponent.

use serde::{Deserialize, Serialize};

use crate::battle::Player;

/// A request asking a trainer to make a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    /// Turn the decision is for
    pub turn: u32,

    /// Side being asked
    pub side: Player,

    /// Active combatant and its move slots
    pub active: ActivePokemon,

    /// Whole roster in party order, active combatant included
    pub roster: Vec<RosterPokemon>,

    /// Opponent's active combatant
    pub opponent: OpponentPokemon,

    /// Active combatant fainted and must be replaced before the round
    #[serde(default)]
    pub force_switch: bool,

    /// Active combatant is mid multi-turn move; any choice is overridden
    #[serde(default)]
    pub locked: bool,
}

impl BattleRequest {
    /// Parse a request from JSON
    pub fn parse(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// Slots of moves that can be used right now
    pub fn usable_moves(&self) -> impl Iterator<Item = usize> + '_ {
        self.active
            .moves
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_usable())
            .map(|(index, _)| index)
    }

    /// Roster indices that are legal switch targets
    pub fn switch_targets(&self) -> impl Iterator<Item = usize> + '_ {
        self.roster
            .iter()
            .filter(|p| !p.active && !p.fainted)
            .map(|p| p.index)
    }

    /// Check if this request needs a move or switch decision
    pub fn needs_decision(&self) -> bool {
        !self.locked
    }
}

/// The requesting side's active combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePokemon {
    pub name: String,
    pub hp: u16,
    pub max_hp: u16,
    pub types: Vec<String>,
    #[serde(default)]
    pub moves: Vec<MoveSlot>,
}

/// A move slot on the active combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSlot {
    #[serde(rename = "move")]
    pub name: String,
    pub pp: u8,
    pub max_pp: u8,
    #[serde(default)]
    pub disabled: bool,
}

impl MoveSlot {
    pub fn is_usable(&self) -> bool {
        self.pp > 0 && !self.disabled
    }
}

/// A roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPokemon {
    /// Position in the roster (what `Choice::Switch` refers to)
    pub index: usize,
    pub name: String,
    pub hp: u16,
    pub max_hp: u16,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub fainted: bool,
}

/// What the requesting side can see of the opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentPokemon {
    pub name: String,
    pub hp: u16,
    pub max_hp: u16,
    pub types: Vec<String>,
}
