//! Raw JSON shapes of the data files
//!
//! Enum-valued fields stay strings here so that an unknown value can be
//! reported with the move or species it belongs to; [`crate::loader`] turns
//! these into engine types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDto {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: String,
    #[serde(default)]
    pub power: Option<u16>,
    /// Absent for moves that never miss
    #[serde(default)]
    pub accuracy: Option<u8>,
    pub pp: u8,
    #[serde(default)]
    pub priority: i8,
    pub target: String,
    #[serde(default)]
    pub effects: Vec<EffectDto>,
}

/// One configured effect; which parameters are required depends on `effect_type`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectDto {
    pub effect_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semi_invulnerable_turn: Option<bool>,
    /// ChargingTurn only: the turn after the move is lost instead of the turn before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recharge: Option<bool>,
    /// CopyMove only: learn the copied move instead of using it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_stat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_hits: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hits: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_power: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chance: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<i8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesDto {
    pub id: u16,
    pub name: String,
    pub types: Vec<String>,
    pub base_stats: StatsDto,
    #[serde(default)]
    pub moves: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}
