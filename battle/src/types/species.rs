//! Species definitions

use std::sync::Arc;

use super::moves::MoveData;
use super::pokemon_type::Type;
use super::stats::BaseStats;

/// A species as defined by the data set; shared by every combatant of that species
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub id: u16,
    pub name: String,
    /// One or two types
    pub types: Vec<Type>,
    pub base_stats: BaseStats,
    /// Moves each combatant of this species enters battle with
    pub moves: Vec<Arc<MoveData>>,
}
