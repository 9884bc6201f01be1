//! Immutable move definitions and the move catalog

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::effects::MoveEffect;

use super::pokemon_type::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physical" => Some(MoveCategory::Physical),
            "special" => Some(MoveCategory::Special),
            "status" => Some(MoveCategory::Status),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveCategory::Physical => "Physical",
            MoveCategory::Special => "Special",
            MoveCategory::Status => "Status",
        }
    }
}

/// Who a move (or a stat-change effect) is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveTarget {
    Enemy,
    /// The user itself ("Self" in data files)
    User,
    All,
}

impl MoveTarget {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enemy" => Some(MoveTarget::Enemy),
            "self" | "user" => Some(MoveTarget::User),
            "all" => Some(MoveTarget::All),
            _ => None,
        }
    }
}

/// Critical hit ratio class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CritRatio {
    #[default]
    Normal,
    High,
}

impl CritRatio {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(CritRatio::Normal),
            "high" => Some(CritRatio::High),
            _ => None,
        }
    }
}

/// A move as defined by the data set; never mutated during a battle
#[derive(Debug, Clone, PartialEq)]
pub struct MoveData {
    pub name: String,
    pub move_type: Type,
    pub category: MoveCategory,
    pub power: Option<u16>,
    /// 1-100; `None` never misses
    pub accuracy: Option<u8>,
    pub pp: u8,
    pub priority: i8,
    pub target: MoveTarget,
    /// Applied in order when the move connects
    pub effects: Vec<MoveEffect>,
}

impl MoveData {
    /// Whether this move is a two-turn or recharge move
    pub fn has_charge_turn(&self) -> bool {
        self.effects
            .iter()
            .any(|e| matches!(e, MoveEffect::ChargingTurn { .. }))
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Every move known to a battle, keyed case-insensitively
///
/// Iteration is ordered by key, so random picks over the catalog are
/// reproducible for a given RNG seed.
#[derive(Debug, Clone, Default)]
pub struct MoveCatalog {
    moves: BTreeMap<String, Arc<MoveData>>,
}

impl MoveCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str) -> String {
        name.trim().to_ascii_lowercase()
    }

    /// Add a move, returning the definition it replaced (if any)
    pub fn insert(&mut self, data: MoveData) -> Option<Arc<MoveData>> {
        self.moves.insert(Self::key(&data.name), Arc::new(data))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<MoveData>> {
        self.moves.get(&Self::key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.moves.contains_key(&Self::key(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<MoveData>> {
        self.moves.values()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl FromIterator<MoveData> for MoveCatalog {
    fn from_iter<I: IntoIterator<Item = MoveData>>(iter: I) -> Self {
        let mut catalog = MoveCatalog::new();
        for data in iter {
            catalog.insert(data);
        }
        catalog
    }
}
