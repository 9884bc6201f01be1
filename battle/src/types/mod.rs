//! Domain types: types, stats, moves and species

mod moves;
mod pokemon_type;
mod species;
mod stats;

pub use moves::{CritRatio, MoveCatalog, MoveCategory, MoveData, MoveTarget};
pub use pokemon_type::{TYPE_CHART, Type};
pub use species::Species;
pub use stats::{
    ACCURACY_STAGE_MULTIPLIERS, BaseStats, BattleStats, Fraction, PRIMARY_STAGE_MULTIPLIERS,
    StatStages, accuracy_multiplier, evasion_multiplier, stage_multiplier,
};
