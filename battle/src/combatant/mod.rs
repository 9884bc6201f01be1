//! Combatants, move slots and trainers

mod battle_move;
mod pokemon;
mod trainer;

pub use battle_move::{BattleMove, MoveOutcome};
pub use pokemon::BattlePokemon;
pub use trainer::{DecisionProvider, LockedMove, Trainer};
