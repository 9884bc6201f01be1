use stadium_protocol::Player;
use thiserror::Error;

use crate::types::MoveTarget;

/// Programming-logic failures inside the engine
///
/// Misses, immunities, disabled moves and other gameplay outcomes are battle
/// events, never errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("Trainer {0} has no combatants")]
    EmptyRoster(String),

    #[error("Invalid choice for {side}: {reason}")]
    InvalidChoice { side: Player, reason: String },

    #[error("{0} must replace its fainted combatant first")]
    ReplacementPending(Player),

    #[error("Round has not been started")]
    RoundNotStarted,

    #[error("Stat changes aimed at {0:?} are not supported")]
    UnsupportedTarget(MoveTarget),

    #[error("Battle is already over")]
    BattleOver,
}
