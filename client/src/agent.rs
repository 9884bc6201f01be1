use anyhow::Result;
use async_trait::async_trait;
use stadium_protocol::{BattleRequest, Choice, LogEntry};

/// An asynchronous decision maker for one side of a battle.
///
/// Only [`choose_action`](Agent::choose_action) is required. The driver never
/// asks a side that is locked into a multi-turn move.
///
/// # Example
///
/// ```ignore
/// struct AlwaysFirst;
///
/// #[async_trait]
/// impl Agent for AlwaysFirst {
///     async fn choose_action(&mut self, request: &BattleRequest) -> Result<Choice> {
///         Ok(Choice::Move(request.usable_moves().next().unwrap_or(0)))
///     }
/// }
/// ```
#[async_trait]
pub trait Agent: Send {
    /// Called once per round with the side's current view of the battle.
    async fn choose_action(&mut self, request: &BattleRequest) -> Result<Choice>;

    /// Called when the active combatant fainted; returns a roster index.
    async fn choose_replacement(&mut self, request: &BattleRequest) -> Result<usize> {
        Ok(first_replacement(request))
    }

    /// Called with the events logged since the last call.
    async fn on_log(&mut self, entries: &[LogEntry]) {
        let _ = entries;
    }
}

/// First move slot that can be used, or slot 0 when none can
pub fn first_usable_move(request: &BattleRequest) -> Choice {
    Choice::Move(request.usable_moves().next().unwrap_or(0))
}

/// First healthy bench member
pub fn first_replacement(request: &BattleRequest) -> usize {
    request.switch_targets().next().unwrap_or(0)
}
