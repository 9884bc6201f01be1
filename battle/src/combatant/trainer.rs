//! Trainers and the decision interface

use std::sync::Arc;

use stadium_protocol::{BattleRequest, Choice, Player, Pokemon};
use tracing::debug;

use super::pokemon::BattlePokemon;
use crate::error::BattleError;
use crate::types::MoveData;

/// The move a trainer is locked into while its active combatant is mid
/// charge or recharge
#[derive(Debug, Clone)]
pub struct LockedMove {
    /// Slot in the active combatant's move list, `None` for a move that was
    /// invoked indirectly (Metronome, Mirror Move)
    pub slot: Option<usize>,
    pub data: Arc<MoveData>,
}

/// One side of the battle: a named roster with exactly one active combatant
#[derive(Debug, Clone)]
pub struct Trainer {
    name: String,
    pub(crate) side: Player,
    roster: Vec<BattlePokemon>,
    active: usize,
    lock: Option<LockedMove>,
    last_choice: Option<Choice>,
}

impl Trainer {
    /// Create a trainer; the first roster entry leads
    pub fn new(name: impl Into<String>, roster: Vec<BattlePokemon>) -> Result<Self, BattleError> {
        let name = name.into();
        if roster.is_empty() {
            return Err(BattleError::EmptyRoster(name));
        }
        Ok(Self {
            name,
            side: Player::P1,
            roster,
            active: 0,
            lock: None,
            last_choice: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn side(&self) -> Player {
        self.side
    }

    pub fn roster(&self) -> &[BattlePokemon] {
        &self.roster
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &BattlePokemon {
        &self.roster[self.active]
    }

    pub fn active_mut(&mut self) -> &mut BattlePokemon {
        &mut self.roster[self.active]
    }

    /// Protocol identifier of the active combatant
    pub fn ident(&self) -> Pokemon {
        Pokemon::new(self.side, self.active().name())
    }

    /// Non-active roster entries that can still fight
    pub fn bench(&self) -> impl Iterator<Item = (usize, &BattlePokemon)> {
        self.roster
            .iter()
            .enumerate()
            .filter(move |(i, p)| *i != self.active && !p.is_fainted())
    }

    pub fn can_switch(&self) -> bool {
        self.bench().next().is_some()
    }

    pub fn all_fainted(&self) -> bool {
        self.roster.iter().all(BattlePokemon::is_fainted)
    }

    pub fn alive_count(&self) -> usize {
        self.roster.iter().filter(|p| !p.is_fainted()).count()
    }

    /// Active combatant fainted and a healthy replacement exists
    pub fn needs_replacement(&self) -> bool {
        self.active().is_fainted() && self.can_switch()
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    pub fn locked_move(&self) -> Option<&LockedMove> {
        self.lock.as_ref()
    }

    pub(crate) fn lock(&mut self, slot: Option<usize>, data: Arc<MoveData>) {
        self.lock = Some(LockedMove { slot, data });
    }

    pub(crate) fn unlock(&mut self) {
        self.lock = None;
    }

    pub fn last_choice(&self) -> Option<Choice> {
        self.last_choice
    }

    pub(crate) fn record_choice(&mut self, choice: Choice) {
        self.last_choice = Some(choice);
    }

    /// Check that `index` names a healthy, non-active roster entry
    pub fn validate_switch(&self, index: usize) -> Result<(), BattleError> {
        let reason = match self.roster.get(index) {
            None => format!("no roster entry {}", index),
            Some(_) if index == self.active => format!("{} is already active", self.roster[index].name()),
            Some(p) if p.is_fainted() => format!("{} has fainted", p.name()),
            Some(_) => return Ok(()),
        };
        Err(BattleError::InvalidChoice {
            side: self.side,
            reason,
        })
    }

    /// Check that `slot` names a move of the active combatant
    pub fn validate_move(&self, slot: usize) -> Result<(), BattleError> {
        if slot < self.active().moves.len() {
            return Ok(());
        }
        Err(BattleError::InvalidChoice {
            side: self.side,
            reason: format!("{} has no move slot {}", self.active().name(), slot),
        })
    }

    /// Bring a roster entry in, resetting its volatile state and any lock
    pub fn switch_to(&mut self, index: usize) -> Result<(), BattleError> {
        self.validate_switch(index)?;
        debug!(
            side = %self.side,
            from = %self.active().name(),
            to = %self.roster[index].name(),
            "switch"
        );
        self.active = index;
        self.roster[index].switch_in();
        self.lock = None;
        Ok(())
    }

    /// Send out the lead at battle start
    pub(crate) fn send_out_lead(&mut self) {
        self.roster[self.active].switch_in();
    }
}

/// Supplies decisions for one side
///
/// A locked trainer's provider is never consulted for its action.
pub trait DecisionProvider {
    /// Pick a move or switch for the coming round
    fn choose_action(&mut self, request: &BattleRequest) -> Choice;

    /// Pick the roster entry replacing a fainted active combatant
    fn choose_replacement(&mut self, request: &BattleRequest) -> usize {
        request.switch_targets().next().unwrap_or(0)
    }
}

impl<F> DecisionProvider for F
where
    F: FnMut(&BattleRequest) -> Choice,
{
    fn choose_action(&mut self, request: &BattleRequest) -> Choice {
        self(request)
    }
}
