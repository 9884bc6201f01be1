//! Move slots and the move execution state machine

use std::sync::Arc;

use stadium_protocol::{BattleEvent, CantReason};
use tracing::debug;

use crate::calc::accuracy;
use crate::effects::MoveEffect;
use crate::engine::{BattleContext, LastMove};
use crate::error::BattleError;
use crate::types::{MoveCategory, MoveData};

/// What happened when a move was executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Spent the action recharging; only the recharge effect ran
    Recharged,
    /// Disabled or out of PP; nothing happened
    Unusable(CantReason),
    Hit,
    Missed,
}

/// A move slot: one move definition plus its PP and disable countdown
#[derive(Debug, Clone)]
pub struct BattleMove {
    data: Arc<MoveData>,
    pp: u8,
    disabled_for: u8,
}

impl BattleMove {
    pub fn new(data: Arc<MoveData>) -> Self {
        Self {
            pp: data.pp,
            disabled_for: 0,
            data,
        }
    }

    pub fn data(&self) -> &Arc<MoveData> {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn pp(&self) -> u8 {
        self.pp
    }

    pub fn max_pp(&self) -> u8 {
        self.data.pp
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled_for > 0
    }

    /// Rounds left before the move can be used again
    pub fn disabled_for(&self) -> u8 {
        self.disabled_for
    }

    pub fn disable(&mut self, rounds: u8) {
        self.disabled_for = rounds;
    }

    /// Count one round off the disable countdown, returns true when this tick
    /// made the move usable again
    pub fn tick_disable(&mut self) -> bool {
        if self.disabled_for == 0 {
            return false;
        }
        self.disabled_for -= 1;
        self.disabled_for == 0
    }

    /// Why the move cannot be used right now, if it can't
    pub fn unusable_reason(&self) -> Option<CantReason> {
        if self.is_disabled() {
            Some(CantReason::Disabled)
        } else if self.pp == 0 {
            Some(CantReason::NoPp)
        } else {
            None
        }
    }

    pub fn can_be_used(&self) -> bool {
        self.unusable_reason().is_none()
    }

    /// Whether this slot still holds the given definition
    pub fn holds(&self, data: &Arc<MoveData>) -> bool {
        Arc::ptr_eq(&self.data, data)
    }

    /// Use the move as the context's attacker
    pub fn execute(&mut self, ctx: &mut BattleContext<'_>) -> Result<MoveOutcome, BattleError> {
        ctx.current_move = Arc::clone(&self.data);
        let data = Arc::clone(&self.data);

        // The recharge turn replays only the trailing recharge effect
        if ctx.attacker.active().recharging {
            if let Some(effect) = data.effects.last() {
                effect.apply(ctx)?;
            }
            ctx.attacker.active_mut().recharging = false;
            return Ok(MoveOutcome::Recharged);
        }

        if let Some(reason) = self.unusable_reason() {
            let pokemon = ctx.attacker_ident();
            ctx.emit(BattleEvent::Cant {
                pokemon,
                reason,
                move_name: data.name.clone(),
            });
            return Ok(MoveOutcome::Unusable(reason));
        }

        let pokemon = ctx.attacker_ident();
        ctx.emit(BattleEvent::Move {
            pokemon,
            move_name: data.name.clone(),
        });

        let was_charging = ctx.attacker.active().charging;
        let hit = accuracy::does_move_hit(
            &data,
            ctx.attacker.active(),
            ctx.defender.active(),
            ctx.rng,
        );
        debug!(move_name = %data.name, hit, "accuracy check");

        if hit {
            run_effects(ordered(&data.effects, |_| true), ctx)?;
        } else {
            run_effects(ordered(&data.effects, MoveEffect::always_fires), ctx)?;
        }

        // Only a move with its own charge turn starts charging for free; a
        // charge move called through Metronome or Mirror Move does not count
        let entered_charge =
            data.has_charge_turn() && !was_charging && ctx.attacker.active().charging;
        if !hit && !entered_charge {
            let source = ctx.attacker_ident();
            let target = ctx.defender_ident();
            ctx.emit(BattleEvent::Miss { source, target });
            ctx.last_damage = None;
        }
        if hit && data.category == MoveCategory::Status {
            ctx.last_damage = None;
        }

        // The turn spent charging is free
        if !entered_charge {
            self.pp = self.pp.saturating_sub(1);
        }
        ctx.last_move = Some(LastMove {
            side: ctx.attacker.side(),
            slot: ctx.current_slot,
            data,
        });

        Ok(if hit {
            MoveOutcome::Hit
        } else {
            MoveOutcome::Missed
        })
    }
}

/// Effects matching `filter`, with self-destruction moved to the end
fn ordered<'e>(
    effects: &'e [MoveEffect],
    filter: impl Fn(&MoveEffect) -> bool + Copy + 'e,
) -> impl Iterator<Item = &'e MoveEffect> + 'e {
    let immediate = effects
        .iter()
        .filter(move |e| filter(e) && !e.is_deferred());
    let deferred = effects.iter().filter(move |e| filter(e) && e.is_deferred());
    immediate.chain(deferred)
}

/// Apply effects in order, stopping once the attacker starts charging
fn run_effects<'e>(
    effects: impl Iterator<Item = &'e MoveEffect>,
    ctx: &mut BattleContext<'_>,
) -> Result<(), BattleError> {
    for effect in effects {
        effect.apply(ctx)?;
        if ctx.attacker.active().charging {
            break;
        }
    }
    Ok(())
}
