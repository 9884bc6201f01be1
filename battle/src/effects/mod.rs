//! Move effects
//!
//! A move is a list of [`MoveEffect`]s applied in order once the accuracy roll
//! connects. Each effect reads and writes battle state only through the
//! [`BattleContext`] of the current sub-action, and reports what happened as
//! log events. A few effects (charging turns, self-destruction) also run on a
//! miss; see [`MoveEffect::always_fires`].

mod control;
mod damage;
mod hp;
mod invoke;
mod stats;

pub use damage::roll_hits;

use stadium_protocol::{BattleEvent, Stat};

use crate::engine::BattleContext;
use crate::error::BattleError;
use crate::types::{CritRatio, MoveCategory, MoveTarget};

/// How a copying move treats the copied move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CopyMode {
    /// Replace the copying move's slot with a random move of the defender (Mimic)
    Learn,
    /// Use the last move anyone used (Mirror Move)
    Repeat,
}

/// One step of a move's behavior
#[derive(Debug, Clone, PartialEq)]
pub enum MoveEffect {
    /// Standard damage formula with one critical roll
    Damage { crit_ratio: CritRatio },

    /// Several hits sharing one critical roll
    Multistrike {
        crit_ratio: CritRatio,
        min_hits: u8,
        max_hits: u8,
    },

    /// Set damage, or the user's level when unset
    FixedDamage { amount: Option<u16> },

    OneHitKo,

    /// Halve the defender's remaining HP
    CutHalfHp,

    /// Double the last damage back, when the last move had this category
    CounterDamage { category: MoveCategory },

    /// User takes `percent` of the last damage
    Recoil { percent: u8 },

    /// User heals `percent` of the last damage
    Drain { percent: u8 },

    /// User heals `percent` of its max HP
    RecoverHp { percent: u8 },

    /// User faints once the rest of the move has resolved
    Selfdestruct,

    StatChange {
        target: MoveTarget,
        stat: Stat,
        /// -6..=6, never 0
        stages: i8,
        /// Percent chance; `None` always applies
        chance: Option<u8>,
    },

    /// Clear every stage on both active combatants
    StatChangeReset,

    /// User takes on the defender's primary type
    TypeChange,

    /// Disable the move the defender used last
    Disable,

    /// Two-turn lock: charge first then strike, or strike first then recharge
    ChargingTurn {
        semi_invulnerable: bool,
        recharge: bool,
    },

    CopyMove { mode: CopyMode },

    /// Use a random move from the catalog (Metronome)
    RandomMove,
}

impl MoveEffect {
    /// Apply this effect to the context's attacker and defender
    pub fn apply(&self, ctx: &mut BattleContext<'_>) -> Result<(), BattleError> {
        match *self {
            MoveEffect::Damage { crit_ratio } => damage::apply_damage(ctx, crit_ratio),
            MoveEffect::Multistrike {
                crit_ratio,
                min_hits,
                max_hits,
            } => damage::apply_multistrike(ctx, crit_ratio, min_hits, max_hits),
            MoveEffect::FixedDamage { amount } => damage::apply_fixed(ctx, amount),
            MoveEffect::OneHitKo => damage::apply_one_hit_ko(ctx),
            MoveEffect::CutHalfHp => damage::apply_cut_half(ctx),
            MoveEffect::CounterDamage { category } => damage::apply_counter(ctx, category),
            MoveEffect::Recoil { percent } => hp::apply_recoil(ctx, percent),
            MoveEffect::Drain { percent } => hp::apply_drain(ctx, percent),
            MoveEffect::RecoverHp { percent } => hp::apply_recover(ctx, percent),
            MoveEffect::Selfdestruct => hp::apply_selfdestruct(ctx),
            MoveEffect::StatChange {
                target,
                stat,
                stages,
                chance,
            } => stats::apply_stat_change(ctx, target, stat, stages, chance),
            MoveEffect::StatChangeReset => stats::apply_reset(ctx),
            MoveEffect::TypeChange => stats::apply_type_change(ctx),
            MoveEffect::Disable => control::apply_disable(ctx),
            MoveEffect::ChargingTurn {
                semi_invulnerable,
                recharge,
            } => control::apply_charging_turn(ctx, semi_invulnerable, recharge),
            MoveEffect::CopyMove { mode } => invoke::apply_copy(ctx, mode),
            MoveEffect::RandomMove => invoke::apply_random(ctx),
        }
    }

    /// Effects that still run when the accuracy roll misses
    pub fn always_fires(&self) -> bool {
        matches!(self, MoveEffect::ChargingTurn { .. } | MoveEffect::Selfdestruct)
    }

    /// Effects held back until every other effect of the move has run
    pub fn is_deferred(&self) -> bool {
        matches!(self, MoveEffect::Selfdestruct)
    }

    /// Data-file name of this effect kind
    pub fn kind(&self) -> &'static str {
        match self {
            MoveEffect::Damage { .. } => "Damage",
            MoveEffect::Multistrike { .. } => "Multistrike",
            MoveEffect::FixedDamage { .. } => "FixedDamage",
            MoveEffect::OneHitKo => "OneHitKo",
            MoveEffect::CutHalfHp => "CutHalfHp",
            MoveEffect::CounterDamage { .. } => "CounterDamage",
            MoveEffect::Recoil { .. } => "Recoil",
            MoveEffect::Drain { .. } => "Drain",
            MoveEffect::RecoverHp { .. } => "RecoverHp",
            MoveEffect::Selfdestruct => "Selfdestruct",
            MoveEffect::StatChange { .. } => "StatChange",
            MoveEffect::StatChangeReset => "StatChangeReset",
            MoveEffect::TypeChange => "TypeChange",
            MoveEffect::Disable => "Disable",
            MoveEffect::ChargingTurn { .. } => "ChargingTurn",
            MoveEffect::CopyMove { .. } => "CopyMove",
            MoveEffect::RandomMove => "RandomMove",
        }
    }
}

// === Shared helpers ===

/// Type multiplier of the current move against the defender's current types
fn effectiveness(ctx: &BattleContext<'_>) -> f32 {
    ctx.current_move
        .move_type
        .effectiveness_multi(&ctx.defender.active().types)
}

/// Log the effectiveness tier; neutral hits log nothing
fn announce_effectiveness(ctx: &mut BattleContext<'_>, effectiveness: f32) {
    let target = ctx.defender_ident();
    let event = if effectiveness == 0.0 {
        BattleEvent::Immune(target)
    } else if effectiveness > 1.0 {
        BattleEvent::SuperEffective(target)
    } else if effectiveness < 1.0 {
        BattleEvent::Resisted(target)
    } else {
        return;
    };
    ctx.emit(event);
}

/// Deal `amount` to the defender, logging the HP lost and a faint
fn hit_defender(ctx: &mut BattleContext<'_>, amount: u16) -> u16 {
    let taken = ctx.defender.active_mut().take_damage(amount);
    let pokemon = ctx.defender_ident();
    if taken > 0 {
        let hp = ctx.defender.active().hp();
        ctx.emit(BattleEvent::Damage {
            pokemon: pokemon.clone(),
            amount: taken,
            hp,
        });
    }
    if ctx.defender.active().is_fainted() {
        ctx.emit(BattleEvent::Faint(pokemon));
    }
    taken
}
