//! Damage formula

use stadium_protocol::Stat;

use crate::combatant::BattlePokemon;
use crate::rng::BattleRng;
use crate::rules::DamageOverflow;
use crate::types::{MoveCategory, MoveData};

/// Per-hit inputs decided before the formula runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    pub critical: bool,
    /// Combined type multiplier against the defender
    pub effectiveness: f32,
}

impl Strike {
    pub fn new(critical: bool, effectiveness: f32) -> Self {
        Self {
            critical,
            effectiveness,
        }
    }
}

/// Byte-width stat emulation: if either stat no longer fits a byte, both are quartered
pub fn scale_stats(attack: u32, defense: u32) -> (u32, u32) {
    let (attack, defense) = if attack > 255 || defense > 255 {
        (attack / 4, defense / 4)
    } else {
        (attack, defense)
    };
    (attack, defense.max(1))
}

/// Core formula up to and including STAB, before effectiveness and the random roll
pub fn base_damage(level: u8, power: u16, attack: u32, defense: u32, critical: bool, stab: bool) -> u32 {
    let crit = if critical { 2 } else { 1 };
    let level_factor = 2 * level as u64 * crit / 5 + 2;
    let damage = level_factor * power as u64 * attack as u64 / defense.max(1) as u64 / 50 + 2;
    let damage = if stab { damage * 3 / 2 } else { damage };
    damage.min(u32::MAX as u64) as u32
}

/// Damage `data` deals from `attacker` to `defender`
///
/// Returns 0 without drawing when the defender is immune. Otherwise draws the
/// random factor once and never returns less than 1.
pub fn calculate(
    data: &MoveData,
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    strike: Strike,
    rng: &mut BattleRng,
    overflow: DamageOverflow,
) -> u16 {
    let (attack_stat, defense_stat) = match data.category {
        MoveCategory::Physical => (Stat::Atk, Stat::Def),
        _ => (Stat::Spa, Stat::Spd),
    };
    let (attack, defense) = scale_stats(
        attacker.effective_stat(attack_stat, strike.critical),
        defender.effective_stat(defense_stat, strike.critical),
    );

    let damage = base_damage(
        attacker.level(),
        data.power.unwrap_or(0),
        attack,
        defense,
        strike.critical,
        attacker.has_type(data.move_type),
    );

    if strike.effectiveness == 0.0 {
        return 0;
    }

    // Float to int casts saturate
    let damage = (damage as f64 * strike.effectiveness as f64) as u32;
    let roll = rng.range(217, 256);
    let damage = (damage as u64 * roll as u64 / 255).max(1);
    overflow.narrow(damage.min(u32::MAX as u64) as u32)
}
