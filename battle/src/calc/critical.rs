//! Critical hit check

use crate::combatant::BattlePokemon;
use crate::rng::BattleRng;
use crate::types::CritRatio;

/// Byte-scale critical threshold from the attacker's base speed
pub fn crit_threshold(base_speed: u16, ratio: CritRatio) -> u32 {
    let threshold = (base_speed as u32 + 76) / 4;
    match ratio {
        CritRatio::Normal => threshold.min(255),
        CritRatio::High => threshold,
    }
}

/// Roll for a critical hit; always draws once
pub fn is_critical(attacker: &BattlePokemon, ratio: CritRatio, rng: &mut BattleRng) -> bool {
    let threshold = crit_threshold(attacker.species().base_stats.speed, ratio);
    rng.below(256) < threshold
}
