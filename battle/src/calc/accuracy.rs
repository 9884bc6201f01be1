//! Accuracy check

use crate::combatant::BattlePokemon;
use crate::rng::BattleRng;
use crate::types::{MoveData, MoveTarget, accuracy_multiplier, evasion_multiplier};

/// Byte-scale hit threshold for a move accuracy (1-100) and the two stages
///
/// Clamped to `[1, 255]`, so even the worst matchup keeps a 1/256 chance.
pub fn hit_threshold(accuracy: u8, accuracy_stage: i8, evasion_stage: i8) -> u32 {
    // Round half up
    let base = (accuracy as u32 * 255 + 50) / 100;
    let scaled = accuracy_multiplier(accuracy_stage).apply(base);
    let scaled = evasion_multiplier(evasion_stage).apply(scaled);
    scaled.clamp(1, 255)
}

/// Roll whether `data` used by `attacker` connects with `defender`
///
/// Self-targeted moves, moves without an accuracy, and attacks into a fainted
/// or semi-invulnerable defender are decided without drawing.
pub fn does_move_hit(
    data: &MoveData,
    attacker: &BattlePokemon,
    defender: &BattlePokemon,
    rng: &mut BattleRng,
) -> bool {
    if data.target == MoveTarget::User {
        return true;
    }
    if defender.is_fainted() || defender.invulnerable {
        return false;
    }
    let Some(accuracy) = data.accuracy else {
        return true;
    };

    let threshold = hit_threshold(
        accuracy,
        attacker.stages.get(stadium_protocol::Stat::Accuracy),
        defender.stages.get(stadium_protocol::Stat::Evasion),
    );
    rng.below(256) <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MoveBuilder, mon};
    use crate::types::{MoveCategory, Type};
    use stadium_protocol::Stat;

    fn pair() -> (BattlePokemon, BattlePokemon) {
        let tackle = MoveBuilder::new("Tackle").build();
        (
            mon("Rattata", &[Type::Normal], vec![tackle.clone()]),
            mon("Pidgey", &[Type::Normal, Type::Flying], vec![tackle]),
        )
    }

    #[test]
    fn test_threshold_rounds_half_up() {
        assert_eq!(hit_threshold(100, 0, 0), 255);
        assert_eq!(hit_threshold(95, 0, 0), 242);
        assert_eq!(hit_threshold(70, 0, 0), 179);
        assert_eq!(hit_threshold(30, 0, 0), 77);
    }

    #[test]
    fn test_threshold_applies_stages() {
        assert_eq!(hit_threshold(100, -1, 0), 255 * 75 / 100);
        // Evasion looks up the negated stage: -1 becomes 133/100, then clamps
        assert_eq!(hit_threshold(100, 0, -1), 255);
        assert_eq!(hit_threshold(50, 0, 1), 128 * 75 / 100);
    }

    #[test]
    fn test_threshold_floor_is_one() {
        // 3 * 1/3 = 1, * 1/3 = 0 before the clamp
        assert_eq!(hit_threshold(1, -6, 6), 1);
    }

    #[test]
    fn test_low_accuracy_against_top_evasion() {
        // 77 * 1/3; the floor does not come into play
        assert_eq!(hit_threshold(30, 0, 6), 25);
    }

    #[test]
    fn test_certain_hits_do_not_draw() {
        let (attacker, defender) = pair();
        let mut rng = crate::rng::BattleRng::seeded(3);

        let swift = MoveBuilder::new("Swift").accuracy(None).build();
        let growl = MoveBuilder::new("Harden")
            .category(MoveCategory::Status)
            .target(MoveTarget::User)
            .build();

        assert!(does_move_hit(&swift, &attacker, &defender, &mut rng));
        assert!(does_move_hit(&growl, &attacker, &defender, &mut rng));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_invulnerable_or_fainted_defender_is_missed_without_draw() {
        let (attacker, mut defender) = pair();
        let mut rng = crate::rng::BattleRng::seeded(3);
        let tackle = MoveBuilder::new("Tackle").build();

        defender.invulnerable = true;
        assert!(!does_move_hit(&tackle, &attacker, &defender, &mut rng));

        defender.invulnerable = false;
        defender.faint();
        assert!(!does_move_hit(&tackle, &attacker, &defender, &mut rng));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_full_accuracy_hits_nearly_always() {
        let (attacker, mut defender) = pair();
        let mut rng = crate::rng::BattleRng::seeded(11);
        let tackle = MoveBuilder::new("Tackle").build();

        // Threshold 255 covers every draw
        let hits = (0..500)
            .filter(|_| does_move_hit(&tackle, &attacker, &defender, &mut rng))
            .count();
        assert_eq!(hits, 500);
        assert_eq!(rng.draws(), 500);

        defender.stages.set(Stat::Evasion, 6);
        let mut attacker = attacker;
        attacker.stages.set(Stat::Accuracy, -6);
        let weak = MoveBuilder::new("Weak").accuracy(Some(1)).build();
        let hits = (0..2000)
            .filter(|_| does_move_hit(&weak, &attacker, &defender, &mut rng))
            .count();
        // threshold 1: draws 0 and 1 hit, about 2/256
        assert!(hits < 60, "hits = {}", hits);
    }
}
