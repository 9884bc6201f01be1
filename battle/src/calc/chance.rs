//! Secondary effect chance

use crate::rng::BattleRng;

/// Whether a secondary effect with `chance` percent fires
///
/// No chance configured means the effect always fires and nothing is drawn.
pub fn secondary_effect_occurs(chance: Option<u8>, rng: &mut BattleRng) -> bool {
    let Some(chance) = chance else {
        return true;
    };
    let threshold = chance as u32 * 255 / 100;
    rng.below(256) <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_chance_always_fires() {
        let mut rng = BattleRng::seeded(0);
        assert!(secondary_effect_occurs(None, &mut rng));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_full_chance_always_fires() {
        let mut rng = BattleRng::seeded(9);
        assert!((0..300).all(|_| secondary_effect_occurs(Some(100), &mut rng)));
        assert_eq!(rng.draws(), 300);
    }

    #[test]
    fn test_low_chance_is_rare() {
        let mut rng = BattleRng::seeded(9);
        let fired = (0..4096)
            .filter(|_| secondary_effect_occurs(Some(10), &mut rng))
            .count();
        // threshold 25: 26 of 256 draws fire, about 416 of 4096
        assert!((300..550).contains(&fired), "fired = {}", fired);
    }
}
