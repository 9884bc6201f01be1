//! Stat blocks, stat stages and the stage multiplier tables

use stadium_protocol::Stat;

/// Exact rational multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: u32,
    pub denominator: u32,
}

impl Fraction {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Multiply then integer-divide
    pub fn apply(self, value: u32) -> u32 {
        value * self.numerator / self.denominator
    }

    pub fn as_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Multipliers for attack, defense, special and speed stages, indexed by stage + 6
#[rustfmt::skip]
pub const PRIMARY_STAGE_MULTIPLIERS: [Fraction; 13] = [
    Fraction::new(25, 100), Fraction::new(28, 100), Fraction::new(33, 100),
    Fraction::new(40, 100), Fraction::new(50, 100), Fraction::new(66, 100),
    Fraction::new(100, 100),
    Fraction::new(150, 100), Fraction::new(200, 100), Fraction::new(250, 100),
    Fraction::new(300, 100), Fraction::new(350, 100), Fraction::new(400, 100),
];

/// Multipliers for accuracy stages, indexed by stage + 6; evasion reads it negated
#[rustfmt::skip]
pub const ACCURACY_STAGE_MULTIPLIERS: [Fraction; 13] = [
    Fraction::new(1, 3), Fraction::new(36, 100), Fraction::new(43, 100),
    Fraction::new(50, 100), Fraction::new(66, 100), Fraction::new(75, 100),
    Fraction::new(1, 1),
    Fraction::new(133, 100), Fraction::new(166, 100), Fraction::new(200, 100),
    Fraction::new(233, 100), Fraction::new(266, 100), Fraction::new(3, 1),
];

fn table_index(stage: i8) -> usize {
    (stage.clamp(-6, 6) + 6) as usize
}

/// Multiplier for a primary stat stage
pub fn stage_multiplier(stage: i8) -> Fraction {
    PRIMARY_STAGE_MULTIPLIERS[table_index(stage)]
}

/// Multiplier applied for the attacker's accuracy stage
pub fn accuracy_multiplier(stage: i8) -> Fraction {
    ACCURACY_STAGE_MULTIPLIERS[table_index(stage)]
}

/// Multiplier applied for the defender's evasion stage
pub fn evasion_multiplier(stage: i8) -> Fraction {
    ACCURACY_STAGE_MULTIPLIERS[table_index(-stage.clamp(-6, 6))]
}

/// Stat stages (-6 to +6)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatStages {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl StatStages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    /// Set stage for a stat (clamped to -6..+6)
    pub fn set(&mut self, stat: Stat, value: i8) {
        let clamped = value.clamp(-6, 6);
        match stat {
            Stat::Atk => self.atk = clamped,
            Stat::Def => self.def = clamped,
            Stat::Spa => self.spa = clamped,
            Stat::Spd => self.spd = clamped,
            Stat::Spe => self.spe = clamped,
            Stat::Accuracy => self.accuracy = clamped,
            Stat::Evasion => self.evasion = clamped,
        }
    }

    /// Shift a stage by `amount`, returns the change actually applied
    pub fn boost(&mut self, stat: Stat, amount: i8) -> i8 {
        let current = self.get(stat);
        let new_value = current.saturating_add(amount).clamp(-6, 6);
        self.set(stat, new_value);
        new_value - current
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_clear(&self) -> bool {
        Stat::ALL.iter().all(|stat| self.get(*stat) == 0)
    }
}

/// Species base stat block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

/// Stats derived from a base block and a level, before stage modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStats {
    pub max_hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl BattleStats {
    pub fn derive(base: &BaseStats, level: u8) -> Self {
        let level = level as u32;
        let scale = |value: u16, bonus: u32| {
            (2 * value as u32 * level / 100 + bonus).min(u16::MAX as u32) as u16
        };

        Self {
            max_hp: scale(base.hp, level + 10),
            attack: scale(base.attack, 5),
            defense: scale(base.defense, 5),
            special_attack: scale(base.special_attack, 5),
            special_defense: scale(base.special_defense, 5),
            speed: scale(base.speed, 5),
        }
    }

    /// Unmodified value of a staged stat; accuracy and evasion have no base value
    pub fn get(&self, stat: Stat) -> Option<u16> {
        match stat {
            Stat::Atk => Some(self.attack),
            Stat::Def => Some(self.defense),
            Stat::Spa => Some(self.special_attack),
            Stat::Spd => Some(self.special_defense),
            Stat::Spe => Some(self.speed),
            Stat::Accuracy | Stat::Evasion => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stages_are_zero() {
        let stages = StatStages::new();
        assert!(stages.is_clear());
        assert_eq!(stages.get(Stat::Evasion), 0);
    }

    #[test]
    fn test_set_clamps_to_bounds() {
        let mut stages = StatStages::new();
        stages.set(Stat::Atk, 10);
        assert_eq!(stages.atk, 6);

        stages.set(Stat::Def, -10);
        assert_eq!(stages.def, -6);
    }

    #[test]
    fn test_boost_reports_actual_change() {
        let mut stages = StatStages::new();
        assert_eq!(stages.boost(Stat::Atk, 2), 2);

        stages.atk = 5;
        assert_eq!(stages.boost(Stat::Atk, 3), 1);
        assert_eq!(stages.atk, 6);
        assert_eq!(stages.boost(Stat::Atk, 1), 0);

        stages.def = -5;
        assert_eq!(stages.boost(Stat::Def, -3), -1);
        assert_eq!(stages.def, -6);
        assert_eq!(stages.boost(Stat::Def, i8::MIN), 0);
    }

    #[test]
    fn test_clear() {
        let mut stages = StatStages {
            atk: 3,
            def: -2,
            spa: 1,
            spd: -1,
            spe: 6,
            accuracy: 2,
            evasion: -3,
        };

        stages.clear();
        assert!(stages.is_clear());
    }

    #[test]
    fn test_primary_multiplier_endpoints() {
        assert_eq!(stage_multiplier(0), Fraction::new(100, 100));
        assert_eq!(stage_multiplier(-6), Fraction::new(25, 100));
        assert_eq!(stage_multiplier(6), Fraction::new(400, 100));
        assert_eq!(stage_multiplier(9), stage_multiplier(6));
    }

    #[test]
    fn test_primary_multipliers_are_reciprocal_pairs() {
        for stage in -6..=6i8 {
            let product = stage_multiplier(stage).as_f64() * stage_multiplier(-stage).as_f64();
            assert!((product - 1.0).abs() <= 0.03, "stage {} gives {}", stage, product);
        }
    }

    #[test]
    fn test_primary_multipliers_are_monotonic() {
        for stage in -6..6i8 {
            assert!(stage_multiplier(stage).as_f64() < stage_multiplier(stage + 1).as_f64());
        }
    }

    #[test]
    fn test_evasion_reads_negated_accuracy_stage() {
        assert_eq!(evasion_multiplier(6), Fraction::new(1, 3));
        assert_eq!(evasion_multiplier(-6), Fraction::new(3, 1));
        assert_eq!(evasion_multiplier(1), accuracy_multiplier(-1));
        assert_eq!(accuracy_multiplier(0), Fraction::new(1, 1));
    }

    #[test]
    fn test_fraction_apply_truncates() {
        assert_eq!(Fraction::new(66, 100).apply(100), 66);
        assert_eq!(Fraction::new(1, 3).apply(77), 25);
        assert_eq!(Fraction::new(150, 100).apply(55), 82);
    }

    #[test]
    fn test_derive_stats() {
        let base = BaseStats {
            hp: 35,
            attack: 55,
            defense: 30,
            special_attack: 50,
            special_defense: 40,
            speed: 90,
        };

        let stats = BattleStats::derive(&base, 50);
        assert_eq!(stats.max_hp, 35 + 50 + 10);
        assert_eq!(stats.attack, 55 + 5);
        assert_eq!(stats.defense, 30 + 5);
        assert_eq!(stats.speed, 90 + 5);

        let stats = BattleStats::derive(&base, 7);
        // 2*35*7/100 = 4
        assert_eq!(stats.max_hp, 4 + 7 + 10);
        // 2*90*7/100 = 12
        assert_eq!(stats.speed, 12 + 5);
    }

    #[test]
    fn test_derive_saturates_oversized_base() {
        let base = BaseStats {
            hp: u16::MAX,
            attack: 400,
            ..BaseStats::default()
        };

        let stats = BattleStats::derive(&base, 100);
        assert_eq!(stats.max_hp, u16::MAX);
        assert_eq!(stats.attack, 805);
        assert_eq!(stats.defense, 5);
    }
}
