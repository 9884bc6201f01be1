//! Battle-wide rule switches

/// How computed hit values are narrowed to a single byte
///
/// Damage, fixed damage, counter, half-HP cuts and recoil are byte-sized in the
/// reference rules. `Wrapping` keeps only the low 8 bits (a 300-point hit
/// deals 44), matching that behavior exactly. `Saturating` clamps at 255.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DamageOverflow {
    Wrapping,
    #[default]
    Saturating,
}

impl DamageOverflow {
    pub fn narrow(self, value: u32) -> u16 {
        match self {
            DamageOverflow::Wrapping => (value as u8) as u16,
            DamageOverflow::Saturating => value.min(u8::MAX as u32) as u16,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct BattleRules {
    pub damage_overflow: DamageOverflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_keeps_low_byte() {
        assert_eq!(DamageOverflow::Wrapping.narrow(200), 200);
        assert_eq!(DamageOverflow::Wrapping.narrow(300), 44);
        assert_eq!(DamageOverflow::Wrapping.narrow(256), 0);
    }

    #[test]
    fn test_saturating_clamps() {
        assert_eq!(DamageOverflow::Saturating.narrow(200), 200);
        assert_eq!(DamageOverflow::Saturating.narrow(300), 255);
        assert_eq!(BattleRules::default().damage_overflow, DamageOverflow::Saturating);
    }
}
