//! Battle setup read from a JSON config file

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stadium_battle::{BattleRng, BattleRules, DamageOverflow};

use crate::error::DexError;

pub const DEFAULT_LEVEL: u8 = 50;
pub const DEFAULT_TEAM_SIZE: usize = 3;
pub const MAX_TEAM_SIZE: usize = 6;

/// Level, team size, seed and overflow mode for a battle
///
/// Every field is optional in the file:
///
/// ```json
/// { "level": 60, "teamSize": 6, "seed": 7, "damageOverflow": "wrapping" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattleConfig {
    /// Level of every combatant (1-100)
    pub level: u8,
    /// Combatants per trainer (1-6)
    pub team_size: usize,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    pub damage_overflow: DamageOverflow,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            team_size: DEFAULT_TEAM_SIZE,
            seed: None,
            damage_overflow: DamageOverflow::default(),
        }
    }
}

impl BattleConfig {
    /// Parse and validate a config
    pub fn from_json(json: &str) -> Result<Self, DexError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DexError> {
        Self::from_json(&fs::read_to_string(path.as_ref())?)
    }

    pub fn validate(&self) -> Result<(), DexError> {
        if !(1..=100).contains(&self.level) {
            return Err(DexError::InvalidConfig(format!(
                "level {} is outside 1-100",
                self.level
            )));
        }
        if !(1..=MAX_TEAM_SIZE).contains(&self.team_size) {
            return Err(DexError::InvalidConfig(format!(
                "team size {} is outside 1-{}",
                self.team_size, MAX_TEAM_SIZE
            )));
        }
        Ok(())
    }

    pub fn rules(&self) -> BattleRules {
        BattleRules {
            damage_overflow: self.damage_overflow,
        }
    }

    /// The battle's random stream: seeded when a seed is configured
    pub fn rng(&self) -> BattleRng {
        match self.seed {
            Some(seed) => BattleRng::seeded(seed),
            None => BattleRng::from_entropy(),
        }
    }
}
