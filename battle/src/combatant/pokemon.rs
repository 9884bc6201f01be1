//! Per-combatant battle state

use std::sync::Arc;

use stadium_protocol::Stat;

use super::battle_move::BattleMove;
use crate::types::{BattleStats, Species, StatStages, Type, stage_multiplier};

/// One roster entry's mutable state during a battle
#[derive(Debug, Clone)]
pub struct BattlePokemon {
    species: Arc<Species>,
    level: u8,
    stats: BattleStats,

    // === HP === (fainted is derived: hp == 0)
    hp: u16,

    // === Combat state (reset on switch-in) ===
    /// Stat stage modifiers
    pub stages: StatStages,

    /// Current types (TypeChange can replace them)
    pub types: Vec<Type>,

    /// Move slots, each with its own PP and disable countdown
    pub moves: Vec<BattleMove>,

    /// Semi-invulnerable turn of a two-turn move (Dig, Fly)
    pub invulnerable: bool,

    /// First turn of a two-turn move has been taken
    pub charging: bool,

    /// Must spend the next action recharging
    pub recharging: bool,
}

impl BattlePokemon {
    pub fn new(species: Arc<Species>, level: u8) -> Self {
        let stats = BattleStats::derive(&species.base_stats, level);
        Self {
            types: species.types.clone(),
            moves: fresh_moves(&species),
            hp: stats.max_hp,
            stages: StatStages::new(),
            invulnerable: false,
            charging: false,
            recharging: false,
            species,
            level,
            stats,
        }
    }

    pub fn name(&self) -> &str {
        &self.species.name
    }

    pub fn species(&self) -> &Species {
        &self.species
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn stats(&self) -> &BattleStats {
        &self.stats
    }

    pub fn hp(&self) -> u16 {
        self.hp
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.hp == self.stats.max_hp
    }

    pub fn has_type(&self, t: Type) -> bool {
        self.types.contains(&t)
    }

    /// Lose up to `amount` HP, returns HP actually lost
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let taken = amount.min(self.hp);
        self.hp -= taken;
        taken
    }

    /// Regain up to `amount` HP, returns HP actually restored
    pub fn restore_hp(&mut self, amount: u16) -> u16 {
        let restored = amount.min(self.stats.max_hp - self.hp);
        self.hp += restored;
        restored
    }

    pub fn faint(&mut self) {
        self.hp = 0;
    }

    /// Stat used in damage and turn-order math; critical hits ignore stages
    pub fn effective_stat(&self, stat: Stat, critical: bool) -> u32 {
        let raw = self.stats.get(stat).unwrap_or(0) as u32;
        if critical {
            raw
        } else {
            stage_multiplier(self.stages.get(stat)).apply(raw)
        }
    }

    /// Stage-modified speed
    pub fn speed(&self) -> u32 {
        self.effective_stat(Stat::Spe, false)
    }

    /// Reset volatile state for a fresh entry onto the field
    pub fn switch_in(&mut self) {
        self.stages.clear();
        self.types = self.species.types.clone();
        self.moves = fresh_moves(&self.species);
        self.invulnerable = false;
        self.charging = false;
        self.recharging = false;
    }

    /// Advance every disable countdown by one round, returns names of moves
    /// that became usable again
    pub fn tick_disables(&mut self) -> Vec<String> {
        self.moves
            .iter_mut()
            .filter_map(|m| m.tick_disable().then(|| m.name().to_string()))
            .collect()
    }
}

fn fresh_moves(species: &Species) -> Vec<BattleMove> {
    species
        .moves
        .iter()
        .map(|data| BattleMove::new(Arc::clone(data)))
        .collect()
}
