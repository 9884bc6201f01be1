//! Shared fixtures for the battle integration tests.
//!
//! Moves and species are built directly from the public data types, and
//! decisions come from scripted providers so every scenario is independent of
//! the random stream except where a test says otherwise.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use stadium_battle::{
    BaseStats, BattlePokemon, CritRatio, DecisionProvider, MoveCatalog, MoveCategory, MoveData,
    MoveEffect, MoveTarget, Species, Trainer, Type,
};
use stadium_protocol::{BattleEvent, BattleRequest, Choice, LogEntry, Player};

pub const LEVEL: u8 = 50;

pub fn damage() -> MoveEffect {
    MoveEffect::Damage {
        crit_ratio: CritRatio::Normal,
    }
}

/// A never-missing Normal physical move
pub fn attack(name: &str, power: u16, priority: i8, effects: Vec<MoveEffect>) -> Arc<MoveData> {
    Arc::new(MoveData {
        name: name.to_string(),
        move_type: Type::Normal,
        category: MoveCategory::Physical,
        power: Some(power),
        accuracy: Some(100),
        pp: 10,
        priority,
        target: MoveTarget::Enemy,
        effects,
    })
}

pub fn tackle() -> Arc<MoveData> {
    attack("Tackle", 40, 0, vec![damage()])
}

pub fn quick_attack() -> Arc<MoveData> {
    attack("Quick Attack", 40, 1, vec![damage()])
}

pub fn solar_beam() -> Arc<MoveData> {
    attack(
        "Solar Beam",
        120,
        0,
        vec![
            MoveEffect::ChargingTurn {
                semi_invulnerable: false,
                recharge: false,
            },
            damage(),
        ],
    )
}

pub fn hyper_beam() -> Arc<MoveData> {
    attack(
        "Hyper Beam",
        150,
        0,
        vec![
            damage(),
            MoveEffect::ChargingTurn {
                semi_invulnerable: false,
                recharge: true,
            },
        ],
    )
}

pub fn explosion() -> Arc<MoveData> {
    attack("Explosion", 170, 0, vec![damage(), MoveEffect::Selfdestruct])
}

pub fn counter() -> Arc<MoveData> {
    attack(
        "Counter",
        1,
        -1,
        vec![MoveEffect::CounterDamage {
            category: MoveCategory::Physical,
        }],
    )
}

pub fn catalog(moves: &[Arc<MoveData>]) -> Arc<MoveCatalog> {
    Arc::new(moves.iter().map(|m| m.as_ref().clone()).collect())
}

/// Normal-type combatant; only the base speed varies between fixtures
pub fn mon(name: &str, speed: u16, moves: Vec<Arc<MoveData>>) -> BattlePokemon {
    let species = Species {
        id: 0,
        name: name.to_string(),
        types: vec![Type::Normal],
        base_stats: BaseStats {
            hp: 100,
            attack: 80,
            defense: 80,
            special_attack: 80,
            special_defense: 80,
            speed,
        },
        moves,
    };
    BattlePokemon::new(Arc::new(species), LEVEL)
}

/// Combatant already worn down to one HP
pub fn wounded(name: &str, speed: u16, moves: Vec<Arc<MoveData>>) -> BattlePokemon {
    let mut pokemon = mon(name, speed, moves);
    pokemon.take_damage(pokemon.max_hp() - 1);
    pokemon
}

pub fn trainer(name: &str, roster: Vec<BattlePokemon>) -> Trainer {
    Trainer::new(name, roster).expect("fixture rosters are never empty")
}

/// Provider that replays a fixed list of choices, then keeps using slot 0
#[derive(Debug, Default)]
pub struct Script {
    choices: VecDeque<Choice>,
    pub requests: Vec<BattleRequest>,
    pub replacements: Vec<BattleRequest>,
}

impl Script {
    pub fn new(choices: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Always uses the first move
    pub fn first_move() -> Self {
        Self::default()
    }
}

impl DecisionProvider for Script {
    fn choose_action(&mut self, request: &BattleRequest) -> Choice {
        self.requests.push(request.clone());
        self.choices.pop_front().unwrap_or(Choice::Move(0))
    }

    fn choose_replacement(&mut self, request: &BattleRequest) -> usize {
        self.replacements.push(request.clone());
        request.switch_targets().next().unwrap_or(0)
    }
}

pub fn events(log: &[LogEntry]) -> Vec<&BattleEvent> {
    log.iter().map(|entry| &entry.event).collect()
}

/// Sides in the order their `move` events appear on `turn`
pub fn movers(log: &[LogEntry], turn: u32) -> Vec<Player> {
    log.iter()
        .filter(|entry| entry.turn == turn)
        .filter_map(|entry| match &entry.event {
            BattleEvent::Move { pokemon, .. } => Some(pokemon.player),
            _ => None,
        })
        .collect()
}
