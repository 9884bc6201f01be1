//! Fixtures shared by the unit tests

use std::sync::Arc;

use stadium_protocol::{BattleEvent, LogEntry, Player};

use crate::combatant::{BattlePokemon, Trainer};
use crate::effects::MoveEffect;
use crate::engine::{ActionEnv, BattleContext, Carryover};
use crate::rng::BattleRng;
use crate::rules::BattleRules;
use crate::types::{
    BaseStats, CritRatio, MoveCatalog, MoveCategory, MoveData, MoveTarget, Species, Type,
};

/// Builds move definitions with Tackle-like defaults
pub struct MoveBuilder {
    data: MoveData,
}

impl MoveBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            data: MoveData {
                name: name.to_string(),
                move_type: Type::Normal,
                category: MoveCategory::Physical,
                power: Some(40),
                accuracy: Some(100),
                pp: 35,
                priority: 0,
                target: MoveTarget::Enemy,
                effects: vec![MoveEffect::Damage {
                    crit_ratio: CritRatio::Normal,
                }],
            },
        }
    }

    pub fn move_type(mut self, move_type: Type) -> Self {
        self.data.move_type = move_type;
        self
    }

    pub fn category(mut self, category: MoveCategory) -> Self {
        self.data.category = category;
        self
    }

    pub fn special(self) -> Self {
        self.category(MoveCategory::Special)
    }

    /// Status category, no power
    pub fn status(mut self) -> Self {
        self.data.power = None;
        self.category(MoveCategory::Status)
    }

    pub fn power(mut self, power: u16) -> Self {
        self.data.power = Some(power);
        self
    }

    pub fn accuracy(mut self, accuracy: Option<u8>) -> Self {
        self.data.accuracy = accuracy;
        self
    }

    pub fn pp(mut self, pp: u8) -> Self {
        self.data.pp = pp;
        self
    }

    pub fn priority(mut self, priority: i8) -> Self {
        self.data.priority = priority;
        self
    }

    pub fn target(mut self, target: MoveTarget) -> Self {
        self.data.target = target;
        self
    }

    pub fn effects(mut self, effects: Vec<MoveEffect>) -> Self {
        self.data.effects = effects;
        self
    }

    pub fn build(self) -> Arc<MoveData> {
        Arc::new(self.data)
    }
}

pub fn species(name: &str, types: &[Type], base: [u16; 6], moves: Vec<Arc<MoveData>>) -> Arc<Species> {
    let [hp, attack, defense, special_attack, special_defense, speed] = base;
    Arc::new(Species {
        id: 0,
        name: name.to_string(),
        types: types.to_vec(),
        base_stats: BaseStats {
            hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
        },
        moves,
    })
}

/// Level 50 combatant with middling base stats
pub fn mon(name: &str, types: &[Type], moves: Vec<Arc<MoveData>>) -> BattlePokemon {
    BattlePokemon::new(species(name, types, [60, 60, 60, 60, 60, 60], moves), 50)
}

pub fn mon_at(name: &str, types: &[Type], base: [u16; 6], level: u8) -> BattlePokemon {
    BattlePokemon::new(species(name, types, base, Vec::new()), level)
}

/// Two trainers mid-battle, for driving moves and effects directly
///
/// Trainer 0 (Bulbasaur) attacks, trainer 1 (Snorlax) defends.
pub struct Arena {
    pub trainers: [Trainer; 2],
    pub rng: BattleRng,
    pub catalog: MoveCatalog,
    pub rules: BattleRules,
    pub log: Vec<LogEntry>,
    pub carry: Carryover,
}

impl Arena {
    pub fn duel() -> Self {
        let bulbasaur = BattlePokemon::new(
            species(
                "Bulbasaur",
                &[Type::Grass, Type::Poison],
                [45, 49, 49, 65, 65, 45],
                vec![
                    MoveBuilder::new("Tackle").pp(35).build(),
                    MoveBuilder::new("Vine Whip")
                        .move_type(Type::Grass)
                        .special()
                        .power(35)
                        .pp(10)
                        .build(),
                ],
            ),
            50,
        );
        let snorlax = BattlePokemon::new(
            species(
                "Snorlax",
                &[Type::Normal],
                [160, 110, 65, 65, 110, 30],
                vec![
                    MoveBuilder::new("Headbutt").power(70).pp(15).build(),
                    MoveBuilder::new("Body Slam").power(85).pp(15).build(),
                ],
            ),
            50,
        );

        let red = Trainer::new("Red", vec![bulbasaur]).unwrap();
        let mut blue = Trainer::new("Blue", vec![snorlax]).unwrap();
        blue.side = Player::P2;

        Self {
            trainers: [red, blue],
            rng: BattleRng::seeded(0x5eed),
            catalog: MoveCatalog::new(),
            rules: BattleRules::default(),
            log: Vec::new(),
            carry: Carryover::default(),
        }
    }

    /// Context for the attacker using its move in `slot`, or an unslotted move
    pub fn ctx(&mut self, slot: Option<usize>) -> BattleContext<'_> {
        let current = slot
            .and_then(|slot| self.trainers[0].active().moves.get(slot))
            .map(|m| Arc::clone(m.data()))
            .unwrap_or_else(|| MoveBuilder::new("Struggle").build());
        self.context(current, slot)
    }

    /// Context with `data` as the current, unslotted move
    pub fn ctx_with(&mut self, data: Arc<MoveData>) -> BattleContext<'_> {
        self.context(data, None)
    }

    fn context(&mut self, current: Arc<MoveData>, slot: Option<usize>) -> BattleContext<'_> {
        let [attacker, defender] = &mut self.trainers;
        let env = ActionEnv {
            rng: &mut self.rng,
            catalog: &self.catalog,
            rules: self.rules,
            log: &mut self.log,
            turn: 1,
        };
        BattleContext::new(attacker, defender, env, current, slot, self.carry.clone())
    }

    pub fn events(&self) -> Vec<BattleEvent> {
        self.log.iter().map(|entry| entry.event.clone()).collect()
    }

    pub fn attacker(&self) -> &BattlePokemon {
        self.trainers[0].active()
    }

    pub fn attacker_mut(&mut self) -> &mut BattlePokemon {
        self.trainers[0].active_mut()
    }

    pub fn defender(&self) -> &BattlePokemon {
        self.trainers[1].active()
    }

    pub fn defender_mut(&mut self) -> &mut BattlePokemon {
        self.trainers[1].active_mut()
    }
}
