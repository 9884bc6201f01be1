//! Round orchestration
//!
//! A round runs in two phases so that synchronous providers and async drivers
//! share one implementation:
//!
//! 1. [`Battle::begin_round`] advances the turn, ticks disable countdowns and
//!    reports sides that must replace a fainted combatant
//!    ([`Battle::replace`]).
//! 2. [`Battle::resolve_round`] takes both sides' [`Choice`]s, orders them and
//!    executes them one after the other.
//!
//! [`Battle::play_round`] and [`Battle::run`] drive both phases with
//! [`DecisionProvider`]s.

use std::sync::Arc;

use stadium_protocol::{
    ActivePokemon, BattleEvent, BattleRequest, Choice, LogEntry, MoveSlot, OpponentPokemon,
    Player, RosterPokemon,
};
use tracing::{debug, info};

use super::context::{ActionEnv, BattleContext, Carryover};
use crate::combatant::{BattleMove, DecisionProvider, LockedMove, Trainer};
use crate::error::BattleError;
use crate::rng::BattleRng;
use crate::rules::BattleRules;
use crate::types::MoveCatalog;

/// Switching always goes before any move
pub const SWITCH_PRIORITY: i8 = 10;

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    /// Both sides ran out of combatants in the same round
    Draw,
}

/// A validated action for one side
#[derive(Debug, Clone)]
enum Action {
    Switch(usize),
    Attack(Attack),
}

#[derive(Debug, Clone)]
enum Attack {
    Slot(usize),
    Locked(LockedMove),
}

/// A battle between two trainers
#[derive(Debug)]
pub struct Battle {
    trainers: [Trainer; 2],
    rng: BattleRng,
    catalog: Arc<MoveCatalog>,
    rules: BattleRules,
    log: Vec<LogEntry>,
    turn: u32,
    carry: Carryover,
    outcome: Option<Outcome>,
    round_open: bool,
}

impl Battle {
    pub fn new(mut p1: Trainer, mut p2: Trainer, catalog: Arc<MoveCatalog>, rng: BattleRng) -> Self {
        p1.side = Player::P1;
        p2.side = Player::P2;
        info!(p1 = %p1.name(), p2 = %p2.name(), moves = catalog.len(), "battle created");
        Self {
            trainers: [p1, p2],
            rng,
            catalog,
            rules: BattleRules::default(),
            log: Vec::new(),
            turn: 0,
            carry: Carryover::default(),
            outcome: None,
            round_open: false,
        }
    }

    pub fn with_rules(mut self, rules: BattleRules) -> Self {
        self.rules = rules;
        self
    }

    // === Accessors ===

    pub fn trainer(&self, side: Player) -> &Trainer {
        &self.trainers[side.index()]
    }

    pub fn trainers(&self) -> &[Trainer; 2] {
        &self.trainers
    }

    pub fn rules(&self) -> BattleRules {
        self.rules
    }

    pub fn catalog(&self) -> &MoveCatalog {
        &self.catalog
    }

    pub fn rng(&self) -> &BattleRng {
        &self.rng
    }

    /// Current turn; 0 before the first round begins
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Every event so far, oldest first
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Events logged after the first `seen`
    pub fn log_since(&self, seen: usize) -> &[LogEntry] {
        self.log.get(seen..).unwrap_or_default()
    }

    pub fn carryover(&self) -> &Carryover {
        &self.carry
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    fn emit(&mut self, event: BattleEvent) {
        self.log.push(LogEntry::new(self.turn, event));
    }

    // === Round phase one ===

    /// Start the next round
    ///
    /// Returns the sides whose fainted active combatant must be replaced
    /// through [`replace`](Self::replace) before the round can resolve.
    pub fn begin_round(&mut self) -> Result<Vec<Player>, BattleError> {
        if self.is_over() {
            return Err(BattleError::BattleOver);
        }
        if !self.round_open {
            self.turn += 1;
            self.round_open = true;
            debug!(turn = self.turn, "round started");

            if self.turn == 1 {
                for side in Player::BOTH {
                    self.trainers[side.index()].send_out_lead();
                    self.announce_switch_in(side);
                }
            } else {
                for side in Player::BOTH {
                    self.tick_disables(side);
                }
            }
        }
        Ok(self.pending_replacements())
    }

    /// Sides that must replace a fainted active combatant
    pub fn pending_replacements(&self) -> Vec<Player> {
        Player::BOTH
            .into_iter()
            .filter(|&side| self.trainer(side).needs_replacement())
            .collect()
    }

    fn tick_disables(&mut self, side: Player) {
        let trainer = &mut self.trainers[side.index()];
        if trainer.active().is_fainted() {
            return;
        }
        let cleared = trainer.active_mut().tick_disables();
        let pokemon = trainer.ident();
        for move_name in cleared {
            self.emit(BattleEvent::DisableEnd {
                pokemon: pokemon.clone(),
                move_name,
            });
        }
    }

    fn announce_switch_in(&mut self, side: Player) {
        let trainer = &self.trainers[side.index()];
        let event = BattleEvent::Switch {
            pokemon: trainer.ident(),
            hp: trainer.active().hp(),
            max_hp: trainer.active().max_hp(),
        };
        self.emit(event);
    }

    /// Replace a fainted active combatant with roster entry `index`
    pub fn replace(&mut self, side: Player, index: usize) -> Result<(), BattleError> {
        if self.is_over() {
            return Err(BattleError::BattleOver);
        }
        let trainer = &mut self.trainers[side.index()];
        if !trainer.needs_replacement() {
            return Err(BattleError::InvalidChoice {
                side,
                reason: "no replacement is needed".to_string(),
            });
        }
        trainer.switch_to(index)?;
        self.announce_switch_in(side);
        Ok(())
    }

    /// Snapshot of what `side` sees when deciding
    pub fn request(&self, side: Player) -> BattleRequest {
        let me = self.trainer(side);
        let foe = self.trainer(side.opponent()).active();
        let active = me.active();

        BattleRequest {
            turn: self.turn,
            side,
            active: ActivePokemon {
                name: active.name().to_string(),
                hp: active.hp(),
                max_hp: active.max_hp(),
                types: active.types.iter().map(|t| t.to_string()).collect(),
                moves: active
                    .moves
                    .iter()
                    .map(|m| MoveSlot {
                        name: m.name().to_string(),
                        pp: m.pp(),
                        max_pp: m.max_pp(),
                        disabled: m.is_disabled(),
                    })
                    .collect(),
            },
            roster: me
                .roster()
                .iter()
                .enumerate()
                .map(|(index, p)| RosterPokemon {
                    index,
                    name: p.name().to_string(),
                    hp: p.hp(),
                    max_hp: p.max_hp(),
                    active: index == me.active_index(),
                    fainted: p.is_fainted(),
                })
                .collect(),
            opponent: OpponentPokemon {
                name: foe.name().to_string(),
                hp: foe.hp(),
                max_hp: foe.max_hp(),
                types: foe.types.iter().map(|t| t.to_string()).collect(),
            },
            force_switch: me.needs_replacement(),
            locked: me.is_locked(),
        }
    }

    pub fn is_locked(&self, side: Player) -> bool {
        self.trainer(side).is_locked()
    }

    /// The choice a locked side is held to, `None` when it is free to choose
    pub fn forced_choice(&self, side: Player) -> Option<Choice> {
        let trainer = self.trainer(side);
        let lock = trainer.locked_move()?;
        Some(
            lock.slot
                .map(Choice::Move)
                .or(trainer.last_choice())
                .unwrap_or(Choice::Move(0)),
        )
    }

    // === Round phase two ===

    /// Execute both sides' choices for the open round
    ///
    /// Locked sides repeat their locked move whatever they submitted.
    pub fn resolve_round(&mut self, choices: [Choice; 2]) -> Result<Option<Outcome>, BattleError> {
        if self.is_over() {
            return Err(BattleError::BattleOver);
        }
        if !self.round_open {
            return Err(BattleError::RoundNotStarted);
        }
        if let Some(&side) = self.pending_replacements().first() {
            return Err(BattleError::ReplacementPending(side));
        }

        let actions = [
            self.validate(Player::P1, choices[0])?,
            self.validate(Player::P2, choices[1])?,
        ];
        for side in Player::BOTH {
            if !matches!(actions[side.index()], Action::Attack(Attack::Locked(_))) {
                self.trainers[side.index()].record_choice(choices[side.index()]);
            }
        }

        for side in self.turn_order(&actions) {
            match &actions[side.index()] {
                Action::Switch(index) => self.switch_action(side, *index)?,
                Action::Attack(attack) => {
                    if self.trainer(side).active().is_fainted() {
                        debug!(side = %side, "fainted before acting");
                        continue;
                    }
                    self.attack_action(side, attack.clone())?;
                }
            }
        }

        self.round_open = false;
        Ok(self.check_outcome())
    }

    fn validate(&self, side: Player, choice: Choice) -> Result<Action, BattleError> {
        let trainer = self.trainer(side);
        if let Some(lock) = trainer.locked_move() {
            return Ok(Action::Attack(Attack::Locked(lock.clone())));
        }
        match choice {
            Choice::Move(slot) => {
                trainer.validate_move(slot)?;
                Ok(Action::Attack(Attack::Slot(slot)))
            }
            Choice::Switch(index) => {
                trainer.validate_switch(index)?;
                Ok(Action::Switch(index))
            }
        }
    }

    fn priority(&self, side: Player, action: &Action) -> i8 {
        match action {
            Action::Switch(_) => SWITCH_PRIORITY,
            Action::Attack(Attack::Slot(slot)) => {
                self.trainer(side).active().moves[*slot].data().priority
            }
            Action::Attack(Attack::Locked(lock)) => lock.data.priority,
        }
    }

    /// Priority, then stage-modified speed, then a coin flip
    fn turn_order(&mut self, actions: &[Action; 2]) -> [Player; 2] {
        let p1 = self.priority(Player::P1, &actions[0]);
        let p2 = self.priority(Player::P2, &actions[1]);
        let s1 = self.trainer(Player::P1).active().speed();
        let s2 = self.trainer(Player::P2).active().speed();

        let first = if p1 != p2 {
            if p1 > p2 { Player::P1 } else { Player::P2 }
        } else if s1 != s2 {
            if s1 > s2 { Player::P1 } else { Player::P2 }
        } else if self.rng.coin() {
            Player::P1
        } else {
            Player::P2
        };
        debug!(p1_priority = p1, p2_priority = p2, p1_speed = s1, p2_speed = s2, first = %first, "turn order");
        [first, first.opponent()]
    }

    fn switch_action(&mut self, side: Player, index: usize) -> Result<(), BattleError> {
        let leaving = self.trainer(side).ident();
        self.trainers[side.index()].switch_to(index)?;
        self.emit(BattleEvent::Return(leaving));
        self.announce_switch_in(side);
        self.carry = Carryover::default();
        Ok(())
    }

    fn attack_action(&mut self, side: Player, attack: Attack) -> Result<(), BattleError> {
        let turn = self.turn;
        let rules = self.rules;
        let (attacker, defender) = split(&mut self.trainers, side);

        // Work on a copy of the slot; it is written back only if the slot
        // still holds the same move afterwards
        let (slot, mut battle_move) = match attack {
            Attack::Slot(slot) => (Some(slot), attacker.active().moves[slot].clone()),
            Attack::Locked(lock) => {
                let held = lock.slot.filter(|&slot| {
                    attacker
                        .active()
                        .moves
                        .get(slot)
                        .is_some_and(|m| m.holds(&lock.data))
                });
                match held {
                    Some(slot) => (Some(slot), attacker.active().moves[slot].clone()),
                    None => (None, BattleMove::new(lock.data)),
                }
            }
        };

        let env = ActionEnv {
            rng: &mut self.rng,
            catalog: self.catalog.as_ref(),
            rules,
            log: &mut self.log,
            turn,
        };
        let carry = std::mem::take(&mut self.carry);
        let current = Arc::clone(battle_move.data());
        let mut ctx = BattleContext::new(attacker, defender, env, current, slot, carry);
        let outcome = battle_move.execute(&mut ctx);
        self.carry = ctx.finish();
        let outcome = outcome?;
        debug!(side = %side, move_name = %battle_move.name(), ?outcome, "attack resolved");

        if let Some(slot) = slot {
            let moves = &mut self.trainers[side.index()].active_mut().moves;
            if moves.get(slot).is_some_and(|m| m.holds(battle_move.data())) {
                moves[slot] = battle_move;
            }
        }
        Ok(())
    }

    fn check_outcome(&mut self) -> Option<Outcome> {
        let lost = [
            self.trainers[0].all_fainted(),
            self.trainers[1].all_fainted(),
        ];
        let outcome = match lost {
            [true, true] => Outcome::Draw,
            [true, false] => Outcome::Winner(Player::P2),
            [false, true] => Outcome::Winner(Player::P1),
            [false, false] => return None,
        };

        match outcome {
            Outcome::Winner(side) => {
                let name = self.trainer(side).name().to_string();
                info!(winner = %name, turn = self.turn, "battle over");
                self.emit(BattleEvent::Win(name));
            }
            Outcome::Draw => {
                info!(turn = self.turn, "battle over in a draw");
                self.emit(BattleEvent::Tie);
            }
        }
        self.outcome = Some(outcome);
        self.outcome
    }

    // === Drivers ===

    /// Run one full round against synchronous providers (P1 first)
    pub fn play_round(
        &mut self,
        providers: &mut [&mut dyn DecisionProvider; 2],
    ) -> Result<Option<Outcome>, BattleError> {
        for side in self.begin_round()? {
            let request = self.request(side);
            let index = providers[side.index()].choose_replacement(&request);
            self.replace(side, index)?;
        }

        let mut choices = [Choice::Move(0); 2];
        for side in Player::BOTH {
            choices[side.index()] = match self.forced_choice(side) {
                Some(choice) => choice,
                None => {
                    let request = self.request(side);
                    providers[side.index()].choose_action(&request)
                }
            };
        }
        self.resolve_round(choices)
    }

    /// Play rounds until the battle ends or `max_rounds` have been played
    pub fn run(
        &mut self,
        providers: &mut [&mut dyn DecisionProvider; 2],
        max_rounds: u32,
    ) -> Result<Option<Outcome>, BattleError> {
        for _ in 0..max_rounds {
            if let Some(outcome) = self.play_round(providers)? {
                return Ok(Some(outcome));
            }
        }
        Ok(self.outcome)
    }
}

/// Mutable (attacker, defender) pair for `side` attacking
fn split(trainers: &mut [Trainer; 2], side: Player) -> (&mut Trainer, &mut Trainer) {
    let [p1, p2] = trainers;
    match side {
        Player::P1 => (p1, p2),
        Player::P2 => (p2, p1),
    }
}
