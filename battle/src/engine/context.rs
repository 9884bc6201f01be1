//! Per-action battle context

use std::sync::Arc;

use stadium_protocol::{BattleEvent, LogEntry, Player, Pokemon};
use tracing::debug;

use crate::combatant::{BattleMove, Trainer};
use crate::error::BattleError;
use crate::rng::BattleRng;
use crate::rules::BattleRules;
use crate::types::{MoveCatalog, MoveData};

/// How deep moves may invoke other moves (Mirror Move, Metronome)
pub const MAX_INVOKE_DEPTH: u8 = 8;

/// The most recent move used by either side
#[derive(Debug, Clone)]
pub struct LastMove {
    /// Side whose combatant used it
    pub side: Player,
    /// Slot it was used from, `None` when it was invoked indirectly
    pub slot: Option<usize>,
    pub data: Arc<MoveData>,
}

/// State handed from one attack action to the next
#[derive(Debug, Clone, Default)]
pub struct Carryover {
    /// HP the last damaging hit actually removed
    pub last_damage: Option<u32>,
    pub last_move: Option<LastMove>,
}

/// Battle-wide resources an action borrows
pub struct ActionEnv<'a> {
    pub rng: &'a mut BattleRng,
    pub catalog: &'a MoveCatalog,
    pub rules: BattleRules,
    pub log: &'a mut Vec<LogEntry>,
    pub turn: u32,
}

/// Everything one attack action can read or change
///
/// A fresh context is built for every attack. The only state that survives
/// between attacks is what [`finish`](Self::finish) hands back as a [`Carryover`].
pub struct BattleContext<'a> {
    pub attacker: &'a mut Trainer,
    pub defender: &'a mut Trainer,
    pub rng: &'a mut BattleRng,
    pub catalog: &'a MoveCatalog,
    pub rules: BattleRules,
    pub turn: u32,

    /// Move currently executing
    pub current_move: Arc<MoveData>,
    /// Attacker's slot for the current move, if it came from one
    pub current_slot: Option<usize>,

    pub last_damage: Option<u32>,
    pub last_move: Option<LastMove>,

    log: &'a mut Vec<LogEntry>,
    depth: u8,
}

impl<'a> BattleContext<'a> {
    pub fn new(
        attacker: &'a mut Trainer,
        defender: &'a mut Trainer,
        env: ActionEnv<'a>,
        current_move: Arc<MoveData>,
        current_slot: Option<usize>,
        carry: Carryover,
    ) -> Self {
        Self {
            attacker,
            defender,
            rng: env.rng,
            catalog: env.catalog,
            rules: env.rules,
            turn: env.turn,
            current_move,
            current_slot,
            last_damage: carry.last_damage,
            last_move: carry.last_move,
            log: env.log,
            depth: 0,
        }
    }

    /// Append an event to the battle log
    pub fn emit(&mut self, event: BattleEvent) {
        self.log.push(LogEntry::new(self.turn, event));
    }

    pub fn attacker_ident(&self) -> Pokemon {
        self.attacker.ident()
    }

    pub fn defender_ident(&self) -> Pokemon {
        self.defender.ident()
    }

    /// Use `data` as a one-off move of the attacker
    ///
    /// The current move and slot are restored afterwards. Chains deeper than
    /// [`MAX_INVOKE_DEPTH`] fail instead of recursing.
    pub fn invoke(&mut self, data: Arc<MoveData>) -> Result<(), BattleError> {
        if self.depth >= MAX_INVOKE_DEPTH {
            debug!(move_name = %data.name, "invocation chain too deep");
            let pokemon = self.attacker_ident();
            self.emit(BattleEvent::Fail(pokemon));
            return Ok(());
        }

        let saved_move = Arc::clone(&self.current_move);
        let saved_slot = self.current_slot.take();
        self.depth += 1;

        let result = BattleMove::new(data).execute(self);

        self.depth -= 1;
        self.current_move = saved_move;
        self.current_slot = saved_slot;
        result.map(|_| ())
    }

    /// End the action, handing back what the next action inherits
    pub fn finish(self) -> Carryover {
        Carryover {
            last_damage: self.last_damage,
            last_move: self.last_move,
        }
    }
}
