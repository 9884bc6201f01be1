//! Round orchestration and the per-action context

mod battle;
mod context;

pub use battle::{Battle, Outcome};
pub use context::{ActionEnv, BattleContext, Carryover, LastMove, MAX_INVOKE_DEPTH};
