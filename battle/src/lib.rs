//! Turn-based battle engine for Stadium.
//!
//! This crate resolves battles between two trainers: turn order, the move
//! execution state machine (PP, disable, charge and recharge locks), the move
//! effect pipeline and the underlying arithmetic.
//!
//! # Overview
//!
//! `stadium-battle` sits between `stadium-protocol` (events, requests, choices)
//! and the adapters that feed it data and decisions:
//!
//! ```text
//! stadium-protocol (events + requests)
//!        │
//!        ▼
//! stadium-battle (engine) ← THIS CRATE
//!        │
//!        ├─> stadium-dex (move/species data, teams)
//!        └─> stadium-client (async driver, agents)
//! ```
//!
//! # Main Types
//!
//! ## Domain Types
//! - [`Type`] - Types with the effectiveness chart
//! - [`StatStages`] - Stat stage modifiers (-6 to +6)
//! - [`MoveData`], [`MoveCatalog`], [`Species`] - Immutable definitions
//! - [`MoveEffect`] - The closed set of move behaviors
//!
//! ## Battle State
//! - [`BattlePokemon`] - One combatant's HP, stages and volatile flags
//! - [`BattleMove`] - A move slot with PP and a disable countdown
//! - [`Trainer`] - A roster with one active combatant
//! - [`Battle`] - The round orchestrator
//!
//! # Example Usage
//!
//! ```ignore
//! use stadium_battle::{Battle, BattleRng, DecisionProvider};
//!
//! let mut battle = Battle::new(red, blue, catalog, BattleRng::seeded(7));
//! let outcome = battle.run(&mut [&mut red_ai, &mut blue_ai], 200)?;
//!
//! for entry in battle.log() {
//!     println!("{}", entry);
//! }
//! ```

pub mod calc;
pub mod combatant;
pub mod effects;
pub mod engine;
pub mod error;
pub mod rng;
pub mod rules;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export main types at crate root for convenience
pub use combatant::{BattleMove, BattlePokemon, DecisionProvider, LockedMove, MoveOutcome, Trainer};
pub use effects::{CopyMode, MoveEffect};
pub use engine::{Battle, BattleContext, Carryover, LastMove, Outcome};
pub use error::BattleError;
pub use rng::BattleRng;
pub use rules::{BattleRules, DamageOverflow};
pub use types::{
    BaseStats, BattleStats, CritRatio, MoveCatalog, MoveCategory, MoveData, MoveTarget, Species,
    StatStages, Type,
};

// Re-export commonly used protocol types
pub use stadium_protocol::{BattleEvent, Choice, LogEntry, Player, Stat};
