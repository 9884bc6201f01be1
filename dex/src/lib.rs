//! # stadium-dex
//!
//! Move and species data for the stadium battle engine.
//!
//! Data lives in two JSON arrays (camelCase keys, enum values as strings):
//!
//! ```text
//! moves.json ──► parse_moves ──► MoveCatalog ─┐
//!                                             ├──► Dex ──► build_team / random_team ──► Trainer
//! species.json ─► parse_species (resolves) ───┘
//! ```
//!
//! Validation happens entirely at load time. A data set that loads cleanly
//! only contains moves and species the engine can run.
//!
//! ## Example
//!
//! ```no_run
//! use stadium_dex::{BattleConfig, Dex, random_trainer};
//!
//! # fn main() -> Result<(), stadium_dex::DexError> {
//! let dex = Dex::bundled()?;
//! let config = BattleConfig::load("battle.json")?;
//! let mut rng = config.rng();
//! let red = random_trainer(&dex, "Red", &config, &mut rng)?;
//! println!("{} leads with {}", red.name(), red.active().name());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod loader;
pub mod team;

// Re-export main types at crate root for convenience
pub use config::BattleConfig;
pub use error::DexError;
pub use loader::{Dex, load_moves, load_species, parse_moves, parse_species};
pub use team::{build_team, named_trainer, random_team, random_trainer};
