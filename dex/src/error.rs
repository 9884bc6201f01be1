use std::io;

use stadium_battle::BattleError;
use thiserror::Error;

/// Anything wrong with a data set, a config file or a team request
///
/// Every variant is fatal at load time; a battle never starts from data that
/// failed validation.
#[derive(Error, Debug)]
pub enum DexError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Move {name}: {reason}")]
    InvalidMove { name: String, reason: String },

    #[error("Move {name}: {kind} effects are not supported")]
    UnsupportedEffect { name: String, kind: String },

    #[error("Species {name}: {reason}")]
    InvalidSpecies { name: String, reason: String },

    #[error("Species {species} references unknown move {move_name}")]
    UnknownMove { species: String, move_name: String },

    #[error("Duplicate {kind} {name}")]
    Duplicate { kind: &'static str, name: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid team: {0}")]
    InvalidTeam(String),

    #[error(transparent)]
    Battle(#[from] BattleError),
}

impl DexError {
    pub(crate) fn invalid_move(name: &str, reason: impl Into<String>) -> Self {
        DexError::InvalidMove {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_species(name: &str, reason: impl Into<String>) -> Self {
        DexError::InvalidSpecies {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
