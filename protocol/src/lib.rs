use thiserror::Error;

pub mod battle;
pub mod choice;
pub mod event;
pub mod request;

pub use battle::{Player, Pokemon, Stat};
pub use choice::Choice;
pub use event::{BattleEvent, CantReason, LogEntry, parse_event, parse_log_line};
pub use request::{ActivePokemon, BattleRequest, MoveSlot, OpponentPokemon, RosterPokemon};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Empty message")]
    EmptyMessage,
}
