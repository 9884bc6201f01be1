//! Major event parsers: moves, switches, faints and the battle result

use super::{BattleEvent, CantReason};
use crate::ParseError;
use crate::battle::{parse_number, parse_pokemon, parse_text};
use anyhow::Result;

/// Parse |move|POKEMON|MOVE
pub fn parse_move(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let move_name = parse_text(parts, 3, "move")?;

    Ok(BattleEvent::Move { pokemon, move_name })
}

/// Parse |cant|POKEMON|REASON|MOVE
pub fn parse_cant(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let raw_reason = parse_text(parts, 3, "reason")?;
    let reason = CantReason::parse(&raw_reason)
        .ok_or_else(|| ParseError::InvalidFormat(format!("unknown cant reason: {}", raw_reason)))?;
    let move_name = parse_text(parts, 4, "move")?;

    Ok(BattleEvent::Cant {
        pokemon,
        reason,
        move_name,
    })
}

/// Parse |switch|POKEMON|HP/MAXHP
pub fn parse_switch(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let condition = parse_text(parts, 3, "hp")?;
    let (hp, max_hp) = condition
        .split_once('/')
        .ok_or_else(|| ParseError::InvalidFormat(format!("expected HP/MAXHP, got {}", condition)))?;
    let fields = [hp, max_hp];

    Ok(BattleEvent::Switch {
        pokemon,
        hp: parse_number(&fields, 0, "hp")?,
        max_hp: parse_number(&fields, 1, "max hp")?,
    })
}

/// Parse |return|POKEMON
pub fn parse_return(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::Return(pokemon))
}

/// Parse |faint|POKEMON
pub fn parse_faint(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::Faint(pokemon))
}

/// Parse |win|TRAINER
pub fn parse_win(parts: &[&str]) -> Result<BattleEvent> {
    // Trainer names may contain '|', so join everything after the kind
    if parts.len() < 3 {
        return Err(ParseError::MissingField("winner".to_string()).into());
    }

    let winner = parts[2..].join("|");
    if winner.is_empty() {
        return Err(ParseError::InvalidFormat("winner cannot be empty".to_string()).into());
    }

    Ok(BattleEvent::Win(winner))
}
