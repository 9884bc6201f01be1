//! Minor event parsers: damage, stat changes and move side effects

use super::BattleEvent;
use crate::ParseError;
use crate::battle::{parse_number, parse_pokemon, parse_stat, parse_text};
use anyhow::Result;

/// Parse |-damage|, |-recoil|, |-heal| and |-drain| (POKEMON|AMOUNT|HP)
pub fn parse_hp_change(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let amount = parse_number(parts, 3, "amount")?;
    let hp = parse_number(parts, 4, "hp")?;

    Ok(match parts[1] {
        "-recoil" => BattleEvent::Recoil {
            pokemon,
            amount,
            hp,
        },
        "-heal" => BattleEvent::Heal {
            pokemon,
            amount,
            hp,
        },
        "-drain" => BattleEvent::Drain {
            pokemon,
            amount,
            hp,
        },
        _ => BattleEvent::Damage {
            pokemon,
            amount,
            hp,
        },
    })
}

/// Parse |-hpfull|POKEMON
pub fn parse_hpfull(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::HpFull(pokemon))
}

/// Parse |-miss|SOURCE|TARGET
pub fn parse_miss(parts: &[&str]) -> Result<BattleEvent> {
    let source = parse_pokemon(parts, 2)?;
    let target = parse_pokemon(parts, 3)?;

    Ok(BattleEvent::Miss { source, target })
}

/// Parse |-crit|, |-supereffective|, |-resisted| and |-immune| (POKEMON)
pub fn parse_hit_quality(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;

    Ok(match parts[1] {
        "-crit" => BattleEvent::Crit(pokemon),
        "-supereffective" => BattleEvent::SuperEffective(pokemon),
        "-resisted" => BattleEvent::Resisted(pokemon),
        _ => BattleEvent::Immune(pokemon),
    })
}

/// Parse |-hitcount|POKEMON|HITS
pub fn parse_hitcount(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let hits = parse_number(parts, 3, "hits")?;

    Ok(BattleEvent::HitCount { pokemon, hits })
}

/// Parse |-ohko|POKEMON
pub fn parse_ohko(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::Ohko(pokemon))
}

/// Parse |-boost|POKEMON|STAT|AMOUNT or |-unboost|POKEMON|STAT|AMOUNT
pub fn parse_boost(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let stat = parse_stat(parts, 3)?;
    let amount = parse_number(parts, 4, "amount")?;

    if parts[1] == "-unboost" {
        Ok(BattleEvent::Unboost {
            pokemon,
            stat,
            amount,
        })
    } else {
        Ok(BattleEvent::Boost {
            pokemon,
            stat,
            amount,
        })
    }
}

/// Parse the POKEMON|MOVE family: -disable, -alreadydisabled, -enddisable,
/// -prepare, -mimic, -mirrormove, -counter
pub fn parse_move_note(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let move_name = parse_text(parts, 3, "move")?;

    match parts[1] {
        "-disable" => Ok(BattleEvent::Disable { pokemon, move_name }),
        "-alreadydisabled" => Ok(BattleEvent::AlreadyDisabled { pokemon, move_name }),
        "-enddisable" => Ok(BattleEvent::DisableEnd { pokemon, move_name }),
        "-prepare" => Ok(BattleEvent::Prepare { pokemon, move_name }),
        "-mimic" => Ok(BattleEvent::Mimic { pokemon, move_name }),
        "-mirrormove" => Ok(BattleEvent::MirrorMove { pokemon, move_name }),
        "-counter" => Ok(BattleEvent::Counter { pokemon, move_name }),
        other => Err(ParseError::InvalidFormat(format!("not a move note: {}", other)).into()),
    }
}

/// Parse |-mustrecharge|POKEMON
pub fn parse_mustrecharge(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::MustRecharge(pokemon))
}

/// Parse |-typechange|POKEMON|TYPE
pub fn parse_typechange(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    let type_name = parse_text(parts, 3, "type")?;

    Ok(BattleEvent::TypeChange { pokemon, type_name })
}

/// Parse |-fail|POKEMON
pub fn parse_fail(parts: &[&str]) -> Result<BattleEvent> {
    let pokemon = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::Fail(pokemon))
}
