//! Battle events emitted by the engine
//!
//! Every state change in a battle is reported as a [`BattleEvent`], tagged with
//! the turn it happened on ([`LogEntry`]). Events render two ways: human-readable
//! text through `Display`, and a `|`-delimited wire format that
//! [`parse_event`] / [`parse_log_line`] read back.

mod major;
mod minor;

use std::fmt;

use anyhow::Result;

use crate::ParseError;
use crate::battle::{Pokemon, Stat};

/// Why a combatant could not use its chosen move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CantReason {
    Disabled,
    NoPp,
}

impl CantReason {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "disable" => Some(CantReason::Disabled),
            "nopp" => Some(CantReason::NoPp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CantReason::Disabled => "disable",
            CantReason::NoPp => "nopp",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Major actions
    /// |move|POKEMON|MOVE
    Move { pokemon: Pokemon, move_name: String },

    /// |cant|POKEMON|REASON|MOVE
    Cant {
        pokemon: Pokemon,
        reason: CantReason,
        move_name: String,
    },

    /// |switch|POKEMON|HP/MAXHP
    Switch { pokemon: Pokemon, hp: u16, max_hp: u16 },

    /// |return|POKEMON
    Return(Pokemon),

    /// |faint|POKEMON
    Faint(Pokemon),

    /// |win|TRAINER
    Win(String),

    /// |tie
    Tie,

    // Minor actions
    /// |-damage|POKEMON|AMOUNT|HP
    Damage { pokemon: Pokemon, amount: u16, hp: u16 },

    /// |-recoil|POKEMON|AMOUNT|HP
    Recoil { pokemon: Pokemon, amount: u16, hp: u16 },

    /// |-heal|POKEMON|AMOUNT|HP
    Heal { pokemon: Pokemon, amount: u16, hp: u16 },

    /// |-drain|POKEMON|AMOUNT|HP
    Drain { pokemon: Pokemon, amount: u16, hp: u16 },

    /// |-hpfull|POKEMON
    HpFull(Pokemon),

    /// |-miss|SOURCE|TARGET
    Miss { source: Pokemon, target: Pokemon },

    /// |-crit|POKEMON
    Crit(Pokemon),

    /// |-supereffective|POKEMON
    SuperEffective(Pokemon),

    /// |-resisted|POKEMON
    Resisted(Pokemon),

    /// |-immune|POKEMON
    Immune(Pokemon),

    /// |-hitcount|POKEMON|HITS
    HitCount { pokemon: Pokemon, hits: u8 },

    /// |-ohko|POKEMON
    Ohko(Pokemon),

    /// |-boost|POKEMON|STAT|AMOUNT (amount 0 means the stage was already maxed)
    Boost {
        pokemon: Pokemon,
        stat: Stat,
        amount: u8,
    },

    /// |-unboost|POKEMON|STAT|AMOUNT (amount 0 means the stage was already minimal)
    Unboost {
        pokemon: Pokemon,
        stat: Stat,
        amount: u8,
    },

    /// |-clearallboost
    ClearAllBoost,

    /// |-disable|POKEMON|MOVE
    Disable { pokemon: Pokemon, move_name: String },

    /// |-alreadydisabled|POKEMON|MOVE
    AlreadyDisabled { pokemon: Pokemon, move_name: String },

    /// |-enddisable|POKEMON|MOVE
    DisableEnd { pokemon: Pokemon, move_name: String },

    /// |-prepare|POKEMON|MOVE
    Prepare { pokemon: Pokemon, move_name: String },

    /// |-mustrecharge|POKEMON
    MustRecharge(Pokemon),

    /// |-typechange|POKEMON|TYPE
    TypeChange { pokemon: Pokemon, type_name: String },

    /// |-mimic|POKEMON|MOVE
    Mimic { pokemon: Pokemon, move_name: String },

    /// |-mirrormove|POKEMON|MOVE
    MirrorMove { pokemon: Pokemon, move_name: String },

    /// |-counter|POKEMON|MOVE
    Counter { pokemon: Pokemon, move_name: String },

    /// |-fail|POKEMON
    Fail(Pokemon),
}

impl BattleEvent {
    /// Serialize to wire format: |KIND|ARGS...
    pub fn to_wire_format(&self) -> String {
        match self {
            Self::Move { pokemon, move_name } => format!("|move|{}|{}", pokemon, move_name),
            Self::Cant {
                pokemon,
                reason,
                move_name,
            } => format!("|cant|{}|{}|{}", pokemon, reason.as_str(), move_name),
            Self::Switch {
                pokemon,
                hp,
                max_hp,
            } => format!("|switch|{}|{}/{}", pokemon, hp, max_hp),
            Self::Return(pokemon) => format!("|return|{}", pokemon),
            Self::Faint(pokemon) => format!("|faint|{}", pokemon),
            Self::Win(trainer) => format!("|win|{}", trainer),
            Self::Tie => "|tie".to_string(),
            Self::Damage {
                pokemon,
                amount,
                hp,
            } => format!("|-damage|{}|{}|{}", pokemon, amount, hp),
            Self::Recoil {
                pokemon,
                amount,
                hp,
            } => format!("|-recoil|{}|{}|{}", pokemon, amount, hp),
            Self::Heal {
                pokemon,
                amount,
                hp,
            } => format!("|-heal|{}|{}|{}", pokemon, amount, hp),
            Self::Drain {
                pokemon,
                amount,
                hp,
            } => format!("|-drain|{}|{}|{}", pokemon, amount, hp),
            Self::HpFull(pokemon) => format!("|-hpfull|{}", pokemon),
            Self::Miss { source, target } => format!("|-miss|{}|{}", source, target),
            Self::Crit(pokemon) => format!("|-crit|{}", pokemon),
            Self::SuperEffective(pokemon) => format!("|-supereffective|{}", pokemon),
            Self::Resisted(pokemon) => format!("|-resisted|{}", pokemon),
            Self::Immune(pokemon) => format!("|-immune|{}", pokemon),
            Self::HitCount { pokemon, hits } => format!("|-hitcount|{}|{}", pokemon, hits),
            Self::Ohko(pokemon) => format!("|-ohko|{}", pokemon),
            Self::Boost {
                pokemon,
                stat,
                amount,
            } => format!("|-boost|{}|{}|{}", pokemon, stat.as_str(), amount),
            Self::Unboost {
                pokemon,
                stat,
                amount,
            } => format!("|-unboost|{}|{}|{}", pokemon, stat.as_str(), amount),
            Self::ClearAllBoost => "|-clearallboost".to_string(),
            Self::Disable { pokemon, move_name } => format!("|-disable|{}|{}", pokemon, move_name),
            Self::AlreadyDisabled { pokemon, move_name } => {
                format!("|-alreadydisabled|{}|{}", pokemon, move_name)
            }
            Self::DisableEnd { pokemon, move_name } => {
                format!("|-enddisable|{}|{}", pokemon, move_name)
            }
            Self::Prepare { pokemon, move_name } => format!("|-prepare|{}|{}", pokemon, move_name),
            Self::MustRecharge(pokemon) => format!("|-mustrecharge|{}", pokemon),
            Self::TypeChange { pokemon, type_name } => {
                format!("|-typechange|{}|{}", pokemon, type_name)
            }
            Self::Mimic { pokemon, move_name } => format!("|-mimic|{}|{}", pokemon, move_name),
            Self::MirrorMove { pokemon, move_name } => {
                format!("|-mirrormove|{}|{}", pokemon, move_name)
            }
            Self::Counter { pokemon, move_name } => format!("|-counter|{}|{}", pokemon, move_name),
            Self::Fail(pokemon) => format!("|-fail|{}", pokemon),
        }
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { pokemon, move_name } => write!(f, "{} used {}!", pokemon.name, move_name),
            Self::Cant {
                pokemon,
                reason: CantReason::Disabled,
                move_name,
            } => write!(f, "{}'s {} is disabled!", pokemon.name, move_name),
            Self::Cant {
                pokemon,
                reason: CantReason::NoPp,
                move_name,
            } => write!(f, "{} has no PP left for {}!", pokemon.name, move_name),
            Self::Switch { pokemon, .. } => write!(f, "Go {}!", pokemon.name),
            Self::Return(pokemon) => write!(f, "{}, return!", pokemon.name),
            Self::Faint(pokemon) => write!(f, "{} fainted!", pokemon.name),
            Self::Win(trainer) => write!(f, "{} won the battle!", trainer),
            Self::Tie => f.write_str("The battle ended in a draw!"),
            Self::Damage {
                pokemon, amount, ..
            } => write!(f, "{} received {} damage!", pokemon.name, amount),
            Self::Recoil {
                pokemon, amount, ..
            } => write!(f, "{} is hit with {} recoil!", pokemon.name, amount),
            Self::Heal {
                pokemon, amount, ..
            } => write!(f, "{} recovered {} HP!", pokemon.name, amount),
            Self::Drain {
                pokemon, amount, ..
            } => write!(f, "{} drained {} HP!", pokemon.name, amount),
            Self::HpFull(pokemon) => write!(f, "{}'s HP is full!", pokemon.name),
            Self::Miss { target, .. } => write!(f, "{} avoided the attack!", target.name),
            Self::Crit(_) => f.write_str("A critical hit!"),
            Self::SuperEffective(_) => f.write_str("It's super effective!"),
            Self::Resisted(_) => f.write_str("It's not very effective!"),
            Self::Immune(_) => f.write_str("It has no effect!"),
            Self::HitCount { hits: 1, .. } => f.write_str("It hit 1 time!"),
            Self::HitCount { hits, .. } => write!(f, "It hit {} times!", hits),
            Self::Ohko(_) => f.write_str("It's a one-hit KO!"),
            Self::Boost {
                pokemon,
                stat,
                amount,
            } => {
                let tier = match amount {
                    0 => "cannot go any higher!",
                    1 => "rose!",
                    2 => "rose sharply!",
                    _ => "rose drastically!",
                };
                write!(f, "{}'s {} {}", pokemon.name, stat.display_name(), tier)
            }
            Self::Unboost {
                pokemon,
                stat,
                amount,
            } => {
                let tier = match amount {
                    0 => "cannot go any lower!",
                    1 => "fell!",
                    _ => "harshly fell!",
                };
                write!(f, "{}'s {} {}", pokemon.name, stat.display_name(), tier)
            }
            Self::ClearAllBoost => f.write_str("All stat changes have been reset!"),
            Self::Disable { pokemon, move_name } => {
                write!(f, "{}'s {} was disabled!", pokemon.name, move_name)
            }
            Self::AlreadyDisabled { pokemon, move_name } => {
                write!(f, "{}'s {} is already disabled!", pokemon.name, move_name)
            }
            Self::DisableEnd { pokemon, move_name } => {
                write!(f, "{}'s {} is no longer disabled!", pokemon.name, move_name)
            }
            Self::Prepare { pokemon, move_name } => {
                write!(f, "{} {}", pokemon.name, charge_phrase(move_name))
            }
            Self::MustRecharge(pokemon) => write!(f, "{} must recharge!", pokemon.name),
            Self::TypeChange { pokemon, type_name } => {
                write!(f, "{} transformed into the {} type!", pokemon.name, type_name)
            }
            Self::Mimic { pokemon, move_name } => write!(f, "{} learned {}!", pokemon.name, move_name),
            Self::MirrorMove { pokemon, move_name } => {
                write!(f, "{} copied {}!", pokemon.name, move_name)
            }
            Self::Counter { pokemon, move_name } => {
                write!(f, "{} countered {}!", pokemon.name, move_name)
            }
            Self::Fail(_) => f.write_str("But it failed!"),
        }
    }
}

/// Flavor text for the first turn of a two-turn move
pub fn charge_phrase(move_name: &str) -> &'static str {
    let key: String = move_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    match key.as_str() {
        "dig" => "burrowed its way under the ground!",
        "fly" => "flew up high!",
        "razorwind" => "made a whirlwind!",
        "skullbash" => "lowered its head!",
        "skyattack" => "is glowing!",
        "solarbeam" => "absorbed light!",
        _ => "is storing energy!",
    }
}

/// A battle event tagged with the turn it happened on
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub turn: u32,
    pub event: BattleEvent,
}

impl LogEntry {
    pub fn new(turn: u32, event: BattleEvent) -> Self {
        Self { turn, event }
    }

    /// Serialize to wire format: TURN|KIND|ARGS...
    pub fn to_wire_format(&self) -> String {
        format!("{}{}", self.turn, self.event.to_wire_format())
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Turn {}: {}", self.turn, self.event)
    }
}

/// Parse a turn-tagged log line such as "3|-damage|p2: Onix|12|80"
pub fn parse_log_line(line: &str) -> Result<LogEntry> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyMessage.into());
    }

    let split = line
        .find('|')
        .ok_or_else(|| ParseError::InvalidFormat(format!("missing event in log line: {}", line)))?;
    let (turn, event) = line.split_at(split);
    let turn: u32 = turn
        .parse()
        .map_err(|_| ParseError::InvalidFormat(format!("invalid turn number: {}", turn)))?;

    Ok(LogEntry::new(turn, parse_event(event)?))
}

/// Parse a single event in wire format
pub fn parse_event(line: &str) -> Result<BattleEvent> {
    let line = line.trim();

    if line.is_empty() {
        return Err(ParseError::EmptyMessage.into());
    }

    if !line.starts_with('|') {
        return Err(ParseError::InvalidFormat(format!("event must start with '|': {}", line)).into());
    }

    let parts: Vec<&str> = line.split('|').collect();

    match parts[1] {
        "move" => major::parse_move(&parts),
        "cant" => major::parse_cant(&parts),
        "switch" => major::parse_switch(&parts),
        "return" => major::parse_return(&parts),
        "faint" => major::parse_faint(&parts),
        "win" => major::parse_win(&parts),
        "tie" => Ok(BattleEvent::Tie),
        "-damage" | "-recoil" | "-heal" | "-drain" => minor::parse_hp_change(&parts),
        "-hpfull" => minor::parse_hpfull(&parts),
        "-miss" => minor::parse_miss(&parts),
        "-crit" | "-supereffective" | "-resisted" | "-immune" => {
            minor::parse_hit_quality(&parts)
        }
        "-hitcount" => minor::parse_hitcount(&parts),
        "-ohko" => minor::parse_ohko(&parts),
        "-boost" | "-unboost" => minor::parse_boost(&parts),
        "-clearallboost" => Ok(BattleEvent::ClearAllBoost),
        "-disable" | "-alreadydisabled" | "-enddisable" | "-prepare" | "-mimic"
        | "-mirrormove" | "-counter" => minor::parse_move_note(&parts),
        "-mustrecharge" => minor::parse_mustrecharge(&parts),
        "-typechange" => minor::parse_typechange(&parts),
        "-fail" => minor::parse_fail(&parts),
        other => Err(ParseError::InvalidFormat(format!("unknown event kind: {}", other)).into()),
    }
}
