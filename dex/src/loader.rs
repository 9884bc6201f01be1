//! JSON data files to validated engine definitions
//!
//! Moves are loaded first into a [`MoveCatalog`]; species then resolve their
//! move names against it. Anything the engine could not run (an unknown type,
//! an effect without its parameters, a recharge turn that is not the last
//! effect) is rejected here so a battle never has to.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use stadium_battle::{
    BaseStats, CopyMode, CritRatio, MoveCatalog, MoveCategory, MoveData, MoveEffect, MoveTarget,
    Species, Type,
};
use stadium_protocol::Stat;
use tracing::{debug, info};

use crate::dto::{EffectDto, MoveDto, SpeciesDto};
use crate::error::DexError;

/// Effect kinds present in the data format that the engine does not implement
const UNSUPPORTED_EFFECTS: [&str; 5] = [
    "DamageReduction",
    "Fixated",
    "LeechSeed",
    "Status",
    "Transform",
];

/// Upper bound for move power and for each base stat; the damage formula
/// works on byte-sized inputs
const MAX_POWER: u16 = 255;
const MAX_BASE_STAT: u16 = 255;

/// File names [`Dex::load`] expects inside a data directory
pub const MOVES_FILE: &str = "moves.json";
pub const SPECIES_FILE: &str = "species.json";

/// Parse a JSON array of moves into a catalog
pub fn parse_moves(json: &str) -> Result<MoveCatalog, DexError> {
    let dtos: Vec<MoveDto> = serde_json::from_str(json)?;
    let mut catalog = MoveCatalog::new();

    for dto in &dtos {
        if catalog.contains(&dto.name) {
            return Err(DexError::Duplicate {
                kind: "move",
                name: dto.name.clone(),
            });
        }
        let data = move_from_dto(dto)?;
        debug!(move_name = %data.name, effects = data.effects.len(), "move loaded");
        catalog.insert(data);
    }

    info!(moves = catalog.len(), "move catalog loaded");
    Ok(catalog)
}

/// Parse a JSON array of species, resolving their moves in `catalog`
pub fn parse_species(json: &str, catalog: &MoveCatalog) -> Result<Vec<Species>, DexError> {
    let dtos: Vec<SpeciesDto> = serde_json::from_str(json)?;
    let mut species: Vec<Species> = Vec::with_capacity(dtos.len());

    for dto in &dtos {
        if species.iter().any(|s| s.name.eq_ignore_ascii_case(&dto.name)) {
            return Err(DexError::Duplicate {
                kind: "species",
                name: dto.name.clone(),
            });
        }
        if species.iter().any(|s| s.id == dto.id) {
            return Err(DexError::Duplicate {
                kind: "species id",
                name: dto.id.to_string(),
            });
        }
        species.push(species_from_dto(dto, catalog)?);
    }

    info!(species = species.len(), "species loaded");
    Ok(species)
}

pub fn load_moves(path: impl AsRef<Path>) -> Result<MoveCatalog, DexError> {
    let json = fs::read_to_string(path.as_ref())?;
    parse_moves(&json)
}

pub fn load_species(path: impl AsRef<Path>, catalog: &MoveCatalog) -> Result<Vec<Species>, DexError> {
    let json = fs::read_to_string(path.as_ref())?;
    parse_species(&json, catalog)
}

fn move_from_dto(dto: &MoveDto) -> Result<MoveData, DexError> {
    let name = dto.name.as_str();
    if name.trim().is_empty() {
        return Err(DexError::invalid_move(name, "name is empty"));
    }

    let move_type = Type::from_name(&dto.move_type)
        .ok_or_else(|| DexError::invalid_move(name, format!("unknown type {}", dto.move_type)))?;
    let category = MoveCategory::from_name(&dto.category).ok_or_else(|| {
        DexError::invalid_move(name, format!("unknown category {}", dto.category))
    })?;
    let target = parse_target(name, &dto.target)?;

    if let Some(accuracy) = dto.accuracy {
        if !(1..=100).contains(&accuracy) {
            return Err(DexError::invalid_move(
                name,
                format!("accuracy {} is outside 1-100", accuracy),
            ));
        }
    }
    if dto.pp == 0 {
        return Err(DexError::invalid_move(name, "PP must be at least 1"));
    }
    if let Some(power) = dto.power {
        if !(1..=MAX_POWER).contains(&power) {
            return Err(DexError::invalid_move(
                name,
                format!("power {} is outside 1-{}", power, MAX_POWER),
            ));
        }
    }

    let effects = dto
        .effects
        .iter()
        .map(|effect| effect_from_dto(dto, category, effect))
        .collect::<Result<Vec<_>, _>>()?;
    check_charge_turns(name, &effects)?;

    Ok(MoveData {
        name: name.to_string(),
        move_type,
        category,
        power: dto.power,
        accuracy: dto.accuracy,
        pp: dto.pp,
        priority: dto.priority,
        target,
        effects,
    })
}

/// At most one charge effect, and a recharge effect must close the list
fn check_charge_turns(name: &str, effects: &[MoveEffect]) -> Result<(), DexError> {
    let charges: Vec<usize> = effects
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, MoveEffect::ChargingTurn { .. }))
        .map(|(index, _)| index)
        .collect();

    match charges.as_slice() {
        [] => Ok(()),
        [index] => {
            let recharge = matches!(effects[*index], MoveEffect::ChargingTurn { recharge: true, .. });
            if recharge && *index + 1 != effects.len() {
                Err(DexError::invalid_move(name, "a recharge ChargingTurn must be the last effect"))
            } else {
                Ok(())
            }
        }
        _ => Err(DexError::invalid_move(name, "more than one ChargingTurn effect")),
    }
}

fn effect_from_dto(
    dto: &MoveDto,
    category: MoveCategory,
    effect: &EffectDto,
) -> Result<MoveEffect, DexError> {
    let name = dto.name.as_str();
    let kind = effect.effect_type.trim();
    let missing = |field: &str| DexError::invalid_move(name, format!("{} effect needs {}", kind, field));

    if UNSUPPORTED_EFFECTS.iter().any(|k| k.eq_ignore_ascii_case(kind)) {
        return Err(DexError::UnsupportedEffect {
            name: name.to_string(),
            kind: kind.to_string(),
        });
    }

    let parsed = match kind.to_ascii_lowercase().as_str() {
        "damage" => {
            dto.power.ok_or_else(|| missing("a move power"))?;
            let raw = effect.critical_ratio.as_deref().ok_or_else(|| missing("criticalRatio"))?;
            MoveEffect::Damage {
                crit_ratio: parse_crit_ratio(name, raw)?,
            }
        }
        "multistrike" => {
            dto.power.ok_or_else(|| missing("a move power"))?;
            let raw = effect.critical_ratio.as_deref().ok_or_else(|| missing("criticalRatio"))?;
            let min_hits = effect.min_hits.ok_or_else(|| missing("minHits"))?;
            let max_hits = effect.max_hits.ok_or_else(|| missing("maxHits"))?;
            if min_hits == 0 || min_hits > max_hits {
                return Err(DexError::invalid_move(
                    name,
                    format!("hit range {}-{} is empty", min_hits, max_hits),
                ));
            }
            MoveEffect::Multistrike {
                crit_ratio: parse_crit_ratio(name, raw)?,
                min_hits,
                max_hits,
            }
        }
        "fixeddamage" => MoveEffect::FixedDamage {
            amount: effect.fixed_power,
        },
        "onehitko" => MoveEffect::OneHitKo,
        "cuthalfhp" => MoveEffect::CutHalfHp,
        // Counter answers moves of its own category
        "counterdamage" => MoveEffect::CounterDamage { category },
        "recoil" => MoveEffect::Recoil {
            percent: effect.percent.ok_or_else(|| missing("percent"))?,
        },
        "drain" => MoveEffect::Drain {
            percent: effect.percent.ok_or_else(|| missing("percent"))?,
        },
        "recoverhp" => MoveEffect::RecoverHp {
            percent: effect.percent.ok_or_else(|| missing("percent"))?,
        },
        "selfdestruct" => MoveEffect::Selfdestruct,
        "statchange" => stat_change(name, effect, &missing)?,
        "statchangereset" => MoveEffect::StatChangeReset,
        "typechange" => MoveEffect::TypeChange,
        "disable" => MoveEffect::Disable,
        "chargingturn" => MoveEffect::ChargingTurn {
            semi_invulnerable: effect
                .semi_invulnerable_turn
                .ok_or_else(|| missing("semiInvulnerableTurn"))?,
            recharge: effect.recharge.unwrap_or(false),
        },
        "copymove" => {
            let replace = effect.replace.ok_or_else(|| missing("replace"))?;
            MoveEffect::CopyMove {
                mode: if replace { CopyMode::Learn } else { CopyMode::Repeat },
            }
        }
        "randommove" => MoveEffect::RandomMove,
        _ => {
            return Err(DexError::invalid_move(
                name,
                format!("unknown effect type {}", kind),
            ));
        }
    };
    Ok(parsed)
}

fn stat_change(
    name: &str,
    effect: &EffectDto,
    missing: &dyn Fn(&str) -> DexError,
) -> Result<MoveEffect, DexError> {
    let raw_target = effect.target.as_deref().ok_or_else(|| missing("target"))?;
    let target = parse_target(name, raw_target)?;
    if target == MoveTarget::All {
        return Err(DexError::invalid_move(name, "stat changes cannot target All"));
    }

    let raw_stat = effect.affected_stat.as_deref().ok_or_else(|| missing("affectedStat"))?;
    let stat = Stat::parse(raw_stat)
        .ok_or_else(|| DexError::invalid_move(name, format!("unknown stat {}", raw_stat)))?;

    let stages = effect.stages.ok_or_else(|| missing("stages"))?;
    if stages == 0 || !(-6..=6).contains(&stages) {
        return Err(DexError::invalid_move(
            name,
            format!("stage change {} is outside 1-6 in either direction", stages),
        ));
    }

    if let Some(chance) = effect.chance {
        if chance > 100 {
            return Err(DexError::invalid_move(name, format!("chance {} exceeds 100", chance)));
        }
    }

    Ok(MoveEffect::StatChange {
        target,
        stat,
        stages,
        chance: effect.chance,
    })
}

fn parse_target(name: &str, raw: &str) -> Result<MoveTarget, DexError> {
    MoveTarget::from_name(raw)
        .ok_or_else(|| DexError::invalid_move(name, format!("unknown target {}", raw)))
}

fn parse_crit_ratio(name: &str, raw: &str) -> Result<CritRatio, DexError> {
    CritRatio::from_name(raw)
        .ok_or_else(|| DexError::invalid_move(name, format!("unknown critical ratio {}", raw)))
}

fn species_from_dto(dto: &SpeciesDto, catalog: &MoveCatalog) -> Result<Species, DexError> {
    let name = dto.name.as_str();
    if !(1..=2).contains(&dto.types.len()) {
        return Err(DexError::invalid_species(
            name,
            format!("needs one or two types, found {}", dto.types.len()),
        ));
    }
    let types = dto
        .types
        .iter()
        .map(|raw| {
            Type::from_name(raw)
                .ok_or_else(|| DexError::invalid_species(name, format!("unknown type {}", raw)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if dto.moves.is_empty() {
        return Err(DexError::invalid_species(name, "has no moves"));
    }
    let moves = dto
        .moves
        .iter()
        .map(|move_name| {
            catalog
                .get(move_name)
                .map(Arc::clone)
                .ok_or_else(|| DexError::UnknownMove {
                    species: name.to_string(),
                    move_name: move_name.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let stats = dto.base_stats;
    let named = [
        ("hp", stats.hp),
        ("attack", stats.attack),
        ("defense", stats.defense),
        ("specialAttack", stats.special_attack),
        ("specialDefense", stats.special_defense),
        ("speed", stats.speed),
    ];
    if let Some((stat, value)) = named
        .iter()
        .find(|(_, value)| !(1..=MAX_BASE_STAT).contains(value))
    {
        return Err(DexError::invalid_species(
            name,
            format!("base {} {} is outside 1-{}", stat, value, MAX_BASE_STAT),
        ));
    }

    Ok(Species {
        id: dto.id,
        name: name.to_string(),
        types,
        base_stats: BaseStats {
            hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            special_attack: stats.special_attack,
            special_defense: stats.special_defense,
            speed: stats.speed,
        },
        moves,
    })
}

/// A loaded data set: the move catalog plus every species
#[derive(Debug, Clone)]
pub struct Dex {
    moves: Arc<MoveCatalog>,
    species: Vec<Arc<Species>>,
}

impl Dex {
    pub fn from_json(moves_json: &str, species_json: &str) -> Result<Self, DexError> {
        let moves = parse_moves(moves_json)?;
        let species = parse_species(species_json, &moves)?;
        Ok(Self::new(moves, species))
    }

    /// Load `moves.json` and `species.json` from a directory
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, DexError> {
        let dir = dir.as_ref();
        let moves = load_moves(dir.join(MOVES_FILE))?;
        let species = load_species(dir.join(SPECIES_FILE), &moves)?;
        Ok(Self::new(moves, species))
    }

    /// The first-generation data set shipped with the crate
    pub fn bundled() -> Result<Self, DexError> {
        Self::from_json(
            include_str!("../data/moves.json"),
            include_str!("../data/species.json"),
        )
    }

    fn new(moves: MoveCatalog, species: Vec<Species>) -> Self {
        Self {
            moves: Arc::new(moves),
            species: species.into_iter().map(Arc::new).collect(),
        }
    }

    /// Shared catalog handed to every battle built from this data set
    pub fn moves(&self) -> &Arc<MoveCatalog> {
        &self.moves
    }

    pub fn species(&self) -> &[Arc<Species>] {
        &self.species
    }

    /// Case-insensitive species lookup
    pub fn species_by_name(&self, name: &str) -> Option<&Arc<Species>> {
        let name = name.trim();
        self.species.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn species_by_id(&self, id: u16) -> Option<&Arc<Species>> {
        self.species.iter().find(|s| s.id == id)
    }
}
