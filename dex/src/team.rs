//! Team building from a loaded data set

use std::sync::Arc;

use stadium_battle::{BattlePokemon, BattleRng, Species, Trainer};
use tracing::debug;

use crate::config::{BattleConfig, MAX_TEAM_SIZE};
use crate::error::DexError;
use crate::loader::Dex;

/// Build a roster from species names, in order
///
/// Names are matched case-insensitively; a species may appear only once.
pub fn build_team(dex: &Dex, names: &[&str], level: u8) -> Result<Vec<BattlePokemon>, DexError> {
    if names.is_empty() || names.len() > MAX_TEAM_SIZE {
        return Err(DexError::InvalidTeam(format!(
            "a team has 1-{} members, got {}",
            MAX_TEAM_SIZE,
            names.len()
        )));
    }

    let mut picked: Vec<&Arc<Species>> = Vec::with_capacity(names.len());
    for name in names {
        let species = dex
            .species_by_name(name)
            .ok_or_else(|| DexError::InvalidTeam(format!("unknown species {}", name)))?;
        if picked.iter().any(|p| Arc::ptr_eq(p, species)) {
            return Err(DexError::InvalidTeam(format!("{} is already on the team", species.name)));
        }
        picked.push(species);
    }

    debug!(members = ?names, level, "team built");
    Ok(picked
        .into_iter()
        .map(|species| BattlePokemon::new(Arc::clone(species), level))
        .collect())
}

/// Draw `size` distinct species uniformly from the data set
pub fn random_team(
    dex: &Dex,
    size: usize,
    level: u8,
    rng: &mut BattleRng,
) -> Result<Vec<BattlePokemon>, DexError> {
    let available = dex.species().len();
    if size == 0 || size > available.min(MAX_TEAM_SIZE) {
        return Err(DexError::InvalidTeam(format!(
            "cannot draw {} members from {} species",
            size, available
        )));
    }

    let mut pool: Vec<&Arc<Species>> = dex.species().iter().collect();
    let mut team = Vec::with_capacity(size);
    for _ in 0..size {
        let species = pool.remove(rng.index(pool.len()));
        team.push(BattlePokemon::new(Arc::clone(species), level));
    }

    debug!(members = ?team.iter().map(BattlePokemon::name).collect::<Vec<_>>(), "random team drawn");
    Ok(team)
}

/// A trainer with a random team sized and levelled by `config`
pub fn random_trainer(
    dex: &Dex,
    name: &str,
    config: &BattleConfig,
    rng: &mut BattleRng,
) -> Result<Trainer, DexError> {
    let team = random_team(dex, config.team_size, config.level, rng)?;
    Ok(Trainer::new(name, team)?)
}

/// A trainer with a hand-picked team levelled by `config`
pub fn named_trainer(
    dex: &Dex,
    name: &str,
    species: &[&str],
    config: &BattleConfig,
) -> Result<Trainer, DexError> {
    let team = build_team(dex, species, config.level)?;
    Ok(Trainer::new(name, team)?)
}
