use anyhow::Result;
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use stadium_protocol::{BattleRequest, Choice};
use tracing::debug;

use crate::agent::Agent;

/// Picks uniformly among usable moves, and among healthy bench members when
/// a replacement is needed. Never switches voluntarily.
#[derive(Debug)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for RandomAgent {
    async fn choose_action(&mut self, request: &BattleRequest) -> Result<Choice> {
        let slot = request.usable_moves().choose(&mut self.rng).unwrap_or(0);
        debug!(side = %request.side, slot, "random move");
        Ok(Choice::Move(slot))
    }

    async fn choose_replacement(&mut self, request: &BattleRequest) -> Result<usize> {
        Ok(request.switch_targets().choose(&mut self.rng).unwrap_or(0))
    }
}
