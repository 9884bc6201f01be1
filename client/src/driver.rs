//! Async round driver
//!
//! [`BattleDriver`] owns a [`Battle`] and asks two [`Agent`]s for decisions
//! each round. Agents are awaited one after the other, each under an optional
//! deadline; an agent that misses it gets the default decision instead.

use std::time::Duration;

use anyhow::{Context, Result};
use stadium_battle::{Battle, Outcome};
use stadium_protocol::{BattleRequest, Choice, LogEntry, Player};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::agent::{Agent, first_replacement, first_usable_move};

/// Default round cap for [`BattleDriver::run`]
pub const DEFAULT_MAX_ROUNDS: u32 = 500;

#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Deadline for each agent decision; `None` waits forever
    pub choice_timeout: Option<Duration>,
    /// Rounds [`BattleDriver::run`] plays before giving up
    pub max_rounds: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            choice_timeout: None,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

#[derive(Debug)]
pub struct BattleDriver {
    battle: Battle,
    config: DriverConfig,
    log_tx: Option<mpsc::UnboundedSender<LogEntry>>,
    /// Log entries already delivered
    seen: usize,
}

impl BattleDriver {
    pub fn new(battle: Battle, config: DriverConfig) -> Self {
        Self {
            battle,
            config,
            log_tx: None,
            seen: 0,
        }
    }

    /// Stream every log entry, starting with those already delivered to agents.
    /// Replaces any earlier subscriber.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<LogEntry> {
        let (tx, rx) = mpsc::unbounded_channel();
        for entry in &self.battle.log()[..self.seen] {
            let _ = tx.send(entry.clone());
        }
        self.log_tx = Some(tx);
        rx
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn into_battle(self) -> Battle {
        self.battle
    }

    /// Play one round: replacements, then actions, then resolution
    pub async fn play_round(&mut self, agents: &mut [&mut dyn Agent; 2]) -> Result<Option<Outcome>> {
        for side in self.battle.begin_round()? {
            let request = self.battle.request(side);
            let index = self
                .replacement(side, &mut *agents[side.index()], &request)
                .await?;
            self.battle
                .replace(side, index)
                .with_context(|| format!("{} sent an invalid replacement", side))?;
        }

        let mut choices = [Choice::Move(0); 2];
        for side in Player::BOTH {
            choices[side.index()] = match self.battle.forced_choice(side) {
                Some(choice) => {
                    debug!(%side, %choice, "side is locked in");
                    choice
                }
                None => {
                    let request = self.battle.request(side);
                    self.action(side, &mut *agents[side.index()], &request).await?
                }
            };
        }

        let outcome = self
            .battle
            .resolve_round(choices)
            .context("Round could not be resolved")?;
        self.flush(agents).await;

        if let Some(outcome) = outcome {
            info!(turn = self.battle.turn(), ?outcome, "battle finished");
        }
        Ok(outcome)
    }

    /// Play rounds until the battle ends or the round cap is reached
    pub async fn run(&mut self, agents: &mut [&mut dyn Agent; 2]) -> Result<Option<Outcome>> {
        for _ in 0..self.config.max_rounds {
            if let Some(outcome) = self.play_round(agents).await? {
                return Ok(Some(outcome));
            }
        }

        warn!(max_rounds = self.config.max_rounds, "round cap reached without a winner");
        Ok(self.battle.outcome())
    }

    async fn action(
        &self,
        side: Player,
        agent: &mut dyn Agent,
        request: &BattleRequest,
    ) -> Result<Choice> {
        let Some(limit) = self.config.choice_timeout else {
            return agent.choose_action(request).await;
        };

        match tokio::time::timeout(limit, agent.choose_action(request)).await {
            Ok(choice) => choice,
            Err(_) => {
                let fallback = first_usable_move(request);
                warn!(%side, ?limit, %fallback, "agent timed out, using default move");
                Ok(fallback)
            }
        }
    }

    async fn replacement(
        &self,
        side: Player,
        agent: &mut dyn Agent,
        request: &BattleRequest,
    ) -> Result<usize> {
        let Some(limit) = self.config.choice_timeout else {
            return agent.choose_replacement(request).await;
        };

        match tokio::time::timeout(limit, agent.choose_replacement(request)).await {
            Ok(index) => index,
            Err(_) => {
                let fallback = first_replacement(request);
                warn!(%side, ?limit, fallback, "agent timed out, using first healthy replacement");
                Ok(fallback)
            }
        }
    }

    /// Deliver entries logged since the last flush
    async fn flush(&mut self, agents: &mut [&mut dyn Agent; 2]) {
        let fresh = self.battle.log_since(self.seen).to_vec();
        if fresh.is_empty() {
            return;
        }
        self.seen += fresh.len();

        if let Some(tx) = &self.log_tx {
            let closed = fresh.iter().any(|entry| tx.send(entry.clone()).is_err());
            if closed {
                debug!("log subscriber went away");
                self.log_tx = None;
            }
        }

        for agent in agents.iter_mut() {
            agent.on_log(&fresh).await;
        }
    }
}
