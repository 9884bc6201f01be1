//! An agent fed from outside the driver, e.g. by a UI task or a network peer

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use stadium_protocol::{BattleRequest, Choice, LogEntry};
use tokio::sync::{mpsc, oneshot};

use crate::agent::Agent;

/// What the driver is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Action,
    /// Only `Choice::Switch` is accepted
    Replacement,
}

/// A pending decision; answer it with [`Prompt::respond`]
#[derive(Debug)]
pub struct Prompt {
    pub kind: PromptKind,
    pub request: BattleRequest,
    reply: oneshot::Sender<Choice>,
}

impl Prompt {
    pub fn respond(self, choice: Choice) -> Result<()> {
        self.reply
            .send(choice)
            .map_err(|_| anyhow!("Driver stopped waiting for this decision"))
    }
}

/// Messages delivered to whoever answers for a [`ChannelAgent`]
#[derive(Debug)]
pub enum AgentMessage {
    Prompt(Prompt),
    Log(Vec<LogEntry>),
}

/// Agent that forwards every request over a channel and awaits the answer
#[derive(Debug)]
pub struct ChannelAgent {
    tx: mpsc::UnboundedSender<AgentMessage>,
}

/// Create a channel-fed agent and the receiving end its answers come from
pub fn channel_agent() -> (ChannelAgent, mpsc::UnboundedReceiver<AgentMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelAgent { tx }, rx)
}

impl ChannelAgent {
    async fn ask(&self, kind: PromptKind, request: &BattleRequest) -> Result<Choice> {
        let (reply, answer) = oneshot::channel();
        self.tx
            .send(AgentMessage::Prompt(Prompt {
                kind,
                request: request.clone(),
                reply,
            }))
            .map_err(|_| anyhow!("Player disconnected"))?;
        answer
            .await
            .map_err(|_| anyhow!("Player dropped the prompt without answering"))
    }
}

#[async_trait]
impl Agent for ChannelAgent {
    async fn choose_action(&mut self, request: &BattleRequest) -> Result<Choice> {
        self.ask(PromptKind::Action, request).await
    }

    async fn choose_replacement(&mut self, request: &BattleRequest) -> Result<usize> {
        match self.ask(PromptKind::Replacement, request).await? {
            Choice::Switch(index) => Ok(index),
            other => bail!("Replacement must be a switch, got {}", other),
        }
    }

    async fn on_log(&mut self, entries: &[LogEntry]) {
        // A player who stopped listening only misses log updates
        let _ = self.tx.send(AgentMessage::Log(entries.to_vec()));
    }
}
