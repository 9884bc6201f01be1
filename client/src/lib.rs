//! Async battle driver for Stadium.
//!
//! Wraps a [`Battle`](stadium_battle::Battle) in a [`BattleDriver`] that asks
//! two [`Agent`]s for their decisions each round, applies an optional per
//! decision deadline and streams the battle log to subscribers.
//!
//! # Agents
//! - [`RandomAgent`] - Uniformly random moves and replacements
//! - [`ChannelAgent`] - Forwards every request over a channel, for UIs and
//!   remote players
//! - Your own type implementing [`Agent`]
//!
//! # Example Usage
//!
//! ```ignore
//! use stadium_client::{BattleDriver, DriverConfig, RandomAgent};
//!
//! let mut driver = BattleDriver::new(battle, DriverConfig::default());
//! let mut log = driver.subscribe();
//! tokio::spawn(async move {
//!     while let Some(entry) = log.recv().await {
//!         println!("{}", entry);
//!     }
//! });
//!
//! let outcome = driver
//!     .run(&mut [&mut RandomAgent::new(), &mut RandomAgent::new()])
//!     .await?;
//! ```

mod agent;
mod channel;
mod driver;
mod random;

pub use agent::{Agent, first_replacement, first_usable_move};
pub use channel::{AgentMessage, ChannelAgent, Prompt, PromptKind, channel_agent};
pub use driver::{BattleDriver, DEFAULT_MAX_ROUNDS, DriverConfig};
pub use random::RandomAgent;

// Re-export the types agents deal in
pub use stadium_protocol::{BattleRequest, Choice, LogEntry, Player};
