use std::path::Path;

use crate::{error::Result, types::State};

pub mod dqn;
pub mod memory;
pub mod network;
pub mod trace;

pub use dqn::{AgentWeights, DqnAgent, DqnConfig};
pub use memory::ReplayMemory;
pub use trace::QTrace;

/// One transition handed to the agent for later learning
#[derive(Debug, Clone, PartialEq)]
pub struct Experience {
    pub state: State,
    pub action: usize,
    pub reward: f64,
    pub next_state: State,
    pub done: bool,
}

/// A learner that picks actions from scaled states.
///
/// Exploration, the experience store and the update rule are all internal.
pub trait Agent {
    fn act(&mut self, state: &State) -> Result<usize>;

    fn remember(&mut self, experience: Experience);

    /// One learning update from a batch of `batch_size` remembered experiences
    fn replay(&mut self, batch_size: usize) -> Result<()>;

    /// How many experiences are currently remembered
    fn memory_len(&self) -> usize;

    /// Q-values seen by every `act` so far. Diagnostics only.
    fn q_trace(&self) -> &QTrace;

    fn load(&mut self, path: &Path) -> Result<()>;

    fn save(&self, path: &Path) -> Result<()>;
}
