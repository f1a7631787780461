use crate::{error::Result, types::State};

/// Extra facts about a step that are not part of the observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepInfo {
    /// Portfolio value after the step
    pub cur_val: f64,
}

/// The result of a single environment step
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub next_state: State,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

pub trait Environment {
    /// Starts a new episode and returns its first observation
    fn reset(&mut self) -> Result<State>;

    fn step(&mut self, action: usize) -> Result<Snapshot>;

    fn observation_size(&self) -> usize;

    fn action_count(&self) -> usize;

    /// Upper bound on the number of steps in an episode
    fn episode_length(&self) -> usize;
}
