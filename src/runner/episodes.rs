use std::path::PathBuf;

use tracing::{info, warn};

use crate::{
    agent::{Agent, Experience},
    error::Result,
    gym::{Environment, Scaler},
    types::Data,
};

use super::{
    layout::ArtifactLayout,
    mode::{RunId, RunMode},
};

/// Everything fixed about a run before its first episode
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub mode: RunMode,
    pub episodes: usize,
    pub run_id: RunId,
    pub layout: ArtifactLayout,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Final portfolio value of every episode that reached `done`, in episode order
    pub end_values: Data,
    /// Episodes that used up their step bound without reaching `done`
    pub truncated_episodes: Vec<usize>,
    pub checkpoints: Vec<PathBuf>,
    pub replays: usize,
    pub steps: usize,
}

enum EpisodeEnd {
    Done(f64),
    Truncated,
}

/// Drives the environment and agent through every episode of a run.
///
/// Both are borrowed exclusively for the whole run. The agent only ever sees
/// states that went through `scaler`.
pub struct EpisodeRunner<'a, E, A, S> {
    env: &'a mut E,
    agent: &'a mut A,
    scaler: &'a S,
    plan: &'a RunPlan,
}

impl<'a, E, A, S> EpisodeRunner<'a, E, A, S>
where
    E: Environment,
    A: Agent,
    S: Scaler,
{
    pub fn new(env: &'a mut E, agent: &'a mut A, scaler: &'a S, plan: &'a RunPlan) -> Self {
        Self {
            env,
            agent,
            scaler,
            plan,
        }
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let episodes = self.plan.episodes;

        for episode in 0..episodes {
            match self.run_episode(&mut summary)? {
                EpisodeEnd::Done(end_value) => {
                    info!(
                        episode = episode + 1,
                        episodes,
                        end_value,
                        "episode end value"
                    );
                    summary.end_values.push(end_value);
                }
                EpisodeEnd::Truncated => {
                    warn!(
                        episode = episode + 1,
                        episodes,
                        steps = self.env.episode_length(),
                        "episode hit its step bound without finishing, no end value recorded"
                    );
                    summary.truncated_episodes.push(episode);
                }
            }

            if let RunMode::Train {
                checkpoint_every, ..
            } = self.plan.mode
            {
                if checkpoint_every > 0 && (episode + 1) % checkpoint_every == 0 {
                    let path = self.plan.layout.checkpoint_path(&self.plan.run_id);
                    self.agent.save(&path)?;

                    info!(episode = episode + 1, path = %path.display(), "saved checkpoint");
                    summary.checkpoints.push(path);
                }
            }
        }

        Ok(summary)
    }

    fn run_episode(&mut self, summary: &mut RunSummary) -> Result<EpisodeEnd> {
        let mut state = self.scaler.transform(&self.env.reset()?);

        for _ in 0..self.env.episode_length() {
            let action = self.agent.act(&state)?;
            let snapshot = self.env.step(action)?;
            let next_state = self.scaler.transform(&snapshot.next_state);
            summary.steps += 1;

            if self.plan.mode.is_training() {
                self.agent.remember(Experience {
                    state,
                    action,
                    reward: snapshot.reward,
                    next_state: next_state.clone(),
                    done: snapshot.done,
                });
            }
            state = next_state;

            if snapshot.done {
                return Ok(EpisodeEnd::Done(snapshot.info.cur_val));
            }

            if let RunMode::Train { batch_size, .. } = self.plan.mode {
                if self.agent.memory_len() > batch_size {
                    self.agent.replay(batch_size)?;
                    summary.replays += 1;
                }
            }
        }

        Ok(EpisodeEnd::Truncated)
    }
}
