use std::{cmp::Reverse, fs, path::Path};

use burn::{
    module::Module,
    optim::Optimizer,
    record::{FullPrecisionSettings, NamedMpkBytesRecorder, Recorder},
};
use ndarray::Array1;
use ordered_float::OrderedFloat;
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    constants::agent::{
        EPSILON, EPSILON_DECAY, EPSILON_MIN, GAMMA, HIDDEN_UNITS, LEARNING_RATE, MEMORY_CAPACITY,
    },
    error::{Error, Result},
    types::State,
};

use super::{
    memory::ReplayMemory,
    network::{batch_tensor, tensor_rows, Device, QNetwork, TrainBackend},
    trace::QTrace,
    Agent, Experience,
};

type NetworkRecord = <QNetwork<TrainBackend> as Module<TrainBackend>>::Record;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DqnConfig {
    pub hidden_units: usize,
    pub learning_rate: f64,
    pub gamma: f64,
    /// Starting exploration rate
    pub epsilon: f64,
    pub epsilon_min: f64,
    /// Applied to epsilon after every replay
    pub epsilon_decay: f64,
}

impl Default for DqnConfig {
    fn default() -> Self {
        Self {
            hidden_units: HIDDEN_UNITS,
            learning_rate: LEARNING_RATE,
            gamma: GAMMA,
            epsilon: EPSILON,
            epsilon_min: EPSILON_MIN,
            epsilon_decay: EPSILON_DECAY,
        }
    }
}

/// What a checkpoint holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentWeights {
    pub state_size: usize,
    pub action_size: usize,
    pub epsilon: f64,
    /// Network record in burn's named MessagePack format
    pub network: Vec<u8>,
}

fn recorder() -> NamedMpkBytesRecorder<FullPrecisionSettings> {
    NamedMpkBytesRecorder::<FullPrecisionSettings>::new()
}

/// Epsilon-greedy deep Q-learning agent with uniform experience replay.
///
/// `O` is the burn optimizer stepping the network, e.g. `AdamConfig::new().init()`.
pub struct DqnAgent<O> {
    config: DqnConfig,
    state_size: usize,
    action_size: usize,
    network: QNetwork<TrainBackend>,
    optimizer: O,
    device: Device,
    memory: ReplayMemory<MEMORY_CAPACITY>,
    epsilon: f64,
    rng: StdRng,
    trace: QTrace,
}

impl<O> DqnAgent<O>
where
    O: Optimizer<QNetwork<TrainBackend>, TrainBackend>,
{
    pub fn new(state_size: usize, action_size: usize, optimizer: O, rng: StdRng) -> Self {
        Self::with_config(state_size, action_size, DqnConfig::default(), optimizer, rng)
    }

    pub fn with_config(
        state_size: usize,
        action_size: usize,
        config: DqnConfig,
        optimizer: O,
        mut rng: StdRng,
    ) -> Self {
        let device = Device::default();
        let network = QNetwork::seeded(
            state_size,
            config.hidden_units,
            action_size,
            rng.gen(),
            &device,
        );

        Self {
            state_size,
            action_size,
            network,
            optimizer,
            device,
            memory: ReplayMemory::new(),
            epsilon: config.epsilon,
            trace: QTrace::new(action_size),
            config,
            rng,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Action values for one state
    pub fn predict(&self, state: &State) -> Result<Array1<f64>> {
        self.check_state(state)?;

        let values = self
            .network
            .forward(batch_tensor([state], self.state_size, &self.device));
        Ok(tensor_rows(values)?
            .into_iter()
            .next()
            .unwrap_or_else(|| Array1::zeros(self.action_size)))
    }

    fn check_state(&self, state: &State) -> Result<()> {
        if state.len() != self.state_size {
            return Err(Error::ShapeMismatch {
                what: "state",
                expected: self.state_size,
                actual: state.len(),
            });
        }
        Ok(())
    }

    fn check_experience(&self, experience: &Experience) -> Result<()> {
        self.check_state(&experience.state)?;
        self.check_state(&experience.next_state)?;
        if experience.action >= self.action_size {
            return Err(Error::InvalidAction {
                action: experience.action,
                count: self.action_size,
            });
        }
        Ok(())
    }

    /// Bellman target for the taken action
    fn target_value(&self, experience: &Experience, next_values: &Array1<f64>) -> f64 {
        if experience.done {
            return experience.reward;
        }

        let best_next = next_values
            .iter()
            .copied()
            .map(OrderedFloat)
            .max()
            .map_or(0., |value| value.0);

        experience.reward + self.config.gamma * best_next
    }
}

/// Index of the highest value, the first one on ties
fn greedy_action(q_values: &Array1<f64>) -> usize {
    q_values
        .iter()
        .enumerate()
        .max_by_key(|(index, value)| (OrderedFloat(**value), Reverse(*index)))
        .map_or(0, |(index, _)| index)
}

impl<O> Agent for DqnAgent<O>
where
    O: Optimizer<QNetwork<TrainBackend>, TrainBackend>,
{
    fn act(&mut self, state: &State) -> Result<usize> {
        let q_values = self.predict(state)?;
        let action = if self.rng.gen::<f64>() <= self.epsilon {
            self.rng.gen_range(0..self.action_size)
        } else {
            greedy_action(&q_values)
        };

        self.trace.record(&q_values, action);
        Ok(action)
    }

    fn remember(&mut self, experience: Experience) {
        self.memory.push(experience);
    }

    fn replay(&mut self, batch_size: usize) -> Result<()> {
        let batch = self.memory.sample(&mut self.rng, batch_size);
        if batch.is_empty() {
            return Ok(());
        }
        for experience in &batch {
            self.check_experience(experience)?;
        }

        let rows = batch.len();
        let states = batch_tensor(batch.iter().map(|e| &e.state), self.state_size, &self.device);
        let next_states = batch_tensor(
            batch.iter().map(|e| &e.next_state),
            self.state_size,
            &self.device,
        );
        let current = tensor_rows(self.network.forward(states.clone()))?;
        let next = tensor_rows(self.network.forward(next_states))?;

        // Only the taken action's value moves towards its target
        let targets: Vec<State> = batch
            .iter()
            .zip(current)
            .zip(&next)
            .map(|((experience, mut target), next_values)| {
                target[experience.action] = self.target_value(experience, next_values);
                target
            })
            .collect();
        let targets = batch_tensor(&targets, self.action_size, &self.device);

        let (network, loss) = self.network.clone().fit_step(
            &mut self.optimizer,
            states,
            targets,
            self.config.learning_rate,
        );
        self.network = network;

        if self.epsilon > self.config.epsilon_min {
            self.epsilon *= self.config.epsilon_decay;
        }

        debug!(batch = rows, loss, epsilon = self.epsilon, "replayed experience");

        Ok(())
    }

    fn memory_len(&self) -> usize {
        self.memory.len()
    }

    fn q_trace(&self) -> &QTrace {
        &self.trace
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        let weights: AgentWeights = postcard::from_bytes(&bytes)?;

        if weights.state_size != self.state_size {
            return Err(Error::ShapeMismatch {
                what: "network input",
                expected: self.state_size,
                actual: weights.state_size,
            });
        }
        if weights.action_size != self.action_size {
            return Err(Error::ShapeMismatch {
                what: "network output",
                expected: self.action_size,
                actual: weights.action_size,
            });
        }

        let record: NetworkRecord =
            Recorder::<TrainBackend>::load(&recorder(), weights.network, &self.device)
                .map_err(|err| Error::Model(format!("{err:?}")))?;
        self.network = self.network.clone().load_record(record);
        self.epsilon = weights.epsilon;

        info!(path = %path.display(), epsilon = self.epsilon, "loaded agent weights");
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        let record = self.network.clone().into_record();
        let network = Recorder::<TrainBackend>::record(&recorder(), record, ())
            .map_err(|err| Error::Model(format!("{err:?}")))?;

        let encoded = postcard::to_stdvec(&AgentWeights {
            state_size: self.state_size,
            action_size: self.action_size,
            epsilon: self.epsilon,
            network,
        })?;

        fs::write(path, encoded).map_err(|e| Error::io(path, e))
    }
}
