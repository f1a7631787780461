use ndarray::{Array1, Array2, Axis};
use rand::Rng;
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    gym::base::Environment,
    types::State,
};

pub trait Scaler {
    fn transform(&self, state: &State) -> State;
}

/// Standardizes each feature to zero mean and unit variance
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    /// Fits on `samples`, one observation per row.
    ///
    /// Features that never vary keep a scale of 1 so they are only centered.
    pub fn fit(samples: &Array2<f64>) -> Result<Self> {
        let mean = samples
            .mean_axis(Axis(0))
            .ok_or_else(|| Error::EmptyData("no samples to fit the scaler on".to_string()))?;
        let scale = samples
            .std_axis(Axis(0), 0.)
            .mapv(|std| if std > f64::EPSILON { std } else { 1. });

        Ok(Self { mean, scale })
    }

    /// A scaler that leaves states untouched
    pub fn identity(size: usize) -> Self {
        Self {
            mean: Array1::zeros(size),
            scale: Array1::ones(size),
        }
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn scale(&self) -> &Array1<f64> {
        &self.scale
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, state: &State) -> State {
        (state - &self.mean) / &self.scale
    }
}

/// Fits a [`StandardScaler`] on states visited by a uniformly random policy.
///
/// The agent under training never drives these episodes, so its behavior
/// cannot leak into the scaling statistics.
pub fn fit_with_random_policy<E: Environment, R: Rng>(
    env: &mut E,
    rng: &mut R,
    episodes: usize,
) -> Result<StandardScaler> {
    let size = env.observation_size();
    let actions = env.action_count();
    let mut flat = Vec::new();

    for _ in 0..episodes {
        flat.extend(env.reset()?.iter());

        for _ in 0..env.episode_length() {
            let snapshot = env.step(rng.gen_range(0..actions))?;
            flat.extend(snapshot.next_state.iter());

            if snapshot.done {
                break;
            }
        }
    }

    let rows = flat.len() / size.max(1);
    let samples = Array2::from_shape_vec((rows, size), flat).map_err(|_| Error::ShapeMismatch {
        what: "scaler sample",
        expected: size,
        actual: rows,
    })?;

    let scaler = StandardScaler::fit(&samples)?;
    info!(samples = rows, episodes, "fitted scaler on random-policy states");
    debug!(mean = %scaler.mean(), scale = %scaler.scale(), "scaler statistics");

    Ok(scaler)
}
