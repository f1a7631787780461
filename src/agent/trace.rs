use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::types::Data;

/// Per-step action values seen by the agent, kept for diagnostics only
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QTrace {
    /// One series per action, one entry per `act` call
    values: Vec<Data>,
    /// The action chosen at each call
    actions: Vec<usize>,
}

impl QTrace {
    pub fn new(action_count: usize) -> Self {
        Self {
            values: vec![Vec::new(); action_count],
            actions: Vec::new(),
        }
    }

    pub fn record(&mut self, q_values: &Array1<f64>, action: usize) {
        for (series, value) in self.values.iter_mut().zip(q_values.iter()) {
            series.push(*value);
        }
        self.actions.push(action);
    }

    /// One series per action
    pub fn values(&self) -> &[Data] {
        &self.values
    }

    pub fn action_count(&self) -> usize {
        self.values.len()
    }

    pub fn chosen_actions(&self) -> &[usize] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
