use std::sync::{Mutex, PoisonError};

use burn::{
    backend::{Autodiff, NdArray},
    module::Module,
    nn::{
        loss::{MseLoss, Reduction},
        Initializer, Linear, LinearConfig, Relu,
    },
    optim::{GradientsParams, Optimizer},
    tensor::{
        backend::{AutodiffBackend, Backend},
        ElementConversion, Tensor, TensorData,
    },
};
use ndarray::Array1;

use crate::{
    error::{Error, Result},
    types::State,
};

pub type TrainBackend = Autodiff<NdArray>;
pub type Device = <TrainBackend as Backend>::Device;

/// The backend RNG is process-wide, seeding and initializing must not interleave
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Action values from one ReLU hidden layer and a linear output
#[derive(Module, Debug)]
pub struct QNetwork<B: Backend> {
    hidden: Linear<B>,
    output: Linear<B>,
    activation: Relu,
}

impl<B: Backend> QNetwork<B> {
    /// He-uniform layers, drawn from the backend RNG seeded with `seed`
    pub fn seeded(inputs: usize, hidden: usize, outputs: usize, seed: u64, device: &B::Device) -> Self {
        let initializer = Initializer::KaimingUniform {
            gain: 2f64.sqrt(),
            fan_out_only: false,
        };

        let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        B::seed(seed);

        let network = Self {
            hidden: LinearConfig::new(inputs, hidden)
                .with_initializer(initializer.clone())
                .init(device),
            output: LinearConfig::new(hidden, outputs)
                .with_initializer(initializer)
                .init(device),
            activation: Relu::new(),
        };

        // Parameters are initialized lazily, force it while the seed holds
        let _ = network.forward(Tensor::zeros([1, inputs], device));
        network
    }

    /// `[batch, inputs]` states to `[batch, outputs]` action values
    pub fn forward(&self, states: Tensor<B, 2>) -> Tensor<B, 2> {
        let hidden = self.activation.forward(self.hidden.forward(states));
        self.output.forward(hidden)
    }
}

impl<B: AutodiffBackend> QNetwork<B> {
    /// One optimizer step on the mean squared error towards `targets`.
    ///
    /// Returns the updated network and the loss before the step.
    pub fn fit_step<O>(
        self,
        optimizer: &mut O,
        states: Tensor<B, 2>,
        targets: Tensor<B, 2>,
        learning_rate: f64,
    ) -> (Self, f64)
    where
        O: Optimizer<Self, B>,
    {
        let predicted = self.forward(states);
        let loss = MseLoss::new().forward(predicted, targets, Reduction::Mean);
        let value = loss.clone().into_scalar().elem::<f64>();

        let grads = GradientsParams::from_grads(loss.backward(), &self);
        (optimizer.step(learning_rate, self, grads), value)
    }
}

/// Stacks `rows` of width `width` into one `[rows, width]` tensor
pub fn batch_tensor<'a, B: Backend>(
    rows: impl IntoIterator<Item = &'a State>,
    width: usize,
    device: &B::Device,
) -> Tensor<B, 2> {
    let values: Vec<f32> = rows
        .into_iter()
        .flat_map(|row| row.iter().map(|value| *value as f32))
        .collect();
    let count = values.len() / width.max(1);

    Tensor::from_data(TensorData::new(values, [count, width]), device)
}

/// Splits a `[rows, width]` tensor back into one array per row
pub fn tensor_rows<B: Backend>(tensor: Tensor<B, 2>) -> Result<Vec<Array1<f64>>> {
    let [_, width] = tensor.dims();
    let values = tensor
        .into_data()
        .to_vec::<f32>()
        .map_err(|err| Error::Model(format!("{err:?}")))?;

    Ok(values
        .chunks(width.max(1))
        .map(|row| row.iter().map(|value| f64::from(*value)).collect())
        .collect())
}
