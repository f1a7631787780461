use ndarray::{Array1, Array2};

/// A list of values, where the last index is the most recent
pub type Data = Vec<f64>;

/// Rows are tickers, columns are time steps (oldest first)
pub type PriceMatrix = Array2<f64>;

/// A single observation of the environment
pub type State = Array1<f64>;
