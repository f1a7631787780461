use std::ops::Range;

use ndarray::s;

use crate::types::PriceMatrix;

/// Training and evaluation windows of one price matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub train: PriceMatrix,
    pub eval: PriceMatrix,
    /// Column indexes of `train` in the source matrix
    pub train_columns: Range<usize>,
    /// Column indexes of `eval` in the source matrix
    pub eval_columns: Range<usize>,
}

/// Splits along the time axis: columns `[0, split)` train, `[split, n)` evaluate.
///
/// A split past the last column yields every column for training and an
/// empty evaluation window; callers decide whether that is usable.
pub fn split_at_column(prices: &PriceMatrix, split: usize) -> Partition {
    let split = split.min(prices.ncols());

    Partition {
        train: prices.slice(s![.., ..split]).to_owned(),
        eval: prices.slice(s![.., split..]).to_owned(),
        train_columns: 0..split,
        eval_columns: split..prices.ncols(),
    }
}
