use std::{fs, path::Path};

use crate::{
    error::{Error, Result},
    types::PriceMatrix,
};

pub fn create_folder_if_not_exists(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

/// Rounds every price to the nearest whole number, ties to even
pub fn round_prices(prices: &mut PriceMatrix) {
    prices.mapv_inplace(f64::round_ties_even);
}
