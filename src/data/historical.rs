use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::info;

use crate::{
    error::{Error, Result},
    types::{Data, PriceMatrix},
    utils::round_prices,
};

const CLOSE_COLUMN: &str = "close";

pub fn ticker_path(dir: &Path, ticker: &str) -> PathBuf {
    dir.join(format!("daily_{ticker}.csv"))
}

/// Loads the close prices of every ticker into one matrix, one row per ticker.
///
/// Source files list the most recent day first. Every series is cut to the
/// shortest file's length, keeping the most recent days, so columns line up
/// on the latest date. Prices are rounded to whole numbers.
pub fn load_price_matrix(dir: &Path, tickers: &[&str]) -> Result<PriceMatrix> {
    let mut series = Vec::with_capacity(tickers.len());

    for ticker in tickers {
        series.push(read_close_prices(&ticker_path(dir, ticker))?);
    }

    let steps = series.iter().map(Vec::len).min().unwrap_or(0);
    if steps == 0 {
        return Err(Error::EmptyData(format!(
            "no close prices for {tickers:?} in {}",
            dir.display()
        )));
    }

    let mut prices = Array2::zeros((series.len(), steps));
    for (mut row, closes) in prices.rows_mut().into_iter().zip(series.iter()) {
        // Newest first on disk, oldest first in the matrix
        for (cell, price) in row.iter_mut().zip(closes[..steps].iter().rev()) {
            *cell = *price;
        }
    }

    round_prices(&mut prices);

    info!(
        tickers = tickers.len(),
        steps,
        "loaded price history from {}",
        dir.display()
    );

    Ok(prices)
}

/// Close prices in file order (most recent first)
fn read_close_prices(path: &Path) -> Result<Data> {
    let mut reader = csv::Reader::from_path(path)?;

    let column = reader
        .headers()?
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(CLOSE_COLUMN))
        .ok_or_else(|| {
            Error::EmptyData(format!("{} has no {CLOSE_COLUMN} column", path.display()))
        })?;

    let mut closes = Vec::new();
    for record in reader.records() {
        let record = record?;
        let raw = record.get(column).unwrap_or_default().trim();
        let price = raw.parse::<f64>().map_err(|_| Error::InvalidPrice {
            path: path.to_path_buf(),
            value: raw.to_string(),
        })?;
        closes.push(price);
    }

    Ok(closes)
}
