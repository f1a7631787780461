use plotters::{
    element::Rectangle,
    prelude::SeriesLabelPosition,
    style::{Color, RGBColor},
};

use super::theme;

pub const CHART_DIMS: (u32, u32) = (2560, 780);

pub fn legend_position() -> SeriesLabelPosition {
    SeriesLabelPosition::UpperRight
}

pub fn legend_rect(color: &RGBColor) -> impl Fn((i32, i32)) -> Rectangle<(i32, i32)> + '_ {
    move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.mix(0.8).filled())
}

pub fn legend_font() -> (&'static str, i32, &'static RGBColor) {
    ("sans-serif", 14, &theme::TEXT)
}

/// Min and max of the finite values, padded by 5% of their spread
pub fn padded_bounds<'a>(values: impl IntoIterator<Item = &'a f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |bounds, &value| match bounds {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })?;

    let range = (max - min).max(0.01);
    Some((min - range * 0.05, max + range * 0.05))
}

/// Trailing average over `window` values, NaN until the window fills
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || data.len() < window {
        return data.to_vec();
    }

    let mut result = vec![f64::NAN; window - 1];
    let mut sum: f64 = data[..window].iter().sum();
    result.push(sum / window as f64);

    for i in window..data.len() {
        sum += data[i] - data[i - window];
        result.push(sum / window as f64);
    }
    result
}
