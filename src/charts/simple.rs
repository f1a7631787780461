use std::path::Path;

use plotters::{
    prelude::{BitMapBackend, IntoDrawingArea},
    series::{AreaSeries, LineSeries},
    style::{Color, ShapeStyle},
};

use super::{
    theme,
    utils::{legend_font, legend_position, legend_rect, moving_average, padded_bounds, CHART_DIMS},
};
use crate::{constants::CHART_IMAGE_FORMAT, error::Result};

/// One series as a filled area with its moving average on top.
///
/// Writes `{dir}/{name}.png`. Nothing is written for empty data.
pub fn simple_chart(dir: &Path, name: &str, data: &[f64]) -> Result<()> {
    let Some((y_min, y_max)) = padded_bounds(data) else {
        return Ok(());
    };

    let path = dir.join(format!("{name}.{CHART_IMAGE_FORMAT}"));
    let root = BitMapBackend::new(&path, CHART_DIMS).into_drawing_area();
    root.fill(&theme::BASE)?;

    let mut chart = plotters::chart::ChartBuilder::on(&root)
        .caption(name, ("sans-serif", 20, &theme::TEXT))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0..data.len() as u32, y_min..y_max)?;

    chart
        .configure_mesh()
        .label_style(("sans-serif", 15, &theme::TEXT))
        .axis_style(&theme::SURFACE1)
        .light_line_style(&theme::SURFACE0)
        .draw()?;

    chart
        .draw_series(
            AreaSeries::new(
                data.iter()
                    .enumerate()
                    .map(|(index, value)| (index as u32, *value)),
                y_min,
                theme::BLUE.mix(0.2),
            )
            .border_style(ShapeStyle::from(&theme::BLUE).stroke_width(1)),
        )?
        .label("value")
        .legend(legend_rect(&theme::BLUE));

    let window = (data.len() / 10).clamp(2, 50);
    chart
        .draw_series(LineSeries::new(
            moving_average(data, window)
                .into_iter()
                .enumerate()
                .filter(|(_, value)| !value.is_nan())
                .map(|(index, value)| (index as u32, value)),
            ShapeStyle::from(&theme::YELLOW).stroke_width(1),
        ))?
        .label("MA")
        .legend(legend_rect(&theme::YELLOW));

    chart
        .configure_series_labels()
        .position(legend_position())
        .background_style(&theme::SURFACE0)
        .border_style(&theme::SURFACE1)
        .label_font(legend_font())
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        simple_chart(dir.path(), "portfolio", &[]).unwrap();

        assert!(!dir.path().join("portfolio.png").exists());
    }
}
