use std::path::Path;

use plotters::{
    prelude::{BitMapBackend, IntoDrawingArea},
    series::LineSeries,
    style::ShapeStyle,
};

use super::{
    theme,
    utils::{legend_font, legend_position, legend_rect, padded_bounds, CHART_DIMS},
};
use crate::{agent::QTrace, constants::CHART_IMAGE_FORMAT, error::Result};

/// Every action's Q-value over all `act` calls of the run, one line each.
///
/// Writes `{dir}/{name}.png`. Nothing is written for an empty trace.
pub fn q_value_chart(dir: &Path, name: &str, trace: &QTrace) -> Result<()> {
    let Some((y_min, y_max)) = padded_bounds(trace.values().iter().flatten()) else {
        return Ok(());
    };

    let path = dir.join(format!("{name}.{CHART_IMAGE_FORMAT}"));
    let root = BitMapBackend::new(&path, CHART_DIMS).into_drawing_area();
    root.fill(&theme::BASE)?;

    let mut chart = plotters::chart::ChartBuilder::on(&root)
        .caption(name, ("sans-serif", 20, &theme::TEXT))
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0..trace.len() as u32, y_min..y_max)?;

    chart
        .configure_mesh()
        .label_style(("sans-serif", 15, &theme::TEXT))
        .axis_style(&theme::SURFACE1)
        .light_line_style(&theme::SURFACE0)
        .x_desc("step")
        .y_desc("Q")
        .draw()?;

    for (action, values) in trace.values().iter().enumerate() {
        let color = &theme::SERIES[action % theme::SERIES.len()];

        chart
            .draw_series(LineSeries::new(
                values
                    .iter()
                    .enumerate()
                    .map(|(step, value)| (step as u32, *value)),
                ShapeStyle::from(color).stroke_width(1),
            ))?
            .label(format!("action {action}"))
            .legend(legend_rect(color));
    }

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
    fn empty_trace_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        q_value_chart(dir.path(), "q_values", &QTrace::new(27)).unwrap();

        assert!(!dir.path().join("q_values.png").exists());
    }
}
