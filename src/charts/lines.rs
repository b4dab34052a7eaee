use std::path::Path;

use plotters::prelude::*;

use crate::charts::axis::{annotation_font, axis_font, caption_font, category_label, compact_number, headroom, tick_font, ACCENT, PRIMARY};
use crate::charts::{labels_available, ChartError, CANVAS_SIZE};

/// A line over ordered categories (e.g. months), one value per category.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(String, f64)>
}

/// A smoothed density curve sampled on an ascending grid.
#[derive(Debug, Clone)]
pub struct DensityChart {
    pub title: String,
    pub x_label: String,
    pub curve: Vec<(f64, f64)>
}

pub fn draw_line_chart(path: &Path, chart: &LineChart) -> Result<(), ChartError> {
    if chart.points.is_empty() {
        return Err(ChartError::empty(&chart.title));
    }

    let labelled = labels_available();
    let count = chart.points.len();
    let peak = chart.points.iter().map(|(_, value)| *value).fold(0.0, f64::max);
    let names: Vec<String> = chart.points.iter().map(|(name, _)| name.clone()).collect();
    let points: Vec<(f64, f64)> = chart.points.iter().enumerate()
        .map(|(index, (_, value))| (index as f64, *value))
        .collect();

    let root = BitMapBackend::new(path, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(20)
        .x_label_area_size(if labelled { 60 } else { 0 })
        .y_label_area_size(if labelled { 90 } else { 0 });

    if labelled {
        builder.caption(&chart.title, caption_font());
    }

    let mut plot = builder
        .build_cartesian_2d(-0.5f64..(count as f64 - 0.5), 0f64..headroom(peak))
        .map_err(ChartError::draw)?;

    if labelled {
        plot.configure_mesh()
            .x_labels(count)
            .x_label_formatter(&|position| category_label(&names, *position))
            .y_label_formatter(&|value| compact_number(*value))
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .label_style(tick_font())
            .axis_desc_style(axis_font())
            .draw()
            .map_err(ChartError::draw)?;
    }

    plot.draw_series(LineSeries::new(points.iter().copied(), PRIMARY.stroke_width(2)))
        .map_err(ChartError::draw)?;
    plot.draw_series(points.iter().map(|point| Circle::new(*point, 4, ACCENT.filled())))
        .map_err(ChartError::draw)?;

    if labelled {
        plot.draw_series(points.iter().map(|(x, y)| {
            Text::new(compact_number(*y), (*x - 0.3, *y + peak * 0.07), annotation_font())
        })).map_err(ChartError::draw)?;
    }

    root.present().map_err(ChartError::draw)?;

    Ok(())
}

pub fn draw_density_chart(path: &Path, chart: &DensityChart) -> Result<(), ChartError> {
    let (Some((low, _)), Some((high, _))) = (chart.curve.first(), chart.curve.last()) else {
        return Err(ChartError::empty(&chart.title));
    };

    let labelled = labels_available();
    let peak = chart.curve.iter().map(|(_, density)| *density).fold(0.0, f64::max);
    let (low, high) = if high > low { (*low, *high) } else { (*low - 1.0, *high + 1.0) };

    let root = BitMapBackend::new(path, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(20)
        .x_label_area_size(if labelled { 50 } else { 0 })
        .y_label_area_size(if labelled { 90 } else { 0 });

    if labelled {
        builder.caption(&chart.title, caption_font());
    }

    let mut plot = builder
        .build_cartesian_2d(low..high, 0f64..headroom(peak))
        .map_err(ChartError::draw)?;

    if labelled {
        plot.configure_mesh()
            .disable_x_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc("Density")
            .y_label_formatter(&|value| format!("{value:.3}"))
            .label_style(axis_font())
            .draw()
            .map_err(ChartError::draw)?;
    }

    plot.draw_series(
        AreaSeries::new(chart.curve.iter().copied(), 0.0, PRIMARY.mix(0.3).filled())
            .border_style(PRIMARY.stroke_width(2))
    ).map_err(ChartError::draw)?;

    root.present().map_err(ChartError::draw)?;

    Ok(())
}
