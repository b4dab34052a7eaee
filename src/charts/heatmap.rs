use std::path::Path;

use plotters::prelude::*;

use crate::charts::axis::{axis_font, caption_font, category_label, INK};
use crate::charts::typeface::FONT_FAMILY;
use crate::charts::{labels_available, ChartError, CANVAS_SIZE};

const NEGATIVE: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (247.0, 247.0, 247.0);
const POSITIVE: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// A square matrix of values in `[-1, 1]` with the same labels on both axes.
#[derive(Debug, Clone)]
pub struct Heatmap {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>
}

pub fn draw_heatmap(path: &Path, chart: &Heatmap) -> Result<(), ChartError> {
    let size = chart.labels.len();

    if size == 0 || chart.values.len() != size {
        return Err(ChartError::empty(&chart.title));
    }

    let labelled = labels_available();
    // Row 0 is drawn at the top.
    let row_names: Vec<String> = chart.labels.iter().rev().cloned().collect();
    let extent = -0.5f64..(size as f64 - 0.5);

    let root = BitMapBackend::new(path, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(40)
        .x_label_area_size(if labelled { 50 } else { 0 })
        .y_label_area_size(if labelled { 110 } else { 0 });

    if labelled {
        builder.caption(&chart.title, caption_font());
    }

    let mut plot = builder
        .build_cartesian_2d(extent.clone(), extent)
        .map_err(ChartError::draw)?;

    if labelled {
        plot.configure_mesh()
            .disable_mesh()
            .x_labels(size)
            .y_labels(size)
            .x_label_formatter(&|position| category_label(&chart.labels, *position))
            .y_label_formatter(&|position| category_label(&row_names, *position))
            .label_style(axis_font())
            .draw()
            .map_err(ChartError::draw)?;
    }

    let cells: Vec<(f64, f64, f64)> = chart.values.iter().enumerate()
        .flat_map(|(row, values)| {
            let y = (size - 1 - row) as f64;
            values.iter().enumerate().map(move |(column, value)| (column as f64, y, *value))
        })
        .collect();

    plot.draw_series(cells.iter().map(|(x, y, value)| {
        Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], heat_color(*value).filled())
    })).map_err(ChartError::draw)?;

    if labelled {
        plot.draw_series(cells.iter().map(|(x, y, value)| {
            Text::new(format!("{value:.2}"), (x - 0.08, y + 0.05), (FONT_FAMILY, 22).into_font().color(&INK))
        })).map_err(ChartError::draw)?;
    }

    root.present().map_err(ChartError::draw)?;

    Ok(())
}

/// Diverging colour: blue for -1, near-white for 0, red for +1.
pub(super) fn heat_color(value: f64) -> RGBColor {
    let value = if value.is_finite() { value.clamp(-1.0, 1.0) } else { 0.0 };
    let (from, to, weight) = if value < 0.0 { (NEUTRAL, NEGATIVE, -value) } else { (NEUTRAL, POSITIVE, value) };
    let channel = |start: f64, end: f64| (start + (end - start) * weight).round() as u8;

    RGBColor(channel(from.0, to.0), channel(from.1, to.1), channel(from.2, to.2))
}
