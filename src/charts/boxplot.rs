use std::path::Path;

use plotters::prelude::*;

use crate::charts::axis::{axis_font, caption_font, category_label, compact_number, headroom, INK, PRIMARY};
use crate::charts::{labels_available, ChartError, CANVAS_SIZE};

/// Five-number summary for one box; whiskers already clipped to the data.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub label: String,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64
}

#[derive(Debug, Clone)]
pub struct BoxPlotChart {
    pub title: String,
    pub y_label: String,
    pub boxes: Vec<BoxSummary>
}

pub fn draw_box_plot(path: &Path, chart: &BoxPlotChart) -> Result<(), ChartError> {
    if chart.boxes.is_empty() {
        return Err(ChartError::empty(&chart.title));
    }

    let labelled = labels_available();
    let count = chart.boxes.len();
    let peak = chart.boxes.iter().map(|summary| summary.upper_whisker).fold(0.0, f64::max);
    let names: Vec<String> = chart.boxes.iter().map(|summary| summary.label.clone()).collect();

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
        .build_cartesian_2d(-0.5f64..(count as f64 - 0.5), 0f64..headroom(peak))
        .map_err(ChartError::draw)?;

    if labelled {
        plot.configure_mesh()
            .disable_x_mesh()
            .x_labels(count)
            .x_label_formatter(&|position| category_label(&names, *position))
            .y_label_formatter(&|value| compact_number(*value))
            .y_desc(chart.y_label.as_str())
            .label_style(axis_font())
            .draw()
            .map_err(ChartError::draw)?;
    }

    let outline = INK.stroke_width(2);

    plot.draw_series(chart.boxes.iter().enumerate().map(|(index, summary)| {
        let x = index as f64;
        Rectangle::new([(x - 0.3, summary.q1), (x + 0.3, summary.q3)], PRIMARY.mix(0.45).filled())
    })).map_err(ChartError::draw)?;

    plot.draw_series(chart.boxes.iter().enumerate().map(|(index, summary)| {
        let x = index as f64;
        Rectangle::new([(x - 0.3, summary.q1), (x + 0.3, summary.q3)], outline)
    })).map_err(ChartError::draw)?;

    plot.draw_series(chart.boxes.iter().enumerate().flat_map(|(index, summary)| {
        let x = index as f64;
        [
            PathElement::new(vec![(x - 0.3, summary.median), (x + 0.3, summary.median)], INK.stroke_width(3)),
            PathElement::new(vec![(x, summary.q3), (x, summary.upper_whisker)], outline),
            PathElement::new(vec![(x, summary.q1), (x, summary.lower_whisker)], outline),
            PathElement::new(vec![(x - 0.15, summary.upper_whisker), (x + 0.15, summary.upper_whisker)], outline),
            PathElement::new(vec![(x - 0.15, summary.lower_whisker), (x + 0.15, summary.lower_whisker)], outline),
        ]
    })).map_err(ChartError::draw)?;

    root.present().map_err(ChartError::draw)?;

    Ok(())
}
