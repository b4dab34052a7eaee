use std::path::Path;

use plotters::prelude::*;

use crate::charts::axis::{annotation_font, axis_font, caption_font, category_label, compact_number, grouped_number, headroom, PRIMARY};
use crate::charts::{labels_available, ChartError, CANVAS_SIZE};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Orientation {
    Vertical,
    Horizontal
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64
}

/// A ranked bar chart; bars are drawn in the order given, first bar leftmost or topmost.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub title: String,
    pub value_label: String,
    pub orientation: Orientation,
    pub bars: Vec<Bar>
}

pub fn draw_bar_chart(path: &Path, chart: &BarChart) -> Result<(), ChartError> {
    if chart.bars.is_empty() {
        return Err(ChartError::empty(&chart.title));
    }

    let root = BitMapBackend::new(path, CANVAS_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::draw)?;

    match chart.orientation {
        Orientation::Vertical => draw_vertical(&root, chart)?,
        Orientation::Horizontal => draw_horizontal(&root, chart)?
    }

    root.present().map_err(ChartError::draw)?;

    Ok(())
}

fn draw_vertical(root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>, chart: &BarChart) -> Result<(), ChartError> {
    let labelled = labels_available();
    let count = chart.bars.len();
    let peak = chart.bars.iter().map(|bar| bar.value).fold(0.0, f64::max);
    let names: Vec<String> = chart.bars.iter().map(|bar| bar.label.clone()).collect();

    let mut builder = ChartBuilder::on(root);
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
            .y_desc(chart.value_label.as_str())
            .label_style(axis_font())
            .draw()
            .map_err(ChartError::draw)?;
    }

    plot.draw_series(chart.bars.iter().enumerate().map(|(index, bar)| {
        let x = index as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, bar.value)], PRIMARY.filled())
    })).map_err(ChartError::draw)?;

    if labelled {
        plot.draw_series(chart.bars.iter().enumerate().map(|(index, bar)| {
            let x = index as f64 - 0.35;
            Text::new(grouped_number(bar.value), (x, bar.value + peak * 0.06), annotation_font())
        })).map_err(ChartError::draw)?;
    }

    Ok(())
}

fn draw_horizontal(root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>, chart: &BarChart) -> Result<(), ChartError> {
    let labelled = labels_available();
    let count = chart.bars.len();
    let peak = chart.bars.iter().map(|bar| bar.value).fold(0.0, f64::max);

    // First bar goes on top, so category positions run bottom-up in reverse.
    let names: Vec<String> = chart.bars.iter().rev().map(|bar| bar.label.clone()).collect();
    let row = |index: usize| (count - 1 - index) as f64;

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(20)
        .x_label_area_size(if labelled { 50 } else { 0 })
        .y_label_area_size(if labelled { 330 } else { 0 });

    if labelled {
        builder.caption(&chart.title, caption_font());
    }

    let mut plot = builder
        .build_cartesian_2d(0f64..headroom(peak), -0.5f64..(count as f64 - 0.5))
        .map_err(ChartError::draw)?;

    if labelled {
        plot.configure_mesh()
            .disable_y_mesh()
            .y_labels(count)
            .y_label_formatter(&|position| category_label(&names, *position))
            .x_label_formatter(&|value| compact_number(*value))
            .x_desc(chart.value_label.as_str())
            .label_style(axis_font())
            .draw()
            .map_err(ChartError::draw)?;
    }

    plot.draw_series(chart.bars.iter().enumerate().map(|(index, bar)| {
        let y = row(index);
        Rectangle::new([(0.0, y - 0.4), (bar.value, y + 0.4)], PRIMARY.filled())
    })).map_err(ChartError::draw)?;

    if labelled {
        plot.draw_series(chart.bars.iter().enumerate().map(|(index, bar)| {
            let y = row(index) + 0.15;
            Text::new(grouped_number(bar.value), (bar.value + peak * 0.01, y), annotation_font())
        })).map_err(ChartError::draw)?;
    }

    Ok(())
}
