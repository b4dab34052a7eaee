use std::path::Path;

use plotters::prelude::*;

use crate::charts::axis::{axis_font, caption_font, compact_number};
use crate::charts::{labels_available, ChartError, CANVAS_SIZE};

#[derive(Debug, Clone)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>
}

/// Points grouped into coloured series, one legend entry per series.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>
}

pub fn draw_scatter_chart(path: &Path, chart: &ScatterChart) -> Result<(), ChartError> {
    let all_points = || chart.series.iter().flat_map(|series| series.points.iter());

    if all_points().next().is_none() {
        return Err(ChartError::empty(&chart.title));
    }

    let labelled = labels_available();
    let x_peak = all_points().map(|(x, _)| *x).fold(0.0, f64::max);
    let y_peak = all_points().map(|(_, y)| *y).fold(0.0, f64::max);

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
        .build_cartesian_2d(0f64..padded(x_peak), 0f64..padded(y_peak))
        .map_err(ChartError::draw)?;

    if labelled {
        plot.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&|value| compact_number(*value))
            .y_label_formatter(&|value| compact_number(*value))
            .label_style(axis_font())
            .draw()
            .map_err(ChartError::draw)?;
    }

    for (index, series) in chart.series.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();

        let drawn = plot.draw_series(series.points.iter().map(|point| Circle::new(*point, 3, color.mix(0.6).filled())))
            .map_err(ChartError::draw)?;

        if labelled {
            drawn.label(series.name.as_str())
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }
    }

    if labelled {
        plot.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(axis_font())
            .draw()
            .map_err(ChartError::draw)?;
    }

    root.present().map_err(ChartError::draw)?;

    Ok(())
}

fn padded(peak: f64) -> f64 {
    if peak > 0.0 { peak * 1.05 } else { 1.0 }
}
