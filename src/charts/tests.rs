use super::axis::{category_label, compact_number, grouped_number, headroom};
use super::heatmap::heat_color;
use super::typeface::register_bundled_typeface;
use super::{draw_bar_chart, draw_box_plot, draw_line_chart, labels_available, truncate_label, Bar, BarChart, BoxPlotChart, BoxSummary, ChartError, ChartKind, ChartSet, LineChart, Orientation};

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::style::RGBColor;
use printpdf::image::{RawImage, RawImageData, RawImageFormat};
use tempfile::TempDir;

const PNG_SIGNATURE: [u8; 4] = [0x89, b'P', b'N', b'G'];

fn country_bars() -> BarChart {
    BarChart {
        title: "Top 10 Countries by Revenue".to_string(),
        value_label: "Revenue (GBP)".to_string(),
        orientation: Orientation::Vertical,
        bars: vec![
            Bar { label: "United Kingdom".to_string(), value: 83.75 },
            Bar { label: "Germany".to_string(), value: 51.0 },
            Bar { label: "France".to_string(), value: 20.0 },
        ]
    }
}

fn is_png(path: &Path) -> Result<bool> {
    Ok(fs::read(path)?.starts_with(&PNG_SIGNATURE))
}

/// Counts near-black pixels in the top `rows` rows of a rendered chart.
fn dark_pixels_in_top_rows(path: &Path, rows: usize) -> Result<usize> {
    let image = RawImage::decode_from_bytes(&fs::read(path)?, &mut Vec::new()).map_err(|error| anyhow!(error))?;

    let channels = match image.data_format {
        RawImageFormat::RGB8 => 3,
        RawImageFormat::RGBA8 => 4,
        other => return Err(anyhow!("unexpected pixel format {other:?}"))
    };
    let RawImageData::U8(pixels) = image.pixels else {
        return Err(anyhow!("unexpected pixel depth"));
    };

    Ok(pixels[..rows.min(image.height) * image.width * channels]
        .chunks(channels)
        .filter(|pixel| pixel[..3].iter().all(|channel| *channel < 100))
        .count())
}

#[test]
fn test_truncate_label_cuts_long_names_with_ellipsis() {
    let long_name = "SET OF 3 HEART COOKIE CUTTERS AND MATCHING TINS";

    assert_eq!(truncate_label(long_name, 40), "SET OF 3 HEART COOKIE CUTTERS AND MATCHI...");
    assert_eq!(truncate_label(long_name, 40).chars().count(), 43);
    assert_eq!(truncate_label("WHITE HANGING HEART", 40), "WHITE HANGING HEART");
    assert_eq!(truncate_label(&"X".repeat(40), 40), "X".repeat(40));
}

#[test]
fn test_category_label_only_names_whole_positions() {
    let names = vec!["United Kingdom".to_string(), "France".to_string()];

    assert_eq!(category_label(&names, 0.0), "United Kingdom");
    assert_eq!(category_label(&names, 1.0), "France");
    assert_eq!(category_label(&names, 0.5), "");
    assert_eq!(category_label(&names, -1.0), "");
    assert_eq!(category_label(&names, 2.0), "");
}

#[test]
fn test_number_formatting_for_axes_and_annotations() {
    assert_eq!(compact_number(1_250_000.0), "1.25M");
    assert_eq!(compact_number(830_000.0), "830K");
    assert_eq!(compact_number(1_500.0), "1.5K");
    assert_eq!(compact_number(12.4), "12");
    assert_eq!(compact_number(2.5), "2.50");
    assert_eq!(compact_number(0.0), "0");
    assert_eq!(grouped_number(8_187_806.4), "8,187,806");
    assert_eq!(grouped_number(-1_200.0), "-1,200");
    assert_eq!(headroom(0.0), 1.0);
    assert!((headroom(100.0) - 115.0).abs() < 1e-9);
}

#[test]
fn test_heat_color_diverges_from_neutral() {
    assert_eq!(heat_color(0.0), RGBColor(247, 247, 247));
    assert_eq!(heat_color(1.0), RGBColor(180, 4, 38));
    assert_eq!(heat_color(-1.0), RGBColor(59, 76, 192));
    assert_eq!(heat_color(5.0), heat_color(1.0));
    assert_eq!(heat_color(f64::NAN), heat_color(0.0));
}

#[test]
fn test_chart_kinds_have_distinct_stable_paths() {
    let directory = Path::new("assets");
    let kinds: Vec<ChartKind> = ChartKind::TRENDS.iter().chain(ChartKind::DISTRIBUTIONS.iter()).copied().collect();
    let names: HashSet<&str> = kinds.iter().map(|kind| kind.file_name()).collect();

    assert_eq!(names.len(), kinds.len());
    assert_eq!(ChartKind::MonthlyRevenue.path_in(directory), directory.join("monthly_revenue.png"));
    assert_eq!(ChartKind::MonthlyRevenue.path_in(directory), ChartKind::MonthlyRevenue.path_in(directory));
}

#[test]
fn test_chart_set_iterates_in_report_order() {
    let mut charts = ChartSet::new();
    charts.insert(ChartKind::TopProducts, "top.png".into());
    charts.insert(ChartKind::CountryRevenue, "country.png".into());

    let order: Vec<ChartKind> = charts.iter().map(|(kind, _)| kind).collect();

    assert_eq!(order, vec![ChartKind::CountryRevenue, ChartKind::TopProducts]);
    assert_eq!(charts.get(ChartKind::TopProducts), Some(Path::new("top.png")));
    assert!(charts.get(ChartKind::MonthlyRevenue).is_none());
}

#[test]
fn test_bar_chart_renders_png_and_overwrites_on_rerun() -> Result<()> {
    let directory = TempDir::new()?;
    let path = ChartKind::CountryRevenue.path_in(directory.path());

    draw_bar_chart(&path, &country_bars())?;
    assert!(is_png(&path)?);

    let mut horizontal = country_bars();
    horizontal.orientation = Orientation::Horizontal;
    draw_bar_chart(&path, &horizontal)?;

    assert!(is_png(&path)?);
    assert_eq!(fs::read_dir(directory.path())?.count(), 1);

    Ok(())
}

#[test]
fn test_line_and_box_charts_render_png() -> Result<()> {
    let directory = TempDir::new()?;
    let line_path = directory.path().join("line.png");
    let box_path = directory.path().join("box.png");

    draw_line_chart(&line_path, &LineChart {
        title: "Monthly Revenue Trend".to_string(),
        x_label: "Month".to_string(),
        y_label: "Revenue (GBP)".to_string(),
        points: vec![("2009-12".to_string(), 68.75), ("2010-01".to_string(), 71.0), ("2010-02".to_string(), 15.0)]
    })?;

    draw_box_plot(&box_path, &BoxPlotChart {
        title: "Unit Price by Country".to_string(),
        y_label: "Unit Price (GBP)".to_string(),
        boxes: vec![BoxSummary { label: "France".to_string(), lower_whisker: 0.5, q1: 1.0, median: 2.0, q3: 3.5, upper_whisker: 6.0 }]
    })?;

    assert!(is_png(&line_path)?);
    assert!(is_png(&box_path)?);

    Ok(())
}

#[test]
fn test_empty_chart_is_rejected_without_writing_a_file() -> Result<()> {
    let directory = TempDir::new()?;
    let path = directory.path().join("empty.png");
    let mut chart = country_bars();
    chart.bars.clear();

    let result = draw_bar_chart(&path, &chart);

    assert!(matches!(result, Err(ChartError::Empty { .. })));
    assert!(!path.exists());

    Ok(())
}

#[test]
fn test_bundled_typeface_draws_chart_text_without_system_fonts() -> Result<()> {
    let directory = TempDir::new()?;
    let path = directory.path().join("countries.png");

    assert!(register_bundled_typeface());
    assert!(labels_available());

    draw_bar_chart(&path, &country_bars())?;

    // Bars are blue, so dark pixels above the plot area come from the caption.
    assert!(dark_pixels_in_top_rows(&path, 60)? > 0);

    Ok(())
}
