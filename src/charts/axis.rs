use plotters::style::{FontDesc, IntoFont, RGBColor};

use crate::charts::typeface::FONT_FAMILY;
use crate::types::group_thousands;

pub(super) const PRIMARY: RGBColor = RGBColor(54, 113, 177);
pub(super) const ACCENT: RGBColor = RGBColor(221, 132, 82);
pub(super) const INK: RGBColor = RGBColor(40, 40, 40);

const ELLIPSIS: &str = "...";

pub(super) fn caption_font() -> FontDesc<'static> {
    (FONT_FAMILY, 28).into_font()
}

pub(super) fn axis_font() -> FontDesc<'static> {
    (FONT_FAMILY, 14).into_font()
}

pub(super) fn tick_font() -> FontDesc<'static> {
    (FONT_FAMILY, 11).into_font()
}

pub(super) fn annotation_font() -> FontDesc<'static> {
    (FONT_FAMILY, 12).into_font()
}

/// Cuts `text` to `width` characters and marks the cut with an ellipsis.
pub fn truncate_label(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(width).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Label for a category axis tick; categories sit on whole numbers.
pub(super) fn category_label(names: &[String], position: f64) -> String {
    let rounded = position.round();

    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }

    names.get(rounded as usize).cloned().unwrap_or_default()
}

/// Short axis figure: `1.25M`, `830K`, `12.5`.
pub(super) fn compact_number(value: f64) -> String {
    let magnitude = value.abs();

    if magnitude >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if magnitude >= 10_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if magnitude >= 10.0 || magnitude == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Whole-number annotation with thousands separators.
pub(super) fn grouped_number(value: f64) -> String {
    let grouped = group_thousands(value.abs().round() as u64);
    if value < 0.0 { format!("-{grouped}") } else { grouped }
}

/// Upper bound for a value axis that leaves room for annotations above the tallest mark.
pub(super) fn headroom(peak: f64) -> f64 {
    if peak > 0.0 { peak * 1.15 } else { 1.0 }
}
