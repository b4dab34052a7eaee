use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::analysis::{render_chart, AnalysisError};
use crate::charts::{draw_bar_chart, draw_line_chart, truncate_label, Bar, BarChart, ChartKind, ChartSet, LineChart, Orientation};
use crate::models::Enriched;
use crate::types::{Money, YearMonth};

pub const TOP_COUNTRIES: usize = 10;
pub const TOP_PRODUCTS: usize = 10;
pub const PRODUCT_LABEL_WIDTH: usize = 40;

/// Chart-ready tier-2 aggregates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSummary {
    /// Highest-revenue countries, descending.
    pub country_revenue: Vec<(String, Money)>,
    /// Revenue for every month in the data, chronological.
    pub monthly_revenue: Vec<(YearMonth, Money)>,
    /// Products by total quantity sold, descending.
    pub top_products: Vec<(String, i64)>
}

/// Tier-2 payload.
#[derive(Debug, Clone, Default)]
pub struct TrendReport {
    pub charts: ChartSet
}

pub fn summarize_trends(enriched: &Enriched<'_>) -> TrendSummary {
    let mut by_country: HashMap<&str, Decimal> = HashMap::new();
    let mut by_month: BTreeMap<YearMonth, Decimal> = BTreeMap::new();
    let mut by_product: HashMap<&str, i64> = HashMap::new();

    for record in enriched.records() {
        let transaction = record.transaction;

        *by_country.entry(transaction.country.as_str()).or_default() += record.revenue;
        *by_month.entry(record.month).or_default() += record.revenue;

        if !transaction.description.is_empty() {
            *by_product.entry(transaction.description.as_str()).or_default() += transaction.quantity;
        }
    }

    TrendSummary {
        country_revenue: ranked(by_country, TOP_COUNTRIES)
            .into_iter()
            .map(|(country, revenue)| (country, Money::new(revenue)))
            .collect(),
        monthly_revenue: by_month.into_iter()
            .map(|(month, revenue)| (month, Money::new(revenue)))
            .collect(),
        top_products: ranked(by_product, TOP_PRODUCTS)
    }
}

/// Draws the three trend charts into `directory`, replacing earlier renders.
pub fn render_trend_charts(summary: &TrendSummary, directory: &Path) -> Result<TrendReport, AnalysisError> {
    fs::create_dir_all(directory)?;
    let mut charts = ChartSet::new();

    render_chart(&mut charts, ChartKind::CountryRevenue, directory, |path| {
        draw_bar_chart(path, &BarChart {
            title: ChartKind::CountryRevenue.title().to_string(),
            value_label: "Revenue (GBP)".to_string(),
            orientation: Orientation::Vertical,
            bars: summary.country_revenue.iter()
                .map(|(country, revenue)| Bar { label: country.clone(), value: to_f64(revenue.value()) })
                .collect()
        })
    })?;

    render_chart(&mut charts, ChartKind::MonthlyRevenue, directory, |path| {
        draw_line_chart(path, &LineChart {
            title: ChartKind::MonthlyRevenue.title().to_string(),
            x_label: "Month".to_string(),
            y_label: "Revenue (GBP)".to_string(),
            points: summary.monthly_revenue.iter()
                .map(|(month, revenue)| (month.to_string(), to_f64(revenue.value())))
                .collect()
        })
    })?;

    render_chart(&mut charts, ChartKind::TopProducts, directory, |path| {
        draw_bar_chart(path, &BarChart {
            title: ChartKind::TopProducts.title().to_string(),
            value_label: "Quantity Sold".to_string(),
            orientation: Orientation::Horizontal,
            bars: summary.top_products.iter()
                .map(|(product, quantity)| Bar {
                    label: truncate_label(product, PRODUCT_LABEL_WIDTH),
                    value: *quantity as f64
                })
                .collect()
        })
    })?;

    Ok(TrendReport { charts })
}

/// Largest `limit` entries by value, descending; equal values ordered by name.
pub(super) fn ranked<V: Ord + Copy>(totals: HashMap<&str, V>, limit: usize) -> Vec<(String, V)> {
    let mut entries: Vec<(&str, V)> = totals.into_iter().collect();
    entries.sort_by(|(left_name, left), (right_name, right)| right.cmp(left).then_with(|| left_name.cmp(right_name)));
    entries.truncate(limit);

    entries.into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

pub(super) fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
