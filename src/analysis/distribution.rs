use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::analysis::exports::{write_monthly_kpis, write_outliers, MONTHLY_KPI_FILE, OUTLIER_FILE};
use crate::analysis::stats::{box_summary, correlation_matrix, gaussian_kde, percentile, sorted};
use crate::analysis::trends::{ranked, to_f64};
use crate::analysis::{render_chart, AnalysisError};
use crate::charts::{
    draw_box_plot, draw_density_chart, draw_heatmap, draw_scatter_chart, BoxPlotChart, BoxSummary, ChartKind, ChartSet,
    DensityChart, Heatmap, ScatterChart, ScatterSeries
};
use crate::models::{Enriched, EnrichedRecord};
use crate::types::{CustomerId, Money, YearMonth};

pub const SCATTER_COUNTRIES: usize = 5;
pub const BOX_PLOT_COUNTRIES: usize = 5;
/// Display-only trimming threshold; the analytical dataset is never filtered by it.
pub const OUTLIER_PERCENTILE: f64 = 0.99;
pub const MAX_SCATTER_POINTS: usize = 20_000;

const DENSITY_GRID_POINTS: usize = 200;
const CORRELATION_LABELS: [&str; 3] = ["Quantity", "Price", "Revenue"];

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyKpi {
    pub month: YearMonth,
    pub revenue: Money,
    /// Distinct invoices in the month.
    pub transactions: usize,
    pub customers: usize,
    pub average_order_value: Money
}

/// A line whose revenue exceeds the outlier percentile.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierLine {
    pub invoice: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub revenue: Money,
    pub country: String
}

/// Chart-ready tier-3 aggregates.
#[derive(Debug, Clone, Default)]
pub struct DistributionSummary {
    /// Quantity, price and revenue correlations; empty with fewer than two lines.
    pub correlation: Vec<Vec<f64>>,
    pub revenue_cutoff: Option<f64>,
    pub revenue_density: Vec<(f64, f64)>,
    pub scatter: Vec<ScatterSeries>,
    pub price_boxes: Vec<BoxSummary>,
    pub monthly_kpis: Vec<MonthlyKpi>,
    /// Descending by revenue.
    pub outliers: Vec<OutlierLine>
}

/// Tier-3 payload: chart images plus the exported tables, when there was anything to export.
#[derive(Debug, Clone, Default)]
pub struct DistributionReport {
    pub charts: ChartSet,
    /// Line revenue above which a line counts as an outlier.
    pub revenue_cutoff: Option<Money>,
    pub monthly_kpi_csv: Option<PathBuf>,
    pub outliers_csv: Option<PathBuf>
}

pub fn summarize_distributions(enriched: &Enriched<'_>) -> DistributionSummary {
    let records = enriched.records();

    let quantities: Vec<f64> = records.iter().map(|record| record.transaction.quantity as f64).collect();
    let prices: Vec<f64> = records.iter().map(|record| to_f64(record.transaction.unit_price)).collect();
    let revenues: Vec<f64> = records.iter().map(|record| to_f64(record.revenue)).collect();

    let revenue_cutoff = percentile(&sorted(revenues.iter().copied()), OUTLIER_PERCENTILE);
    let quantity_cutoff = percentile(&sorted(quantities.iter().copied()), OUTLIER_PERCENTILE);

    let revenue_density = match revenue_cutoff {
        Some(cutoff) => {
            let trimmed: Vec<f64> = revenues.iter().copied().filter(|revenue| *revenue < cutoff).collect();
            gaussian_kde(&trimmed, DENSITY_GRID_POINTS)
        }
        None => Vec::new()
    };

    let scatter = match (quantity_cutoff, revenue_cutoff) {
        (Some(quantity_cutoff), Some(revenue_cutoff)) => scatter_series(records, quantity_cutoff, revenue_cutoff),
        _ => Vec::new()
    };

    let correlation = if enriched.len() < 2 {
        Vec::new()
    } else {
        correlation_matrix(&[quantities, prices, revenues])
    };

    DistributionSummary {
        correlation,
        revenue_cutoff,
        revenue_density,
        scatter,
        price_boxes: price_boxes(records),
        monthly_kpis: monthly_kpis(records),
        outliers: revenue_cutoff.map(|cutoff| outliers(records, cutoff)).unwrap_or_default()
    }
}

/// Draws the four distribution charts and exports the tier-3 tables into `directory`.
pub fn render_distribution_charts(summary: &DistributionSummary, directory: &Path) -> Result<DistributionReport, AnalysisError> {
    fs::create_dir_all(directory)?;
    let mut charts = ChartSet::new();

    render_chart(&mut charts, ChartKind::CorrelationHeatmap, directory, |path| {
        draw_heatmap(path, &Heatmap {
            title: ChartKind::CorrelationHeatmap.title().to_string(),
            labels: if summary.correlation.is_empty() {
                Vec::new()
            } else {
                CORRELATION_LABELS.iter().map(|label| label.to_string()).collect()
            },
            values: summary.correlation.clone()
        })
    })?;

    render_chart(&mut charts, ChartKind::RevenueDensity, directory, |path| {
        draw_density_chart(path, &DensityChart {
            title: ChartKind::RevenueDensity.title().to_string(),
            x_label: "Line Revenue (GBP)".to_string(),
            curve: summary.revenue_density.clone()
        })
    })?;

    render_chart(&mut charts, ChartKind::QuantityRevenueScatter, directory, |path| {
        draw_scatter_chart(path, &ScatterChart {
            title: ChartKind::QuantityRevenueScatter.title().to_string(),
            x_label: "Quantity".to_string(),
            y_label: "Line Revenue (GBP)".to_string(),
            series: summary.scatter.clone()
        })
    })?;

    render_chart(&mut charts, ChartKind::PriceBoxPlot, directory, |path| {
        draw_box_plot(path, &BoxPlotChart {
            title: ChartKind::PriceBoxPlot.title().to_string(),
            y_label: "Unit Price (GBP)".to_string(),
            boxes: summary.price_boxes.clone()
        })
    })?;

    Ok(DistributionReport {
        charts,
        revenue_cutoff: summary.revenue_cutoff.and_then(Decimal::from_f64).map(Money::new),
        monthly_kpi_csv: write_monthly_kpis(&directory.join(MONTHLY_KPI_FILE), &summary.monthly_kpis)?,
        outliers_csv: write_outliers(&directory.join(OUTLIER_FILE), &summary.outliers)?
    })
}

/// Quantity against revenue for the top revenue countries, one series per country in rank order.
///
/// Both axes are trimmed at their outlier cutoffs and large inputs are thinned by a fixed stride.
fn scatter_series(records: &[EnrichedRecord<'_>], quantity_cutoff: f64, revenue_cutoff: f64) -> Vec<ScatterSeries> {
    let mut country_revenue: HashMap<&str, Decimal> = HashMap::new();

    for record in records {
        *country_revenue.entry(record.transaction.country.as_str()).or_default() += record.revenue;
    }

    let countries: Vec<String> = ranked(country_revenue, SCATTER_COUNTRIES)
        .into_iter()
        .map(|(country, _)| country)
        .collect();

    let kept: Vec<&EnrichedRecord<'_>> = records.iter()
        .filter(|record| countries.contains(&record.transaction.country))
        .filter(|record| (record.transaction.quantity as f64) < quantity_cutoff && to_f64(record.revenue) < revenue_cutoff)
        .collect();

    let stride = kept.len().div_ceil(MAX_SCATTER_POINTS).max(1);
    let mut points: HashMap<&str, Vec<(f64, f64)>> = HashMap::new();

    for record in kept.into_iter().step_by(stride) {
        points.entry(record.transaction.country.as_str())
            .or_default()
            .push((record.transaction.quantity as f64, to_f64(record.revenue)));
    }

    countries.into_iter()
        .filter_map(|country| {
            let points = points.remove(country.as_str())?;
            Some(ScatterSeries { name: country, points })
        })
        .collect()
}

/// Unit price spread for the countries with the most lines.
fn price_boxes(records: &[EnrichedRecord<'_>]) -> Vec<BoxSummary> {
    let mut prices: HashMap<&str, Vec<f64>> = HashMap::new();

    for record in records {
        prices.entry(record.transaction.country.as_str())
            .or_default()
            .push(to_f64(record.transaction.unit_price));
    }

    let line_counts: HashMap<&str, usize> = prices.iter()
        .map(|(country, values)| (*country, values.len()))
        .collect();

    ranked(line_counts, BOX_PLOT_COUNTRIES)
        .into_iter()
        .filter_map(|(country, _)| {
            let values = prices.remove(country.as_str())?;
            box_summary(&country, &sorted(values))
        })
        .collect()
}

#[derive(Default)]
struct MonthTotals<'a> {
    revenue: Decimal,
    invoices: HashSet<&'a str>,
    customers: HashSet<CustomerId>
}

fn monthly_kpis(records: &[EnrichedRecord<'_>]) -> Vec<MonthlyKpi> {
    let mut months: BTreeMap<YearMonth, MonthTotals<'_>> = BTreeMap::new();

    for record in records {
        let totals = months.entry(record.month).or_default();
        totals.revenue += record.revenue;
        totals.invoices.insert(record.transaction.invoice.as_str());
        totals.customers.insert(record.transaction.customer_id);
    }

    months.into_iter()
        .map(|(month, totals)| {
            let revenue = Money::new(totals.revenue);

            MonthlyKpi {
                month,
                revenue,
                transactions: totals.invoices.len(),
                customers: totals.customers.len(),
                average_order_value: revenue.average_over(totals.invoices.len())
            }
        })
        .collect()
}

fn outliers(records: &[EnrichedRecord<'_>], cutoff: f64) -> Vec<OutlierLine> {
    let mut lines: Vec<&EnrichedRecord<'_>> = records.iter()
        .filter(|record| to_f64(record.revenue) > cutoff)
        .collect();

    lines.sort_by(|left, right| {
        right.revenue.cmp(&left.revenue)
            .then_with(|| left.transaction.invoice.cmp(&right.transaction.invoice))
    });

    lines.into_iter()
        .map(|record| {
            let transaction = record.transaction;

            OutlierLine {
                invoice: transaction.invoice.clone(),
                stock_code: transaction.stock_code.clone(),
                description: transaction.description.clone(),
                quantity: transaction.quantity,
                unit_price: transaction.unit_price,
                revenue: Money::new(record.revenue),
                country: transaction.country.clone()
            }
        })
        .collect()
}
