use chrono::NaiveDate;

use crate::analysis::{DistributionReport, OverviewReport, TrendReport};
use crate::charts::{ChartKind, ChartSet};
use crate::models::CleaningSummary;
use crate::report::{read_csv_table, DocumentBuilder, ReportError, ReportLevel, Table};
use crate::types::group_thousands;

pub const REPORT_TITLE: &str = "Online Retail II Sales Report";
pub const OUTLIER_TABLE_ROWS: usize = 10;

pub fn title_page(builder: DocumentBuilder, level: ReportLevel, generated_on: NaiveDate, cleaning: &CleaningSummary) -> DocumentBuilder {
    builder
        .title(REPORT_TITLE)
        .heading(level.subtitle())
        .paragraph(format!("Generated on {}", generated_on.format("%d %B %Y")))
        .paragraph(format!("Records loaded: {}", group_thousands(cleaning.initial_count as u64)))
        .paragraph(format!("Records after cleaning: {}", group_thousands(cleaning.final_count as u64)))
        .page_break()
}

pub fn compose_level_1(builder: DocumentBuilder, overview: &OverviewReport) -> DocumentBuilder {
    builder
        .heading("Dataset Description")
        .paragraph(overview.description)
        .heading("Column Descriptions")
        .table(Table::from_pairs(["Column", "Description"], overview.column_descriptions.iter().copied()))
        .heading("Column Data Types")
        .table(Table::from_pairs(["Column", "Data Type"], overview.column_types.iter().copied()))
        .heading("Key Performance Indicators")
        .table(Table::from_pairs(["Metric", "Value"], overview.kpi_rows()))
        .heading("Interesting Facts")
        .bullets(overview.facts.clone())
}

pub fn compose_level_2(builder: DocumentBuilder, trends: &TrendReport) -> DocumentBuilder {
    let builder = builder
        .page_break()
        .heading(ReportLevel::Trends.subtitle());

    chart_blocks(builder, &trends.charts, &ChartKind::TRENDS)
}

/// Appends the distribution charts and the exported KPI and outlier tables.
///
/// # Errors
/// Returns `ReportError::Csv` when an exported table cannot be read back.
pub fn compose_level_3(builder: DocumentBuilder, distributions: &DistributionReport) -> Result<DocumentBuilder, ReportError> {
    let builder = builder
        .page_break()
        .heading(ReportLevel::Distributions.subtitle());

    let mut builder = chart_blocks(builder, &distributions.charts, &ChartKind::DISTRIBUTIONS).page_break();

    if let Some(path) = &distributions.monthly_kpi_csv {
        builder = builder
            .heading("Monthly KPI Trends")
            .table(read_csv_table(path, None)?);
    }

    builder = builder.page_break();

    if let Some(path) = &distributions.outliers_csv {
        let threshold = match distributions.revenue_cutoff {
            Some(cutoff) => format!("the 99th percentile of line revenue (GBP {cutoff})"),
            None => "the 99th percentile of line revenue".to_string()
        };

        builder = builder
            .heading("Top Revenue Outliers")
            .paragraph(format!("The {OUTLIER_TABLE_ROWS} highest-revenue lines above {threshold}."))
            .table(read_csv_table(path, Some(OUTLIER_TABLE_ROWS))?);
    }

    Ok(builder)
}

/// One block per chart present in `charts`, in `kinds` order; absent charts are skipped.
fn chart_blocks(builder: DocumentBuilder, charts: &ChartSet, kinds: &[ChartKind]) -> DocumentBuilder {
    kinds.iter().fold(builder, |builder, kind| match charts.get(*kind) {
        Some(path) => builder.chart(kind.title(), path),
        None => builder
    })
}
