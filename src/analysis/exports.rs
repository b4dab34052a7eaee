use std::path::{Path, PathBuf};

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::analysis::{AnalysisError, MonthlyKpi, OutlierLine};

pub const MONTHLY_KPI_FILE: &str = "monthly_kpis.csv";
pub const OUTLIER_FILE: &str = "revenue_outliers.csv";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MonthlyKpiRow {
    month: String,
    revenue: Decimal,
    transactions: usize,
    customers: usize,
    average_order_value: Decimal
}

impl From<&MonthlyKpi> for MonthlyKpiRow {
    fn from(kpi: &MonthlyKpi) -> Self {
        Self {
            month: kpi.month.to_string(),
            revenue: kpi.revenue.rounded(),
            transactions: kpi.transactions,
            customers: kpi.customers,
            average_order_value: kpi.average_order_value.rounded()
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OutlierRow<'a> {
    invoice: &'a str,
    stock_code: &'a str,
    description: &'a str,
    quantity: i64,
    price: Decimal,
    revenue: Decimal,
    country: &'a str
}

impl<'a> From<&'a OutlierLine> for OutlierRow<'a> {
    fn from(line: &'a OutlierLine) -> Self {
        Self {
            invoice: &line.invoice,
            stock_code: &line.stock_code,
            description: &line.description,
            quantity: line.quantity,
            price: line.unit_price,
            revenue: line.revenue.rounded(),
            country: &line.country
        }
    }
}

pub(super) fn write_monthly_kpis(path: &Path, kpis: &[MonthlyKpi]) -> Result<Option<PathBuf>, AnalysisError> {
    write_rows(path, kpis.iter().map(MonthlyKpiRow::from))
}

pub(super) fn write_outliers(path: &Path, outliers: &[OutlierLine]) -> Result<Option<PathBuf>, AnalysisError> {
    write_rows(path, outliers.iter().map(OutlierRow::from))
}

/// Writes `rows` with a header line; nothing is written when there are no rows.
fn write_rows<T: Serialize>(path: &Path, rows: impl IntoIterator<Item = T>) -> Result<Option<PathBuf>, AnalysisError> {
    let mut rows = rows.into_iter().peekable();

    if rows.peek().is_none() {
        return Ok(None);
    }

    let mut writer = Writer::from_path(path)
        .map_err(|error| AnalysisError::export(path, error))?;
    let mut written = 0;

    for row in rows {
        writer.serialize(row)
            .map_err(|error| AnalysisError::export(path, error))?;
        written += 1;
    }

    writer.flush()?;
    debug!("Exported {written} rows to [{}]", path.display());

    Ok(Some(path.to_path_buf()))
}
