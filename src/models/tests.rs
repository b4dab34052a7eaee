use super::{CleaningSummary, Dataset};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::fixtures::{create_raw_transaction, create_transaction, sample_dataset};
use crate::types::YearMonth;

#[test]
fn test_raw_transaction_without_customer_is_not_promoted() -> Result<()> {
    let anonymous = create_raw_transaction("489434", None, 1, "1.00", "United Kingdom")?;
    let known = create_raw_transaction("489434", Some(13085), 1, "1.00", "United Kingdom")?;

    assert!(anonymous.into_transaction().is_none());
    assert_eq!(known.into_transaction().map(|transaction| transaction.customer_id), Some(13085));

    Ok(())
}

#[test]
fn test_cancellation_marker_is_detected_by_prefix() -> Result<()> {
    let cancelled = create_transaction("C489449", "22087", "PAPER BUNTING", 12, "2.95", 16321, "Australia", "2009-12-01T10:33:00")?;
    let regular = create_transaction("489449", "22087", "PAPER BUNTING", 12, "2.95", 16321, "Australia", "2009-12-01T10:33:00")?;

    assert!(cancelled.is_cancelled());
    assert!(!regular.is_cancelled());

    Ok(())
}

#[test]
fn test_line_revenue_is_quantity_times_unit_price() -> Result<()> {
    let transaction = create_transaction("489434", "85048", "WHITE HANGING HEART", 12, "2.55", 13085, "United Kingdom", "2009-12-01T07:45:00")?;

    assert_eq!(transaction.revenue(), Decimal::from_str("30.60")?);

    Ok(())
}

#[test]
fn test_enrich_derives_revenue_and_month_without_touching_dataset() -> Result<()> {
    let dataset = sample_dataset()?;
    let enriched = dataset.enrich();

    assert_eq!(enriched.len(), dataset.len());

    let first = enriched.records()[0];

    assert_eq!(first.revenue, Decimal::from_str("25.00")?);
    assert_eq!(first.month, YearMonth::new(2009, 12));
    assert!(std::ptr::eq(first.transaction, &dataset.transactions()[0]));

    let total: Decimal = enriched.records().iter().map(|record| record.revenue).sum();

    assert_eq!(total, Decimal::from_str("154.75")?);

    Ok(())
}

#[test]
fn test_empty_dataset_enriches_to_empty_view() {
    let dataset = Dataset::default();

    assert!(dataset.is_empty());
    assert!(dataset.enrich().is_empty());
}

#[test]
fn test_cleaning_summary_totals_removed_rows() {
    let summary = CleaningSummary {
        initial_count: 10,
        missing_customer: 2,
        cancelled: 1,
        non_positive_quantity: 3,
        non_positive_price: 1,
        final_count: 3
    };

    assert_eq!(summary.removed(), 7);
    assert_eq!(summary.initial_count - summary.removed(), summary.final_count);
}
