use super::workbook::SHEET_NAMES;
use super::{clean, load_dataset, read_workbook, LoadError};

use std::path::Path;

use anyhow::Result;
use rust_decimal::Decimal;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use crate::analysis::build_overview;
use crate::fixtures::create_raw_transaction;

const HEADER: [&str; 8] = ["Invoice", " StockCode", "Description", "Quantity", "InvoiceDate", " Price ", "Customer ID", "Country "];

struct SheetRow<'a> {
    invoice: &'a str,
    quantity: f64,
    price: f64,
    customer_id: Option<f64>,
    country: &'a str
}

fn row<'a>(invoice: &'a str, quantity: f64, price: f64, customer_id: Option<f64>, country: &'a str) -> SheetRow<'a> {
    SheetRow { invoice, quantity, price, customer_id, country }
}

fn write_workbook(path: &Path, header: &[&str], sheets: &[(&str, Vec<SheetRow>)]) -> Result<()> {
    let mut workbook = Workbook::new();

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name)?;

        for (column, title) in header.iter().enumerate() {
            worksheet.write_string(0, column as u16, *title)?;
        }

        for (index, sheet_row) in rows.iter().enumerate() {
            let line = index as u32 + 1;

            match sheet_row.invoice.parse::<f64>() {
                Ok(number) => worksheet.write_number(line, 0, number)?,
                Err(_) => worksheet.write_string(line, 0, sheet_row.invoice)?
            };
            worksheet.write_string(line, 1, "85048")?;
            worksheet.write_string(line, 2, "WHITE HANGING HEART")?;
            worksheet.write_number(line, 3, sheet_row.quantity)?;
            worksheet.write_string(line, 4, "2010-12-01 08:26:00")?;
            worksheet.write_number(line, 5, sheet_row.price)?;
            if let Some(customer_id) = sheet_row.customer_id {
                worksheet.write_number(line, 6, customer_id)?;
            }
            worksheet.write_string(line, 7, sheet_row.country)?;
        }
    }

    workbook.save(path)?;

    Ok(())
}

#[test]
fn test_clean_removes_invalid_rows_in_order_and_counts_each_step() -> Result<()> {
    let rows = vec![
        create_raw_transaction("489434", Some(13085), 12, "2.55", "United Kingdom")?,
        create_raw_transaction("C489449", Some(16321), -12, "2.95", "Australia")?,
        create_raw_transaction("489450", None, 5, "1.25", "United Kingdom")?,
        create_raw_transaction("489451", Some(13085), 0, "1.25", "United Kingdom")?,
        create_raw_transaction("489452", Some(12682), 6, "0.00", "France")?,
        create_raw_transaction("489453", Some(12682), 24, "0.85", "France")?,
    ];

    let (dataset, summary) = clean(rows);

    assert_eq!(summary.initial_count, 6);
    assert_eq!(summary.missing_customer, 1);
    assert_eq!(summary.cancelled, 1);
    assert_eq!(summary.non_positive_quantity, 1);
    assert_eq!(summary.non_positive_price, 1);
    assert_eq!(summary.final_count, 2);
    assert_eq!(summary.initial_count - summary.removed(), summary.final_count);

    let invoices: Vec<&str> = dataset.transactions().iter().map(|transaction| transaction.invoice.as_str()).collect();

    assert_eq!(invoices, vec!["489434", "489453"]);

    Ok(())
}

#[test]
fn test_cancelled_row_without_customer_counts_as_missing_customer() -> Result<()> {
    let rows = vec![create_raw_transaction("C489449", None, -1, "2.95", "Australia")?];

    let (dataset, summary) = clean(rows);

    assert!(dataset.is_empty());
    assert_eq!(summary.missing_customer, 1);
    assert_eq!(summary.cancelled, 0);

    Ok(())
}

#[test]
fn test_cleaned_dataset_upholds_record_invariants() -> Result<()> {
    let mut rows = Vec::new();

    for index in 0..40i64 {
        let invoice = if index % 7 == 0 { format!("C{}", 500000 + index) } else { (500000 + index).to_string() };
        let customer_id = if index % 5 == 0 { None } else { Some(12000 + index as u64) };
        let price = if index % 6 == 0 { "0" } else { "1.95" };

        rows.push(create_raw_transaction(&invoice, customer_id, (index % 4) - 1, price, "United Kingdom")?);
    }

    let (dataset, summary) = clean(rows);

    assert!(summary.final_count <= summary.initial_count);
    assert_eq!(dataset.len(), summary.final_count);

    for transaction in dataset.transactions() {
        assert!(!transaction.is_cancelled());
        assert!(transaction.quantity > 0);
        assert!(transaction.unit_price > Decimal::ZERO);
    }

    Ok(())
}

#[test]
fn test_workbook_sheets_are_concatenated_and_headers_trimmed() -> Result<()> {
    let directory = TempDir::new()?;
    let path = directory.path().join("online_retail_II.xlsx");

    write_workbook(&path, &HEADER, &[
        (SHEET_NAMES[0], vec![
            row("489434", 12.0, 2.55, Some(13085.0), "United Kingdom"),
            row("C489449", -12.0, 2.95, Some(16321.0), "Australia"),
        ]),
        (SHEET_NAMES[1], vec![
            row("536365", 6.0, 3.39, None, "United Kingdom"),
        ]),
    ])?;

    let rows = read_workbook(&path)?;

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].invoice, "489434");
    assert_eq!(rows[0].customer_id, Some(13085));
    assert_eq!(rows[0].unit_price, Decimal::new(255, 2));
    assert_eq!(rows[0].country, "United Kingdom");
    assert_eq!(rows[1].invoice, "C489449");
    assert_eq!(rows[1].quantity, -12);
    assert_eq!(rows[2].invoice, "536365");
    assert_eq!(rows[2].customer_id, None);
    assert_eq!(rows[2].invoice_date.to_string(), "2010-12-01 08:26:00");

    Ok(())
}

#[test]
fn test_loaded_dataset_feeds_the_overview_country_count() -> Result<()> {
    let directory = TempDir::new()?;
    let path = directory.path().join("online_retail_II.xlsx");

    write_workbook(&path, &HEADER, &[
        (SHEET_NAMES[0], vec![
            row("C489449", 12.0, 2.95, Some(16321.0), "Australia"),
            row("489450", 5.0, 1.25, None, "Germany"),
            row("489451", 0.0, 1.25, Some(13085.0), "France"),
            row("489452", 24.0, 0.85, Some(12682.0), "United Kingdom"),
        ]),
        (SHEET_NAMES[1], vec![
            row("536365", 6.0, 2.55, Some(17850.0), "Netherlands"),
        ]),
    ])?;

    let (dataset, summary) = load_dataset(&path)?;

    assert_eq!(summary.initial_count, 5);
    assert_eq!(summary.cancelled, 1);
    assert_eq!(summary.missing_customer, 1);
    assert_eq!(summary.non_positive_quantity, 1);
    assert_eq!(summary.final_count, 2);

    let countries: Vec<&str> = dataset.transactions().iter().map(|transaction| transaction.country.as_str()).collect();
    assert_eq!(countries, vec!["United Kingdom", "Netherlands"]);

    let overview = build_overview(&dataset.enrich(), &summary);

    assert_eq!(overview.facts[1], "There are 2 unique countries in the dataset.");

    Ok(())
}

#[test]
fn test_missing_workbook_reports_file_not_found() {
    let result = read_workbook(Path::new("does_not_exist.xlsx"));

    assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
}

#[test]
fn test_missing_sheet_reports_invalid_format() -> Result<()> {
    let directory = TempDir::new()?;
    let path = directory.path().join("one_sheet.xlsx");

    write_workbook(&path, &HEADER, &[
        (SHEET_NAMES[0], vec![row("489434", 12.0, 2.55, Some(13085.0), "United Kingdom")]),
    ])?;

    let result = read_workbook(&path);

    assert!(matches!(&result, Err(LoadError::InvalidFormat { reason }) if reason.contains(SHEET_NAMES[1])));

    Ok(())
}

#[test]
fn test_missing_column_reports_invalid_format() -> Result<()> {
    let directory = TempDir::new()?;
    let path = directory.path().join("no_country.xlsx");
    let header = ["Invoice", "StockCode", "Description", "Quantity", "InvoiceDate", "Price", "Customer ID", "Region"];

    write_workbook(&path, &header, &[
        (SHEET_NAMES[0], vec![row("489434", 12.0, 2.55, Some(13085.0), "United Kingdom")]),
        (SHEET_NAMES[1], vec![]),
    ])?;

    let result = read_workbook(&path);

    assert!(matches!(&result, Err(LoadError::InvalidFormat { reason }) if reason.contains("Country")));

    Ok(())
}
