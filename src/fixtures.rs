use std::str::FromStr;

use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::{Dataset, RawTransaction, Transaction};
use crate::types::CustomerId;

pub fn create_raw_transaction(invoice: &str, customer_id: Option<CustomerId>, quantity: i64, unit_price: &str, country: &str) -> Result<RawTransaction> {
    Ok(RawTransaction {
        invoice: invoice.to_string(),
        stock_code: "85048".to_string(),
        description: "WHITE HANGING HEART".to_string(),
        quantity,
        invoice_date: NaiveDateTime::from_str("2010-03-01T10:00:00")?,
        unit_price: Decimal::from_str(unit_price)?,
        customer_id,
        country: country.to_string()
    })
}

#[allow(clippy::too_many_arguments)]
pub fn create_transaction(invoice: &str, stock_code: &str, description: &str, quantity: i64, unit_price: &str, customer_id: CustomerId, country: &str, invoice_date: &str) -> Result<Transaction> {
    Ok(Transaction {
        invoice: invoice.to_string(),
        stock_code: stock_code.to_string(),
        description: description.to_string(),
        quantity,
        invoice_date: NaiveDateTime::from_str(invoice_date)?,
        unit_price: Decimal::from_str(unit_price)?,
        customer_id,
        country: country.to_string()
    })
}

/// Six lines over five invoices, three countries and three months.
///
/// Revenue: United Kingdom 83.75, Germany 51.00, France 20.00; total 154.75.
pub fn sample_dataset() -> Result<Dataset> {
    Ok(Dataset::new(vec![
        create_transaction("489434", "85048", "WHITE HANGING HEART", 10, "2.50", 100, "United Kingdom", "2009-12-01T07:45:00")?,
        create_transaction("489434", "79323P", "PINK CHERRY LIGHTS", 5, "6.75", 100, "United Kingdom", "2009-12-01T07:45:00")?,
        create_transaction("489435", "85048", "WHITE HANGING HEART", 4, "2.50", 101, "United Kingdom", "2009-12-02T10:00:00")?,
        create_transaction("489436", "22041", "RECORD FRAME", 2, "10.00", 200, "France", "2010-01-05T12:00:00")?,
        create_transaction("489437", "85048", "WHITE HANGING HEART", 20, "2.55", 300, "Germany", "2010-01-15T09:30:00")?,
        create_transaction("489438", "21232", "STRAWBERRY CERAMIC TRINKET BOX", 12, "1.25", 102, "United Kingdom", "2010-02-01T11:00:00")?,
    ]))
}
