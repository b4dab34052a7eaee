use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::CANCELLATION_PREFIX;
use crate::types::CustomerId;

/// Represents a single spreadsheet row as loaded, before any cleaning.
///
/// Every field is already coerced to its target type; only the customer id may be
/// missing, because the retailer records anonymous sales without one.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTransaction {
    pub invoice: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: i64,
    pub invoice_date: NaiveDateTime,
    pub unit_price: Decimal,
    pub customer_id: Option<CustomerId>,
    pub country: String
}

impl RawTransaction {
    /// Promotes the row to a `Transaction`, or `None` when it has no customer id.
    pub fn into_transaction(self) -> Option<Transaction> {
        let customer_id = self.customer_id?;

        Some(Transaction {
            invoice: self.invoice,
            stock_code: self.stock_code,
            description: self.description,
            quantity: self.quantity,
            invoice_date: self.invoice_date,
            unit_price: self.unit_price,
            customer_id,
            country: self.country
        })
    }
}

/// A transaction line with a known customer.
///
/// Once it sits in a `Dataset` it also has a positive quantity, a positive unit
/// price and an invoice that is not a cancellation.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub invoice: String,
    pub stock_code: String,
    pub description: String,
    pub quantity: i64,
    pub invoice_date: NaiveDateTime,
    pub unit_price: Decimal,
    pub customer_id: CustomerId,
    pub country: String
}

impl Transaction {
    pub fn is_cancelled(&self) -> bool {
        self.invoice.starts_with(CANCELLATION_PREFIX)
    }

    /// Line revenue: quantity multiplied by unit price.
    pub fn revenue(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}
