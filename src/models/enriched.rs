use rust_decimal::Decimal;

use crate::models::{Dataset, Transaction};
use crate::types::YearMonth;

/// A transaction line paired with its derived values.
#[derive(Debug, Clone, Copy)]
pub struct EnrichedRecord<'a> {
    pub transaction: &'a Transaction,
    pub revenue: Decimal,
    pub month: YearMonth
}

/// Read-only view over a [`Dataset`] with line revenue and invoice month computed once.
#[derive(Debug, Clone)]
pub struct Enriched<'a> {
    records: Vec<EnrichedRecord<'a>>
}

impl<'a> Enriched<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        let records = dataset.transactions().iter()
            .map(|transaction| EnrichedRecord {
                transaction,
                revenue: transaction.revenue(),
                month: YearMonth::from(&transaction.invoice_date)
            })
            .collect();

        Self { records }
    }

    pub fn records(&self) -> &[EnrichedRecord<'a>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
