use crate::models::{Enriched, Transaction};

/// The cleaned transaction lines, in spreadsheet order.
///
/// A dataset is built once by the loader and never mutated afterwards. Derived
/// values are exposed through [`Dataset::enrich`] instead of extra columns.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    transactions: Vec<Transaction>
}

impl Dataset {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Builds the read-only view carrying line revenue and invoice month.
    pub fn enrich(&self) -> Enriched<'_> {
        Enriched::new(self)
    }
}

/// Row counts captured while cleaning.
///
/// `initial_count` is taken before the first filter and `final_count` after the
/// last one; every other field is the number of rows a single step removed.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct CleaningSummary {
    pub initial_count: usize,
    pub missing_customer: usize,
    pub cancelled: usize,
    pub non_positive_quantity: usize,
    pub non_positive_price: usize,
    pub final_count: usize
}

impl CleaningSummary {
    pub fn removed(&self) -> usize {
        self.missing_customer + self.cancelled + self.non_positive_quantity + self.non_positive_price
    }
}
