use rust_decimal::Decimal;
use tracing::info;

use crate::models::{CleaningSummary, Dataset, RawTransaction, Transaction};

/// Applies the cleaning steps in their fixed order and records what each removed.
///
/// Order: drop rows without a customer id, drop cancelled invoices, drop
/// non-positive quantities, drop non-positive unit prices. Surviving rows keep
/// their original relative order.
pub fn clean(rows: Vec<RawTransaction>) -> (Dataset, CleaningSummary) {
    let initial_count = rows.len();

    let mut transactions: Vec<Transaction> = rows.into_iter()
        .filter_map(RawTransaction::into_transaction)
        .collect();
    let missing_customer = initial_count - transactions.len();
    info!("Dropped {missing_customer} rows without a customer id");

    let cancelled = retain_counting(&mut transactions, |transaction| !transaction.is_cancelled());
    info!("Dropped {cancelled} cancelled invoice rows");

    let non_positive_quantity = retain_counting(&mut transactions, |transaction| transaction.quantity > 0);
    info!("Dropped {non_positive_quantity} rows with a non-positive quantity");

    let non_positive_price = retain_counting(&mut transactions, |transaction| transaction.unit_price > Decimal::ZERO);
    info!("Dropped {non_positive_price} rows with a non-positive price");

    let summary = CleaningSummary {
        initial_count,
        missing_customer,
        cancelled,
        non_positive_quantity,
        non_positive_price,
        final_count: transactions.len()
    };

    info!("Cleaning removed {} rows and kept {} of {}", summary.removed(), summary.final_count, summary.initial_count);

    (Dataset::new(transactions), summary)
}

fn retain_counting<F>(transactions: &mut Vec<Transaction>, keep: F) -> usize
where
    F: FnMut(&Transaction) -> bool,
{
    let before = transactions.len();
    transactions.retain(keep);
    before - transactions.len()
}
