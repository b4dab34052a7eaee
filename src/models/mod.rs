mod dataset;
mod enriched;
#[cfg(test)]
mod tests;
mod transaction;

pub use dataset::{CleaningSummary, Dataset};
pub use enriched::{Enriched, EnrichedRecord};
pub use transaction::{RawTransaction, Transaction};

/// Invoice identifiers starting with this marker denote cancellations.
pub const CANCELLATION_PREFIX: char = 'C';
