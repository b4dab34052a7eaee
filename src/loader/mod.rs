mod cleaner;
mod errors;
#[cfg(test)]
mod tests;
mod workbook;

use std::path::Path;

use tracing::info;

use crate::models::{CleaningSummary, Dataset};

pub use cleaner::clean;
pub use errors::LoadError;
pub use workbook::read_workbook;

/// Reads both yearly sheets from the workbook at `path` and cleans the combined rows.
///
/// # Errors
/// Returns `LoadError::FileNotFound` when the path does not resolve and
/// `LoadError::InvalidFormat` when a sheet, a column or a required cell value is unusable.
pub fn load_dataset(path: &Path) -> Result<(Dataset, CleaningSummary), LoadError> {
    let rows = read_workbook(path)?;
    info!("Read {} rows from [{}]", rows.len(), path.display());

    Ok(clean(rows))
}
