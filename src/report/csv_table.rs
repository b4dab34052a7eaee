use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::report::{ReportError, Table};

/// Reads a CSV file verbatim into a table, every cell kept as text.
///
/// `max_rows` keeps only the first rows after the header.
pub fn read_csv_table(path: &Path, max_rows: Option<usize>) -> Result<Table, ReportError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|error| ReportError::csv(path, error))?;

    let header = reader.headers()
        .map_err(|error| ReportError::csv(path, error))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();

    for record in reader.records().take(max_rows.unwrap_or(usize::MAX)) {
        let record = record.map_err(|error| ReportError::csv(path, error))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(header, rows))
}
