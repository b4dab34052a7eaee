use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Workbook not found at [{}]", .path.display())]
    FileNotFound {
        path: PathBuf
    },
    #[error("Workbook has an invalid format: {reason}")]
    InvalidFormat {
        reason: String
    }
}

impl LoadError {
    pub fn file_not_found(path: &Path) -> Self {
        Self::FileNotFound { path: path.to_path_buf() }
    }

    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat { reason: reason.into() }
    }

    pub fn missing_sheet(sheet: &str) -> Self {
        Self::invalid_format(format!("sheet [{sheet}] is missing"))
    }

    pub fn missing_column(sheet: &str, column: &str) -> Self {
        Self::invalid_format(format!("sheet [{sheet}] has no [{column}] column"))
    }

    pub fn invalid_cell(sheet: &str, row: usize, column: &str, value: &str) -> Self {
        Self::invalid_format(format!("sheet [{sheet}] row {row} has an unusable [{column}] value '{value}'"))
    }
}
