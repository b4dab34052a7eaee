use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not read table [{}]: {source}", .path.display())]
    Csv {
        path: PathBuf,
        source: csv::Error
    },
    #[error("Could not embed chart image [{}]: {reason}", .path.display())]
    ImageDecode {
        path: PathBuf,
        reason: String
    }
}

impl ReportError {
    pub fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv { path: path.to_path_buf(), source }
    }

    pub fn image_decode(path: &Path, reason: impl Into<String>) -> Self {
        Self::ImageDecode { path: path.to_path_buf(), reason: reason.into() }
    }
}
