use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::charts::ChartError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Could not export [{}]: {source}", .path.display())]
    Export {
        path: PathBuf,
        source: csv::Error
    },
    #[error("Could not prepare the asset directory: {0}")]
    Io(#[from] std::io::Error)
}

impl AnalysisError {
    pub fn export(path: &Path, source: csv::Error) -> Self {
        Self::Export { path: path.to_path_buf(), source }
    }
}
