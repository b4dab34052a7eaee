use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::report::ReportError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error)
}
