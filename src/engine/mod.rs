mod errors;
mod menu;
mod report_engine;
#[cfg(test)]
mod tests;

use std::path::PathBuf;

use crate::report::ReportLevel;

pub use errors::EngineError;
pub use menu::run_menu;
pub use report_engine::ReportEngine;

/// Where a finished report landed and how many pages it has.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GeneratedReport {
    pub path: PathBuf,
    pub pages: usize
}

pub trait ReportGenerator {
    fn generate(&self, level: ReportLevel) -> Result<GeneratedReport, EngineError>;
}
