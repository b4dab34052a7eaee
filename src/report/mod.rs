mod csv_table;
mod document;
mod errors;
mod metrics;
mod pdf;
mod tiers;

pub use csv_table::read_csv_table;
pub use document::{Block, Document, DocumentBuilder, Table};
pub use errors::ReportError;
pub use pdf::render_pdf;
pub use tiers::{compose_level_1, compose_level_2, compose_level_3, title_page, REPORT_TITLE};

/// How much of the report to build; each level embeds everything below it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ReportLevel {
    Overview,
    Trends,
    Distributions
}

impl ReportLevel {
    pub fn number(&self) -> u8 {
        match self {
            ReportLevel::Overview => 1,
            ReportLevel::Trends => 2,
            ReportLevel::Distributions => 3
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            ReportLevel::Overview => "Level 1: Dataset Overview",
            ReportLevel::Trends => "Level 2: Sales Trends",
            ReportLevel::Distributions => "Level 3: Distributions and Relationships"
        }
    }

    /// `Level1_Report.pdf` and so on.
    pub fn file_name(&self) -> String {
        format!("Level{}_Report.pdf", self.number())
    }
}
