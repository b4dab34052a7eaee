use std::path::PathBuf;

use tracing::level_filters::LevelFilter;

pub const DEFAULT_WORKBOOK: &str = "./online_retail_II.xlsx";
pub const DEFAULT_ASSET_DIR: &str = "assets";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub workbook: PathBuf,
    pub asset_dir: PathBuf,
    pub log_level: LevelFilter
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from(DEFAULT_WORKBOOK),
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            log_level: LevelFilter::ERROR
        }
    }
}

impl AppConfig {
    /// Resolves `[workbook.xlsx] [log_level]` from the arguments after the program name.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>
    {
        let mut args = args.into_iter();
        let mut config = Self::default();

        if let Some(workbook) = args.next() {
            config.workbook = PathBuf::from(workbook.as_ref());
        }

        if let Some(level) = args.next() {
            config.log_level = parse_log_level(level.as_ref());
        }

        config
    }
}

pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}
