use super::menu::{parse_choice, Choice};
use super::{run_menu, EngineError, GeneratedReport, ReportEngine, ReportGenerator};

use std::cell::RefCell;
use std::io::Cursor;
use std::path::PathBuf;
use std::ptr;

use anyhow::Result;
use tempfile::TempDir;

use crate::analysis::exports::{MONTHLY_KPI_FILE, OUTLIER_FILE};
use crate::charts::ChartKind;
use crate::fixtures::sample_dataset;
use crate::models::CleaningSummary;
use crate::report::ReportLevel;

struct RecordingGenerator {
    requests: RefCell<Vec<ReportLevel>>
}

impl RecordingGenerator {
    fn new() -> Self {
        Self { requests: RefCell::new(Vec::new()) }
    }
}

impl ReportGenerator for RecordingGenerator {
    fn generate(&self, level: ReportLevel) -> Result<GeneratedReport, EngineError> {
        self.requests.borrow_mut().push(level);

        Ok(GeneratedReport { path: PathBuf::from("assets").join(level.file_name()), pages: 4 })
    }
}

fn run_session(input: &str) -> Result<(Vec<ReportLevel>, String)> {
    let generator = RecordingGenerator::new();
    let mut output = Vec::new();

    run_menu(&generator, Cursor::new(input), &mut output)?;

    Ok((generator.requests.into_inner(), String::from_utf8(output)?))
}

fn summary() -> CleaningSummary {
    CleaningSummary { initial_count: 6, final_count: 6, ..CleaningSummary::default() }
}

#[test]
fn test_parse_choice_accepts_levels_and_quit_words() {
    let test_cases = vec![
        ("1", Some(Choice::Report(ReportLevel::Overview))),
        (" 2\n", Some(Choice::Report(ReportLevel::Trends))),
        ("3", Some(Choice::Report(ReportLevel::Distributions))),
        ("4", Some(Choice::Quit)),
        ("Q", Some(Choice::Quit)),
        ("quit", Some(Choice::Quit)),
        ("EXIT", Some(Choice::Quit)),
        ("5", None),
        ("", None),
        ("level 1", None),
    ];

    for (input, expected_output) in test_cases {
        assert_eq!(parse_choice(input), expected_output);
    }
}

#[test]
fn test_menu_reprompts_after_invalid_input() -> Result<()> {
    let (requests, output) = run_session("x\n2\nquit\n")?;

    assert_eq!(requests, vec![ReportLevel::Trends]);
    assert!(output.contains("Invalid choice 'x'"));
    assert!(output.contains("Level2_Report.pdf (4 pages)"));
    assert_eq!(output.matches("Enter your choice:").count(), 3);
    assert!(output.trim_end().ends_with("Goodbye!"));

    Ok(())
}

#[test]
fn test_menu_stops_at_end_of_input() -> Result<()> {
    let (requests, output) = run_session("1\n3\n")?;

    assert_eq!(requests, vec![ReportLevel::Overview, ReportLevel::Distributions]);
    assert!(output.trim_end().ends_with("Goodbye!"));

    Ok(())
}

#[test]
fn test_engine_writes_level_1_report_without_charts() -> Result<()> {
    let directory = TempDir::new()?;
    let assets = directory.path().join("assets");
    let dataset = sample_dataset()?;
    let engine = ReportEngine::new(&dataset, summary(), &assets);

    let report = engine.generate(ReportLevel::Overview)?;

    assert_eq!(report.path, assets.join("Level1_Report.pdf"));
    assert!(report.path.is_file());
    assert!(report.pages >= 2);
    assert!(!ChartKind::CountryRevenue.path_in(&assets).exists());

    Ok(())
}

#[test]
fn test_engine_level_3_renders_all_charts_and_exports() -> Result<()> {
    let directory = TempDir::new()?;
    let dataset = sample_dataset()?;
    let engine = ReportEngine::new(&dataset, summary(), directory.path());

    let report = engine.generate(ReportLevel::Distributions)?;

    assert!(report.path.ends_with("Level3_Report.pdf"));

    for kind in ChartKind::TRENDS.iter().chain(ChartKind::DISTRIBUTIONS.iter()) {
        assert!(kind.path_in(engine.asset_dir()).is_file(), "{kind:?} was not rendered");
    }

    assert!(directory.path().join(MONTHLY_KPI_FILE).is_file());
    assert!(directory.path().join(OUTLIER_FILE).is_file());

    Ok(())
}

#[test]
fn test_engine_reuses_aggregates_across_requests() -> Result<()> {
    let directory = TempDir::new()?;
    let dataset = sample_dataset()?;
    let engine = ReportEngine::new(&dataset, summary(), directory.path());

    let overview = engine.overview();
    let trends = engine.trend_summary();

    engine.generate(ReportLevel::Trends)?;
    let first = engine.generate(ReportLevel::Trends)?;

    assert!(ptr::eq(overview, engine.overview()));
    assert!(ptr::eq(trends, engine.trend_summary()));
    assert_eq!(first.path, directory.path().join("Level2_Report.pdf"));
    assert_eq!(engine.overview().kpis.total_transactions, 5);

    Ok(())
}
