use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use tracing::{debug, info, warn};

use crate::analysis::{
    build_overview, render_distribution_charts, render_trend_charts, summarize_distributions, summarize_trends,
    DistributionSummary, OverviewReport, TrendSummary
};
use crate::charts::ChartSet;
use crate::engine::{EngineError, GeneratedReport, ReportGenerator};
use crate::models::{CleaningSummary, Dataset, Enriched};
use crate::report::{compose_level_1, compose_level_2, compose_level_3, render_pdf, title_page, DocumentBuilder, ReportLevel, REPORT_TITLE};

/// Builds tiered reports over one cleaned dataset.
///
/// Aggregates are computed on first use and reused for the rest of the session; chart
/// images and exports are rewritten on every request.
pub struct ReportEngine<'a> {
    dataset: &'a Dataset,
    cleaning: CleaningSummary,
    asset_dir: PathBuf,
    enriched: OnceCell<Enriched<'a>>,
    overview: OnceCell<OverviewReport>,
    trends: OnceCell<TrendSummary>,
    distributions: OnceCell<DistributionSummary>
}

impl<'a> ReportEngine<'a> {
    pub fn new(dataset: &'a Dataset, cleaning: CleaningSummary, asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            dataset,
            cleaning,
            asset_dir: asset_dir.into(),
            enriched: OnceCell::new(),
            overview: OnceCell::new(),
            trends: OnceCell::new(),
            distributions: OnceCell::new()
        }
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    pub fn overview(&self) -> &OverviewReport {
        self.overview.get_or_init(|| {
            debug!("Computing dataset overview");
            build_overview(self.enriched(), &self.cleaning)
        })
    }

    pub fn trend_summary(&self) -> &TrendSummary {
        self.trends.get_or_init(|| {
            debug!("Computing trend aggregates");
            summarize_trends(self.enriched())
        })
    }

    pub fn distribution_summary(&self) -> &DistributionSummary {
        self.distributions.get_or_init(|| {
            debug!("Computing distribution aggregates");
            summarize_distributions(self.enriched())
        })
    }

    fn enriched(&self) -> &Enriched<'a> {
        self.enriched.get_or_init(|| {
            debug!("Enriching {} transactions", self.dataset.len());
            let enriched = self.dataset.enrich();

            if enriched.is_empty() {
                warn!("No transactions survived cleaning; charts and exports will be skipped");
            }

            enriched
        })
    }
}

impl ReportGenerator for ReportEngine<'_> {
    fn generate(&self, level: ReportLevel) -> Result<GeneratedReport, EngineError> {
        let timer = Instant::now();
        fs::create_dir_all(&self.asset_dir)?;

        let builder = title_page(DocumentBuilder::new(REPORT_TITLE), level, Local::now().date_naive(), &self.cleaning);
        let mut builder = compose_level_1(builder, self.overview());

        if level >= ReportLevel::Trends {
            let trends = render_trend_charts(self.trend_summary(), &self.asset_dir)?;
            log_charts("trend", &trends.charts);
            builder = compose_level_2(builder, &trends);
        }

        if level >= ReportLevel::Distributions {
            let distributions = render_distribution_charts(self.distribution_summary(), &self.asset_dir)?;
            log_charts("distribution", &distributions.charts);
            builder = compose_level_3(builder, &distributions)?;
        }

        let path = self.asset_dir.join(level.file_name());
        let pages = render_pdf(&builder.build(), &path)?;

        info!("Generated [{}] with {pages} pages in {:?}", path.display(), timer.elapsed());

        Ok(GeneratedReport { path, pages })
    }
}

fn log_charts(tier: &str, charts: &ChartSet) {
    if charts.is_empty() {
        warn!("No {tier} charts could be drawn");
        return;
    }

    debug!("Rendered {} {tier} charts", charts.len());
    for (kind, path) in charts.iter() {
        debug!("{kind:?} -> [{}]", path.display());
    }
}
