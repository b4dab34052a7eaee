mod distribution;
mod errors;
pub(crate) mod exports;
mod overview;
mod stats;
mod trends;

use std::path::Path;

use tracing::{debug, warn};

use crate::charts::{ChartError, ChartKind, ChartSet};

pub use distribution::{render_distribution_charts, summarize_distributions, DistributionReport, DistributionSummary, MonthlyKpi, OutlierLine};
pub use errors::AnalysisError;
pub use overview::{build_overview, OverviewReport};
pub use trends::{render_trend_charts, summarize_trends, TrendReport, TrendSummary};

/// Draws one chart to its fixed path and records it in `charts`.
///
/// A chart with nothing to plot is left out of the set instead of failing the tier.
fn render_chart(
    charts: &mut ChartSet,
    kind: ChartKind,
    directory: &Path,
    draw: impl FnOnce(&Path) -> Result<(), ChartError>
) -> Result<(), AnalysisError> {
    let path = kind.path_in(directory);

    match draw(&path) {
        Ok(()) => {
            debug!("Rendered chart [{}]", path.display());
            charts.insert(kind, path);
            Ok(())
        }
        Err(ChartError::Empty { chart }) => {
            warn!("Skipping chart [{chart}]: nothing to plot");
            Ok(())
        }
        Err(error) => Err(error.into())
    }
}
