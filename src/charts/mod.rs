mod axis;
mod bars;
mod boxplot;
mod errors;
mod heatmap;
mod lines;
mod scatter;
#[cfg(test)]
mod tests;
mod typeface;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use axis::truncate_label;
pub use bars::{draw_bar_chart, Bar, BarChart, Orientation};
pub use boxplot::{draw_box_plot, BoxPlotChart, BoxSummary};
pub use errors::ChartError;
pub use heatmap::{draw_heatmap, Heatmap};
pub use lines::{draw_density_chart, draw_line_chart, DensityChart, LineChart};
pub use scatter::{draw_scatter_chart, ScatterChart, ScatterSeries};
pub use typeface::labels_available;

/// Pixel size of every rendered chart.
pub const CANVAS_SIZE: (u32, u32) = (1200, 700);

/// Every chart the report knows how to place, in report order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ChartKind {
    CountryRevenue,
    MonthlyRevenue,
    TopProducts,
    CorrelationHeatmap,
    RevenueDensity,
    QuantityRevenueScatter,
    PriceBoxPlot
}

impl ChartKind {
    pub const TRENDS: [ChartKind; 3] = [
        ChartKind::CountryRevenue,
        ChartKind::MonthlyRevenue,
        ChartKind::TopProducts
    ];

    pub const DISTRIBUTIONS: [ChartKind; 4] = [
        ChartKind::CorrelationHeatmap,
        ChartKind::RevenueDensity,
        ChartKind::QuantityRevenueScatter,
        ChartKind::PriceBoxPlot
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::CountryRevenue => "country_revenue.png",
            ChartKind::MonthlyRevenue => "monthly_revenue.png",
            ChartKind::TopProducts => "top_products.png",
            ChartKind::CorrelationHeatmap => "correlation_heatmap.png",
            ChartKind::RevenueDensity => "revenue_density.png",
            ChartKind::QuantityRevenueScatter => "quantity_revenue_scatter.png",
            ChartKind::PriceBoxPlot => "price_boxplot.png"
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::CountryRevenue => "Top 10 Countries by Revenue",
            ChartKind::MonthlyRevenue => "Monthly Revenue Trend",
            ChartKind::TopProducts => "Top 10 Products by Quantity Sold",
            ChartKind::CorrelationHeatmap => "Correlation: Quantity, Price and Revenue",
            ChartKind::RevenueDensity => "Revenue Distribution (below 99th percentile)",
            ChartKind::QuantityRevenueScatter => "Quantity vs Revenue (top 5 countries by revenue)",
            ChartKind::PriceBoxPlot => "Unit Price by Country (5 most frequent)"
        }
    }

    /// Location of this chart's image inside `directory`; stable across runs.
    pub fn path_in(&self, directory: &Path) -> PathBuf {
        directory.join(self.file_name())
    }
}

/// Rendered chart images keyed by kind. Charts that could not be drawn are simply absent.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ChartSet {
    charts: BTreeMap<ChartKind, PathBuf>
}

impl ChartSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ChartKind, path: PathBuf) {
        self.charts.insert(kind, path);
    }

    pub fn get(&self, kind: ChartKind) -> Option<&Path> {
        self.charts.get(&kind).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChartKind, &Path)> {
        self.charts.iter().map(|(kind, path)| (*kind, path.as_path()))
    }
}
