use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Chart [{chart}] has no data to plot")]
    Empty {
        chart: String
    },
    #[error("Chart drawing failed: {0}")]
    Draw(String)
}

impl ChartError {
    pub fn empty(chart: &str) -> Self {
        Self::Empty { chart: chart.to_string() }
    }

    pub fn draw(error: impl Display) -> Self {
        Self::Draw(error.to_string())
    }
}
