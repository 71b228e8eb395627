//! Dashboard components: generation line charts and histograms.

mod config;
mod histogram_chart;
mod series_chart;

use serde::{Deserialize, Serialize};

pub use config::{
    GenerationResetPolicy, HistogramChartConfig, HistogramResetPolicy, HistogramStyle,
    SeriesChartConfig, SeriesSpec,
};
pub use histogram_chart::HistogramChart;
pub use series_chart::SeriesChart;

/// Observable lifecycle of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartState {
    /// Just constructed or just reset.
    Empty,
    /// At least one `render` since the last reset.
    Populated,
}
