//! genchart: generation line charts and histogram charts.
//!
//! Components mount a canvas on an explicit host, describe their data as a
//! chart configuration and push draw lists to a pluggable renderer.

pub mod api;
pub mod components;
pub mod core;
pub mod error;
pub mod host;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig, ChartKind};
pub use components::{
    ChartState, GenerationResetPolicy, HistogramChart, HistogramChartConfig, HistogramResetPolicy,
    HistogramStyle, SeriesChart, SeriesChartConfig,
};
pub use error::{ChartError, ChartResult};
