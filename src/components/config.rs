use serde::{Deserialize, Serialize};

use crate::core::{HistogramPalette, Viewport, bin_labels_from_edges, validate_edges};
use crate::error::{ChartError, ChartResult};

/// One tracked metric on a generation chart.
///
/// Accepts both `label`/`color` and the capitalized `Label`/`Color` keys
/// emitted by existing dashboard servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    #[serde(alias = "Label")]
    pub label: String,
    #[serde(alias = "Color")]
    pub color: String,
}

impl SeriesSpec {
    #[must_use]
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
        }
    }
}

/// What happens to the generation counter on `SeriesChart::reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationResetPolicy {
    /// The next render is labeled generation 1 again.
    #[default]
    Restart,
    /// Keep counting, giving a running x axis across restarts.
    Retain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesChartConfig {
    pub series: Vec<SeriesSpec>,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub generation_reset: GenerationResetPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_title: Option<String>,
}

impl SeriesChartConfig {
    #[must_use]
    pub fn new(series: Vec<SeriesSpec>, width: u32, height: u32) -> Self {
        Self {
            series,
            width,
            height,
            generation_reset: GenerationResetPolicy::default(),
            x_axis_title: None,
            y_axis_title: None,
        }
    }

    #[must_use]
    pub fn with_generation_reset(mut self, policy: GenerationResetPolicy) -> Self {
        self.generation_reset = policy;
        self
    }

    #[must_use]
    pub fn with_axis_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_axis_title = Some(x.into());
        self.y_axis_title = Some(y.into());
        self
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse series chart config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport().validate()
    }
}

/// What `HistogramChart::reset` does with the underlying chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistogramResetPolicy {
    /// Destroy the chart and recreate it from the zeroed configuration.
    #[default]
    Recreate,
    /// Zero the values and redraw the live chart.
    InPlace,
}

/// Bar coloring of a histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistogramStyle {
    Legacy,
    Derived(String),
}

impl HistogramStyle {
    #[must_use]
    pub fn palette(&self) -> HistogramPalette {
        match self {
            Self::Legacy => HistogramPalette::legacy(),
            Self::Derived(hex) => HistogramPalette::derived(hex),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramChartConfig {
    pub bins: Vec<String>,
    pub width: u32,
    pub height: u32,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub reset_policy: HistogramResetPolicy,
    /// Numeric bin edges; enables `HistogramChart::render_samples`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<f64>>,
}

impl HistogramChartConfig {
    #[must_use]
    pub fn new(bins: Vec<String>, width: u32, height: u32, label: impl Into<String>) -> Self {
        Self {
            bins,
            width,
            height,
            label: label.into(),
            color: None,
            reset_policy: HistogramResetPolicy::default(),
            edges: None,
        }
    }

    /// Builds a config whose bins are the intervals between `edges`.
    pub fn from_edges(
        edges: Vec<f64>,
        width: u32,
        height: u32,
        label: impl Into<String>,
    ) -> ChartResult<Self> {
        let bins = bin_labels_from_edges(&edges)?;
        Ok(Self {
            edges: Some(edges),
            ..Self::new(bins, width, height, label)
        })
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_reset_policy(mut self, policy: HistogramResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    #[must_use]
    pub fn style(&self) -> HistogramStyle {
        match &self.color {
            Some(color) => HistogramStyle::Derived(color.clone()),
            None => HistogramStyle::Legacy,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse histogram chart config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport().validate()?;
        if self.bins.is_empty() {
            return Err(ChartError::InvalidData(
                "histogram needs at least one bin".to_owned(),
            ));
        }
        if let Some(edges) = &self.edges {
            validate_edges(edges)?;
            if edges.len() - 1 != self.bins.len() {
                return Err(ChartError::LengthMismatch {
                    what: "bin edges",
                    expected: self.bins.len() + 1,
                    actual: edges.len(),
                });
            }
        }
        Ok(())
    }
}
