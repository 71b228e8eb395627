use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Color, HistogramPalette};
use crate::error::{ChartError, ChartResult};

/// Default cap on drawn x-axis labels for generation charts.
pub const DEFAULT_MAX_X_TICKS: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// One x-axis category: a generation number or a bin label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisLabel {
    Generation(u64),
    Category(String),
}

impl fmt::Display for AxisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generation(generation) => write!(f, "{generation}"),
            Self::Category(label) => f.write_str(label),
        }
    }
}

impl From<u64> for AxisLabel {
    fn from(generation: u64) -> Self {
        Self::Generation(generation)
    }
}

impl From<&str> for AxisLabel {
    fn from(label: &str) -> Self {
        Self::Category(label.to_owned())
    }
}

impl From<String> for AxisLabel {
    fn from(label: String) -> Self {
        Self::Category(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub border_color: Color,
    pub background_color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_background_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_border_color: Option<Color>,
    #[serde(default)]
    pub data: Vec<f64>,
}

impl Dataset {
    #[must_use]
    pub fn new(label: impl Into<String>, border_color: Color, background_color: Color) -> Self {
        Self {
            label: label.into(),
            border_color,
            background_color,
            hover_background_color: None,
            hover_border_color: None,
            data: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_palette(label: impl Into<String>, palette: HistogramPalette) -> Self {
        Self {
            hover_background_color: Some(palette.hover_fill),
            hover_border_color: Some(palette.hover_border),
            ..Self::new(label, palette.border, palette.fill)
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Vec<f64>) -> Self {
        self.data = data;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<AxisLabel>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Number of x-axis positions, covering labels and the longest dataset.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.datasets
            .iter()
            .map(|dataset| dataset.data.len())
            .fold(self.labels.len(), usize::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    Index,
    Nearest,
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionOptions {
    pub mode: InteractionMode,
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisTitle {
    pub display: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_ticks_limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub display: bool,
    #[serde(default)]
    pub title: AxisTitle,
    #[serde(default)]
    pub ticks: TickOptions,
    #[serde(default)]
    pub begin_at_zero: bool,
}

impl Default for AxisOptions {
    fn default() -> Self {
        Self {
            display: true,
            title: AxisTitle {
                display: true,
                text: String::new(),
            },
            ticks: TickOptions::default(),
            begin_at_zero: false,
        }
    }
}

impl AxisOptions {
    #[must_use]
    pub fn with_title(mut self, text: impl Into<String>) -> Self {
        self.title = AxisTitle {
            display: true,
            text: text.into(),
        };
        self
    }

    #[must_use]
    pub fn with_max_ticks_limit(mut self, limit: usize) -> Self {
        self.ticks.max_ticks_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_begin_at_zero(mut self, begin_at_zero: bool) -> Self {
        self.begin_at_zero = begin_at_zero;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScalesOptions {
    pub x: AxisOptions,
    pub y: AxisOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub tooltips: InteractionOptions,
    pub hover: InteractionOptions,
    pub scales: ScalesOptions,
}

impl ChartOptions {
    /// Options for generation line charts.
    #[must_use]
    pub fn line_defaults() -> Self {
        Self {
            responsive: true,
            tooltips: InteractionOptions {
                mode: InteractionMode::Index,
                intersect: false,
            },
            hover: InteractionOptions {
                mode: InteractionMode::Nearest,
                intersect: true,
            },
            scales: ScalesOptions {
                x: AxisOptions::default().with_max_ticks_limit(DEFAULT_MAX_X_TICKS),
                y: AxisOptions::default(),
            },
        }
    }

    /// Options for histogram bar charts; the value axis starts at zero.
    #[must_use]
    pub fn bar_defaults() -> Self {
        Self {
            responsive: true,
            tooltips: InteractionOptions {
                mode: InteractionMode::Index,
                intersect: true,
            },
            hover: InteractionOptions {
                mode: InteractionMode::Nearest,
                intersect: true,
            },
            scales: ScalesOptions {
                x: AxisOptions::default(),
                y: AxisOptions::default().with_begin_at_zero(true),
            },
        }
    }
}

/// Construction parameters of a chart: kind, data and options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    #[must_use]
    pub fn line(data: ChartData) -> Self {
        Self {
            kind: ChartKind::Line,
            data,
            options: ChartOptions::line_defaults(),
        }
    }

    #[must_use]
    pub fn bar(data: ChartData) -> Self {
        Self {
            kind: ChartKind::Bar,
            data,
            options: ChartOptions::bar_defaults(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.options.scales.x.ticks.max_ticks_limit == Some(0) {
            return Err(ChartError::InvalidData(
                "x-axis max ticks limit must be > 0".to_owned(),
            ));
        }
        for dataset in &self.data.datasets {
            dataset.border_color.validate()?;
            dataset.background_color.validate()?;
            for color in [dataset.hover_background_color, dataset.hover_border_color]
                .into_iter()
                .flatten()
            {
                color.validate()?;
            }
            if dataset.data.iter().any(|value| !value.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "dataset `{}` contains non-finite values",
                    dataset.label
                )));
            }
        }
        Ok(())
    }
}
