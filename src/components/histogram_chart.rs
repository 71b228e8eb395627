use tracing::{debug, trace};

use crate::api::{AxisLabel, Chart, ChartConfig, ChartData, Dataset};
use crate::core::{HistogramPalette, bin_counts};
use crate::error::{ChartError, ChartResult};
use crate::host::{CanvasHandle, CanvasSpec, ChartHost};
use crate::render::Renderer;

use super::ChartState;
use super::config::{HistogramChartConfig, HistogramResetPolicy};

/// Bar chart showing one value per fixed bin.
pub struct HistogramChart<R: Renderer> {
    chart: Chart<R>,
    initial: ChartConfig,
    bins: Vec<String>,
    edges: Option<Vec<f64>>,
    palette: HistogramPalette,
    reset_policy: HistogramResetPolicy,
    populated: bool,
}

impl<R: Renderer> HistogramChart<R> {
    /// Mounts a canvas on `host` and draws all bins at zero.
    pub fn new<H: ChartHost>(
        host: &mut H,
        renderer: R,
        config: HistogramChartConfig,
    ) -> ChartResult<Self> {
        config.validate()?;
        let canvas = host.mount_canvas(CanvasSpec::new(config.width, config.height))?;
        Self::with_canvas(canvas, renderer, config)
    }

    /// Builds the chart on a canvas the caller already mounted.
    pub fn with_canvas(
        canvas: CanvasHandle,
        renderer: R,
        config: HistogramChartConfig,
    ) -> ChartResult<Self> {
        config.validate()?;
        let palette = config.style().palette();
        let dataset =
            Dataset::from_palette(config.label.clone(), palette).with_data(vec![0.0; config.bins.len()]);
        let initial = ChartConfig::bar(ChartData {
            labels: config.bins.iter().cloned().map(AxisLabel::Category).collect(),
            datasets: vec![dataset],
        });

        let chart = Chart::new(renderer, canvas, initial.clone())?;
        debug!(bins = config.bins.len(), label = %config.label, "created histogram chart");

        Ok(Self {
            chart,
            initial,
            bins: config.bins,
            edges: config.edges,
            palette,
            reset_policy: config.reset_policy,
            populated: false,
        })
    }

    /// Replaces all bin values. `None` is ignored.
    pub fn render(&mut self, data: Option<&[f64]>) -> ChartResult<()> {
        let Some(data) = data else {
            trace!("skipping render without data");
            return Ok(());
        };

        if data.len() != self.bins.len() {
            return Err(ChartError::LengthMismatch {
                what: "histogram data",
                expected: self.bins.len(),
                actual: data.len(),
            });
        }
        if let Some(index) = data.iter().position(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "value for bin `{}` must be finite",
                self.bins[index]
            )));
        }

        self.chart.update_with(|chart_data| {
            if let Some(dataset) = chart_data.datasets.first_mut() {
                dataset.data = data.to_vec();
            }
        })?;
        self.populated = true;
        trace!(bins = data.len(), "replaced histogram data");
        Ok(())
    }

    /// Bins raw samples over the configured edges and renders the counts.
    pub fn render_samples(&mut self, samples: &[f64]) -> ChartResult<()> {
        let edges = self.edges.as_deref().ok_or_else(|| {
            ChartError::InvalidData("histogram has no bin edges configured".to_owned())
        })?;
        let counts: Vec<f64> = bin_counts(samples, edges)?
            .into_iter()
            .map(|count| count as f64)
            .collect();
        self.render(Some(&counts))
    }

    /// Returns every bin to zero according to the reset policy.
    pub fn reset(&mut self) -> ChartResult<()> {
        match self.reset_policy {
            HistogramResetPolicy::Recreate => {
                self.chart.recreate(self.initial.clone())?;
            }
            HistogramResetPolicy::InPlace => {
                for dataset in &mut self.chart.data_mut().datasets {
                    dataset.data.iter_mut().for_each(|value| *value = 0.0);
                }
                self.chart.update()?;
            }
        }
        self.populated = false;
        debug!(policy = ?self.reset_policy, "reset histogram chart");
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> ChartState {
        if self.populated {
            ChartState::Populated
        } else {
            ChartState::Empty
        }
    }

    /// Current bin values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.chart
            .data()
            .datasets
            .first()
            .map_or(&[][..], |dataset| dataset.data.as_slice())
    }

    #[must_use]
    pub fn bins(&self) -> &[String] {
        &self.bins
    }

    #[must_use]
    pub fn edges(&self) -> Option<&[f64]> {
        self.edges.as_deref()
    }

    #[must_use]
    pub fn palette(&self) -> HistogramPalette {
        self.palette
    }

    #[must_use]
    pub fn reset_policy(&self) -> HistogramResetPolicy {
        self.reset_policy
    }

    #[must_use]
    pub fn canvas(&self) -> &CanvasHandle {
        self.chart.canvas()
    }

    #[must_use]
    pub fn chart(&self) -> &Chart<R> {
        &self.chart
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.chart.into_renderer()
    }
}
