use tracing::{debug, trace};

use crate::api::{AxisLabel, Chart, ChartConfig, ChartData, Dataset};
use crate::core::{Color, translucent_fill};
use crate::error::{ChartError, ChartResult};
use crate::host::{CanvasHandle, CanvasSpec, ChartHost};
use crate::render::Renderer;

use super::ChartState;
use super::config::{GenerationResetPolicy, SeriesChartConfig, SeriesSpec};

/// Line chart with one x tick per generation and one line per series.
pub struct SeriesChart<R: Renderer> {
    chart: Chart<R>,
    series: Vec<SeriesSpec>,
    generation: u64,
    generation_reset: GenerationResetPolicy,
}

impl<R: Renderer> SeriesChart<R> {
    /// Mounts a canvas on `host` and draws an empty chart with one dataset
    /// per configured series.
    pub fn new<H: ChartHost>(
        host: &mut H,
        renderer: R,
        config: SeriesChartConfig,
    ) -> ChartResult<Self> {
        config.validate()?;
        let canvas = host.mount_canvas(CanvasSpec::new(config.width, config.height))?;
        Self::with_canvas(canvas, renderer, config)
    }

    /// Builds the chart on a canvas the caller already mounted.
    pub fn with_canvas(
        canvas: CanvasHandle,
        renderer: R,
        config: SeriesChartConfig,
    ) -> ChartResult<Self> {
        let datasets = config
            .series
            .iter()
            .map(|spec| {
                // Unparseable series colors draw black; the fill has its own fallback.
                let border = Color::parse_hex(&spec.color).unwrap_or(Color::BLACK);
                Dataset::new(spec.label.clone(), border, translucent_fill(&spec.color))
            })
            .collect();

        let mut chart_config = ChartConfig::line(ChartData {
            labels: Vec::new(),
            datasets,
        });
        if let Some(title) = &config.x_axis_title {
            chart_config.options.scales.x = chart_config.options.scales.x.clone().with_title(title);
        }
        if let Some(title) = &config.y_axis_title {
            chart_config.options.scales.y = chart_config.options.scales.y.clone().with_title(title);
        }

        let chart = Chart::new(renderer, canvas, chart_config)?;
        debug!(series = config.series.len(), "created series chart");

        Ok(Self {
            chart,
            series: config.series,
            generation: 1,
            generation_reset: config.generation_reset,
        })
    }

    /// Appends one generation. `None` is ignored.
    ///
    /// `point` must hold one finite value per series, in series order.
    pub fn render(&mut self, point: Option<&[f64]>) -> ChartResult<()> {
        let Some(point) = point else {
            trace!("skipping render without data");
            return Ok(());
        };

        if point.len() != self.series.len() {
            return Err(ChartError::LengthMismatch {
                what: "data point",
                expected: self.series.len(),
                actual: point.len(),
            });
        }
        if let Some(index) = point.iter().position(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "value for series `{}` must be finite",
                self.series[index].label
            )));
        }

        let generation = self.generation;
        self.chart.update_with(|data| {
            data.labels.push(AxisLabel::Generation(generation));
            for (dataset, value) in data.datasets.iter_mut().zip(point) {
                dataset.data.push(*value);
            }
        })?;
        self.generation += 1;
        trace!(generation, "appended generation");
        Ok(())
    }

    /// Clears labels and values in place and redraws.
    pub fn reset(&mut self) -> ChartResult<()> {
        let data = self.chart.data_mut();
        data.labels.clear();
        for dataset in &mut data.datasets {
            dataset.data.clear();
        }
        if self.generation_reset == GenerationResetPolicy::Restart {
            self.generation = 1;
        }
        debug!(next_generation = self.generation, "reset series chart");

        self.chart.update()
    }

    /// Generation number the next `render` will use.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn state(&self) -> ChartState {
        if self.chart.data().labels.is_empty() {
            ChartState::Empty
        } else {
            ChartState::Populated
        }
    }

    #[must_use]
    pub fn series(&self) -> &[SeriesSpec] {
        &self.series
    }

    #[must_use]
    pub fn labels(&self) -> &[AxisLabel] {
        &self.chart.data().labels
    }

    #[must_use]
    pub fn datasets(&self) -> &[Dataset] {
        &self.chart.data().datasets
    }

    /// Values recorded for series `index`, in render order.
    #[must_use]
    pub fn series_values(&self, index: usize) -> Option<&[f64]> {
        self.chart
            .data()
            .datasets
            .get(index)
            .map(|dataset| dataset.data.as_slice())
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
