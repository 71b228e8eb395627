use tracing::{debug, trace};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::host::CanvasHandle;
use crate::render::{RenderFrame, Renderer};

use super::chart_config::{ChartConfig, ChartData, ChartKind, ChartOptions};
use super::frame_builder::build_chart_frame;

/// A chart bound to one mounted canvas.
///
/// Data is mutated through `data_mut` and becomes visible on the next
/// `update`, or changed and drawn in one step with `update_with`. After `destroy` the chart refuses to draw until `recreate`
/// installs a new configuration on the same canvas.
pub struct Chart<R: Renderer> {
    renderer: R,
    canvas: CanvasHandle,
    config: ChartConfig,
    destroyed: bool,
    updates: u64,
}

impl<R: Renderer> Chart<R> {
    /// Validates `config` and draws the initial frame.
    pub fn new(renderer: R, canvas: CanvasHandle, config: ChartConfig) -> ChartResult<Self> {
        canvas.viewport.validate()?;
        config.validate()?;

        let mut chart = Self {
            renderer,
            canvas,
            config,
            destroyed: false,
            updates: 0,
        };
        debug!(
            canvas_id = chart.canvas.id.0,
            kind = ?chart.config.kind,
            datasets = chart.config.data.datasets.len(),
            "created chart"
        );
        chart.update()?;
        Ok(chart)
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.config.kind
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.config.data
    }

    pub fn data_mut(&mut self) -> &mut ChartData {
        &mut self.config.data
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.config.options
    }

    #[must_use]
    pub fn canvas(&self) -> &CanvasHandle {
        &self.canvas
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.canvas.viewport
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Number of frames handed to the renderer since the chart was created.
    #[must_use]
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    /// Builds the frame for the current data without drawing it.
    pub fn build_frame(&self) -> ChartResult<RenderFrame> {
        if self.destroyed {
            return Err(ChartError::ChartDestroyed);
        }
        build_chart_frame(&self.config, self.canvas.viewport)
    }

    /// Redraws the canvas from the current data.
    pub fn update(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)?;
        self.updates += 1;
        trace!(
            canvas_id = self.canvas.id.0,
            labels = self.config.data.labels.len(),
            update = self.updates,
            "chart updated"
        );
        Ok(())
    }

    /// Applies `change` to the data and redraws.
    ///
    /// If the frame cannot be built or drawn, the data is restored to its
    /// state before `change` and the error is returned.
    pub fn update_with<F>(&mut self, change: F) -> ChartResult<()>
    where
        F: FnOnce(&mut ChartData),
    {
        if self.destroyed {
            return Err(ChartError::ChartDestroyed);
        }
        let previous = self.config.data.clone();
        change(&mut self.config.data);
        if let Err(err) = self.update() {
            self.config.data = previous;
            debug!(canvas_id = self.canvas.id.0, error = %err, "rolled back chart data");
            return Err(err);
        }
        Ok(())
    }

    /// Releases renderer resources and drops all chart data.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.renderer.release();
        self.config.data = ChartData::default();
        self.destroyed = true;
        debug!(canvas_id = self.canvas.id.0, "destroyed chart");
    }

    /// Installs `config` on the same canvas and draws it.
    ///
    /// A live chart is destroyed first.
    pub fn recreate(&mut self, config: ChartConfig) -> ChartResult<()> {
        config.validate()?;
        self.destroy();
        self.config = config;
        self.destroyed = false;
        self.updates = 0;
        debug!(canvas_id = self.canvas.id.0, "recreated chart");
        self.update()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
