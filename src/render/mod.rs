mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};

pub use crate::core::Color;

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from chart data handling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Releases backend resources held for the current chart.
    ///
    /// Called when a chart is destroyed; the renderer may be reused by a
    /// chart recreated on the same canvas afterwards.
    fn release(&mut self) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        (**self).render(frame)
    }

    fn release(&mut self) {
        (**self).release();
    }
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
