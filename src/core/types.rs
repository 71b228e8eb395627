use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Canvas size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Rectangle inside the viewport where series geometry is drawn.
///
/// Axis labels and the legend live in the margins around it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Insets the viewport by the given margins, collapsing to a zero-sized
    /// area when the canvas is smaller than the margins.
    #[must_use]
    pub fn inset(viewport: Viewport, left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let full_width = f64::from(viewport.width);
        let full_height = f64::from(viewport.height);
        let left = left.min(full_width);
        let top = top.min(full_height);
        Self {
            left,
            top,
            width: (full_width - left - right).max(0.0),
            height: (full_height - top - bottom).max(0.0),
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn is_drawable(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}
