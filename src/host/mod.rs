//! Mount points for chart canvases.
//!
//! Components receive their host explicitly instead of looking up a global
//! container, so several dashboards can coexist in one process.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Container id used by dashboard pages.
pub const DEFAULT_CONTAINER_ID: &str = "elements";

/// Inline style applied to every chart canvas.
pub const DEFAULT_CANVAS_STYLE: &str = "border:1px dotted";

/// Canvas requested by a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSpec {
    pub viewport: Viewport,
    pub style: String,
}

impl CanvasSpec {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            style: DEFAULT_CANVAS_STYLE.to_owned(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanvasId(pub u64);

/// Reference to a canvas mounted on a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasHandle {
    pub id: CanvasId,
    pub container_id: String,
    pub viewport: Viewport,
}

/// Page-side contract: something that can append a canvas to a container.
pub trait ChartHost {
    fn mount_canvas(&mut self, spec: CanvasSpec) -> ChartResult<CanvasHandle>;
}

/// In-memory host that records mounted canvases in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessHost {
    container_id: Option<String>,
    canvases: IndexMap<CanvasId, CanvasSpec>,
    next_id: u64,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINER_ID)
    }
}

impl HeadlessHost {
    #[must_use]
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: Some(container_id.into()),
            canvases: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Host whose page has no container; every mount fails.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            container_id: None,
            canvases: IndexMap::new(),
            next_id: 1,
        }
    }

    #[must_use]
    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    #[must_use]
    pub fn canvas_count(&self) -> usize {
        self.canvases.len()
    }

    #[must_use]
    pub fn canvas(&self, id: CanvasId) -> Option<&CanvasSpec> {
        self.canvases.get(&id)
    }

    pub fn canvases(&self) -> impl Iterator<Item = (CanvasId, &CanvasSpec)> {
        self.canvases.iter().map(|(id, spec)| (*id, spec))
    }
}

impl ChartHost for HeadlessHost {
    fn mount_canvas(&mut self, spec: CanvasSpec) -> ChartResult<CanvasHandle> {
        let container_id = self
            .container_id
            .clone()
            .ok_or_else(|| ChartError::MissingContainer(DEFAULT_CONTAINER_ID.to_owned()))?;
        spec.viewport.validate()?;

        let id = CanvasId(self.next_id);
        self.next_id += 1;
        let viewport = spec.viewport;
        self.canvases.insert(id, spec);
        debug!(
            canvas_id = id.0,
            container = %container_id,
            width = viewport.width,
            height = viewport.height,
            "mounted canvas"
        );

        Ok(CanvasHandle {
            id,
            container_id,
            viewport,
        })
    }
}
