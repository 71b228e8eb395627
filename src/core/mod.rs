pub mod binning;
pub mod color;
pub mod scale;
pub mod types;

pub use binning::{bin_counts, bin_labels_from_edges, validate_edges};
pub use color::{Color, HistogramPalette, translucent_fill};
pub use scale::LinearScale;
pub use types::{PlotArea, Viewport};
