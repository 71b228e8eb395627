mod chart;
mod chart_config;
mod frame_builder;
mod json_contract;

pub use chart::Chart;
pub use chart_config::{
    AxisLabel, AxisOptions, AxisTitle, ChartConfig, ChartData, ChartKind, ChartOptions, Dataset,
    DEFAULT_MAX_X_TICKS, InteractionMode, InteractionOptions, ScalesOptions, TickOptions,
};
pub use frame_builder::{build_chart_frame, category_center_x, visible_label_indices};
pub use json_contract::{CHART_CONFIG_JSON_SCHEMA_V1, ChartConfigJsonContractV1};
