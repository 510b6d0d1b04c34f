mod axis_label_format;
mod axis_ticks;
mod axis_x;
mod axis_y;
mod config;
mod data_controller;
mod engine;
mod frame_builder;
mod interaction_controller;
mod layout;
mod legend;
mod line_label;
mod range_slider;
mod render_context;
mod selection;
mod series_style;
mod style_store;
mod tooltip;

pub use axis_label_format::{
    NumberLabelStyle, date_granularity, format_date_tick, format_full_date, format_percent,
    format_si,
};
pub use axis_ticks::{
    AxisTick, DateGranularity, X_TICK_SPACING_PX, Y_TICK_SPACING_PX, axis_tick_count,
    date_tick_count, nice_ticks,
};
pub use axis_x::{XAxis, XValueKind};
pub use axis_y::{
    AxisMeasures, Y_AXIS_EDGE_GAP_PX, Y_AXIS_STACK_STEP_PX, Y_HEADROOM, YAxis, y_domain,
};
pub use config::{
    AxisScope, DEFAULT_COLOURS, DEFAULT_LINE_STYLES, ScaleScope, StyleDriver, TooltipMetrics,
    TrellisEngineConfig, TrellisSettings,
};
pub use engine::{TrellisEngine, UpdateInput, UpdateOutcome};
pub use frame_builder::build_render_frame;
pub use layout::{LayoutRequest, Margins, TrellisLayout, column_count};
pub use legend::{
    LegendEntry, LegendModel, LegendNaming, group_line_keys, measure_legend,
    measure_legend_title, series_legend, series_legend_title,
};
pub use line_label::{
    LINE_LABEL_CHAR_WIDTH_PX, LINE_LABEL_STEP_PX, LINE_LABEL_TOP_PX, LineLabel, stacked_labels,
};
pub use range_slider::{
    HANDLE_MIN_SEPARATION_PX, RangeSlider, SliderHandle, SliderOrientation, clip_delta,
};
pub use render_context::{PanelContext, RenderContext, SliderAxis};
pub use selection::{
    Emphasis, FilterRequest, FilterTarget, HostFilter, InMemoryHostFilter, SelectionCoordinator,
    ToggleOutcome,
};
pub use series_style::{SeriesStyle, StyleBinding};
pub use style_store::{
    ConfigPersistence, InMemoryPersistence, PersistedStyles, StyleAssignmentStore, StyleEntry,
    StyleKind,
};
pub use tooltip::{
    NearestLine, TooltipBox, TooltipEngine, TooltipField, TooltipMeasureValue, TooltipSnapshot,
    nearest_line,
};
