use serde::{Deserialize, Serialize};

/// User-facing toggles delivered by the host with every update.
///
/// Field names follow the host's property pane. Every field is optional on
/// the wire and falls back to the visual's shipped default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisSettings {
    pub date_continuous: bool,
    pub enable_multiple_y_axes: bool,
    pub show_sliders: bool,
    pub colour_by_measure: bool,
    pub trellis_by_measure: bool,
    pub enable_tooltips: bool,
    pub enable_cross_filter: bool,
    pub x_scale_by_trellis: bool,
    pub y_scale_by_trellis: bool,
    pub legend_by_trellis: bool,
    pub show_trellis_title: bool,
    pub show_line_labels: bool,
    pub trellis_columns: u32,
    pub trellis_auto_layout: bool,
    pub vertical_legend: bool,
    /// Persisted style assignments, `{"dataColours": [...], "lineStyles": [...]}`.
    pub chart_config: String,
}

impl Default for TrellisSettings {
    fn default() -> Self {
        Self {
            date_continuous: true,
            enable_multiple_y_axes: true,
            show_sliders: true,
            colour_by_measure: false,
            trellis_by_measure: false,
            enable_tooltips: true,
            enable_cross_filter: true,
            x_scale_by_trellis: false,
            y_scale_by_trellis: true,
            legend_by_trellis: true,
            show_trellis_title: false,
            show_line_labels: false,
            trellis_columns: 1,
            trellis_auto_layout: true,
            vertical_legend: false,
            chart_config: String::new(),
        }
    }
}

/// Whether an axis domain is computed per panel or across all panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisScope {
    Global,
    PerPanel,
}

/// Which dimension drives series colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleDriver {
    /// Colour per visual group, line style per measure.
    VisualGroup,
    /// Colour per measure, line style per visual group.
    Measure,
}

/// Immutable scoping toggles resolved once per update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleScope {
    pub x: AxisScope,
    pub y: AxisScope,
    pub style_driver: StyleDriver,
}

impl ScaleScope {
    #[must_use]
    pub fn from_settings(settings: &TrellisSettings) -> Self {
        let scope = |per_panel: bool| {
            if per_panel {
                AxisScope::PerPanel
            } else {
                AxisScope::Global
            }
        };
        Self {
            x: scope(settings.x_scale_by_trellis),
            y: scope(settings.y_scale_by_trellis),
            style_driver: if settings.colour_by_measure {
                StyleDriver::Measure
            } else {
                StyleDriver::VisualGroup
            },
        }
    }
}

impl Default for ScaleScope {
    fn default() -> Self {
        Self::from_settings(&TrellisSettings::default())
    }
}

/// Estimated text metrics for tooltip box sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipMetrics {
    pub char_width_px: f64,
    pub padding_px: f64,
    pub row_height_px: f64,
    pub cursor_offset_px: f64,
}

impl Default for TooltipMetrics {
    fn default() -> Self {
        Self {
            char_width_px: 7.0,
            padding_px: 10.0,
            row_height_px: 25.0,
            cursor_offset_px: 10.0,
        }
    }
}

/// Engine bootstrap configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrellisEngineConfig {
    #[serde(default = "default_colour_pool")]
    pub colour_pool: Vec<String>,
    #[serde(default = "default_line_style_pool")]
    pub line_style_pool: Vec<String>,
    #[serde(default)]
    pub tooltip_metrics: TooltipMetrics,
    /// Seed for picking pool members once a pool is exhausted.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for TrellisEngineConfig {
    fn default() -> Self {
        Self {
            colour_pool: default_colour_pool(),
            line_style_pool: default_line_style_pool(),
            tooltip_metrics: TooltipMetrics::default(),
            rng_seed: None,
        }
    }
}

impl TrellisEngineConfig {
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_colour_pool<I, S>(mut self, pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colour_pool = pool.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_line_style_pool<I, S>(mut self, pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.line_style_pool = pool.into_iter().map(Into::into).collect();
        self
    }
}

pub const DEFAULT_COLOURS: [&str; 12] = [
    "#0000FF", "#FF0000", "#00FF00", "#FF8000", "#FFFF00", "#8000FF", "#FF00FF", "#FF0080",
    "#0080FF", "#00FFFF", "#80FF00", "#00FF80",
];

pub const DEFAULT_LINE_STYLES: [&str; 9] = [
    "lineGroup1",
    "lineGroup2",
    "lineGroup3",
    "lineGroup4",
    "lineGroup5",
    "lineGroup6",
    "lineGroup7",
    "lineGroup8",
    "lineGroup9",
];

fn default_colour_pool() -> Vec<String> {
    DEFAULT_COLOURS.iter().map(|c| (*c).to_owned()).collect()
}

fn default_line_style_pool() -> Vec<String> {
    DEFAULT_LINE_STYLES.iter().map(|s| (*s).to_owned()).collect()
}
