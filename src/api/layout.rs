use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};

const MARGIN_TOP_WITH_PANEL_LEGEND: f64 = 40.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MARGIN_SIDE_BASE: f64 = 15.0;
const MARGIN_PER_AXIS: f64 = 45.0;
const LEGEND_BAND_HEIGHT: f64 = 40.0;
const LEGEND_BAND_HEIGHT_PER_PANEL: f64 = 20.0;
const LEGEND_BAND_WIDTH_VERTICAL: f64 = 120.0;
const MAX_USER_COLUMNS: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Inputs that shape the panel grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub viewport: Viewport,
    pub panel_count: usize,
    pub left_axis_count: usize,
    pub right_axis_count: usize,
    pub legend_by_trellis: bool,
    pub vertical_legend: bool,
    pub auto_layout: bool,
    pub user_columns: u32,
}

/// Panel grid geometry in chart pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrellisLayout {
    pub columns: usize,
    pub rows: usize,
    pub margins: Margins,
    pub panel_size: Viewport,
    /// Area reserved for the shared legend: top band, or right column when vertical.
    pub legend_band: Viewport,
    pub vertical_legend: bool,
    pub legend_by_trellis: bool,
}

/// Grid columns: the user's count when auto layout is off and it is in
/// `1..=9` (never more than the panels), else `ceil(sqrt(panels))`.
#[must_use]
pub fn column_count(panel_count: usize, auto_layout: bool, user_columns: u32) -> usize {
    let panel_count = panel_count.max(1);
    if !auto_layout && (1..=MAX_USER_COLUMNS).contains(&user_columns) {
        return (user_columns as usize).min(panel_count);
    }
    (panel_count as f64).sqrt().ceil() as usize
}

fn side_margin(axis_count: usize) -> f64 {
    MARGIN_SIDE_BASE + MARGIN_PER_AXIS * axis_count as f64
}

impl TrellisLayout {
    pub fn compute(request: LayoutRequest) -> ChartResult<Self> {
        let invalid = || ChartError::InvalidViewport {
            width: request.viewport.width,
            height: request.viewport.height,
        };
        if !request.viewport.is_valid() {
            return Err(invalid());
        }

        let legend_by_trellis = request.legend_by_trellis && request.panel_count > 1;
        let columns = column_count(request.panel_count, request.auto_layout, request.user_columns);
        let rows = request.panel_count.max(1).div_ceil(columns);
        let margins = Margins {
            top: if legend_by_trellis {
                MARGIN_TOP_WITH_PANEL_LEGEND
            } else {
                MARGIN_TOP
            },
            right: side_margin(request.right_axis_count),
            bottom: MARGIN_BOTTOM,
            left: side_margin(request.left_axis_count),
        };

        let legend_band = if request.vertical_legend {
            Viewport::new(LEGEND_BAND_WIDTH_VERTICAL, request.viewport.height)
        } else {
            let height = if legend_by_trellis {
                LEGEND_BAND_HEIGHT_PER_PANEL
            } else {
                LEGEND_BAND_HEIGHT
            };
            Viewport::new(request.viewport.width, height)
        };
        let (window_width, window_height) = if request.vertical_legend {
            (request.viewport.width - legend_band.width, request.viewport.height)
        } else {
            (request.viewport.width, request.viewport.height - legend_band.height)
        };

        let panel_size = Viewport::new(
            (window_width - (margins.left + margins.right) * columns as f64) / columns as f64,
            (window_height - (margins.top + margins.bottom) * rows as f64) / rows as f64,
        );
        if !panel_size.is_valid() {
            return Err(invalid());
        }

        Ok(Self {
            columns,
            rows,
            margins,
            panel_size,
            legend_band,
            vertical_legend: request.vertical_legend,
            legend_by_trellis,
        })
    }

    /// Outer cell size of one panel including its margins.
    #[must_use]
    pub fn cell_size(&self) -> Viewport {
        Viewport::new(
            self.panel_size.width + self.margins.left + self.margins.right,
            self.panel_size.height + self.margins.top + self.margins.bottom,
        )
    }

    /// Top-left corner of panel `index`'s plot area.
    #[must_use]
    pub fn panel_origin(&self, index: usize) -> (f64, f64) {
        let column = index % self.columns;
        let row = index / self.columns;
        let cell = self.cell_size();
        let top_offset = if self.vertical_legend {
            0.0
        } else {
            self.legend_band.height
        };
        (
            column as f64 * cell.width + self.margins.left,
            top_offset + row as f64 * cell.height + self.margins.top,
        )
    }
}
