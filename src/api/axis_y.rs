use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::scale::AxisScale;
use crate::core::types::AxisSide;
use crate::error::ChartResult;

use super::axis_label_format::NumberLabelStyle;
use super::axis_ticks::{AxisTick, Y_TICK_SPACING_PX, axis_tick_count, nice_ticks};

/// Headroom applied above the largest value.
pub const Y_HEADROOM: f64 = 1.05;
/// Horizontal distance between stacked axes on one side.
pub const Y_AXIS_STACK_STEP_PX: f64 = 50.0;
/// Gap between the plot edge and the innermost axis.
pub const Y_AXIS_EDGE_GAP_PX: f64 = 10.0;

/// Measures an axis renders, as indices into its side's measure list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisMeasures {
    /// Every measure of the side shares this axis.
    All,
    /// Only the measure at this index.
    Single(usize),
}

impl AxisMeasures {
    #[must_use]
    pub fn includes(&self, measure: usize) -> bool {
        match self {
            Self::All => true,
            Self::Single(idx) => *idx == measure,
        }
    }

    #[must_use]
    pub fn as_filter(&self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::Single(idx) => Some(*idx),
        }
    }
}

/// `[0, max × 1.05]`, or `[0, 1]` when there is no positive maximum.
#[must_use]
pub fn y_domain(max_value: Option<f64>) -> (f64, f64) {
    match max_value {
        Some(max) if max.is_finite() && max > 0.0 => (0.0, max * Y_HEADROOM),
        _ => (0.0, 1.0),
    }
}

/// Vertical axis on one side of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct YAxis {
    side: AxisSide,
    stack_index: usize,
    measures: AxisMeasures,
    scale: AxisScale,
    full_scale: AxisScale,
    label_style: NumberLabelStyle,
    height: f64,
    tick_count: usize,
}

impl YAxis {
    pub fn new(
        side: AxisSide,
        stack_index: usize,
        measures: AxisMeasures,
        max_value: Option<f64>,
        height: f64,
        label_style: NumberLabelStyle,
    ) -> ChartResult<Self> {
        let scale = AxisScale::new(y_domain(max_value), (height, 0.0))?;
        Ok(Self {
            side,
            stack_index,
            measures,
            scale,
            full_scale: scale,
            label_style,
            height,
            tick_count: axis_tick_count(height, Y_TICK_SPACING_PX),
        })
    }

    #[must_use]
    pub fn side(&self) -> AxisSide {
        self.side
    }

    #[must_use]
    pub fn stack_index(&self) -> usize {
        self.stack_index
    }

    #[must_use]
    pub fn measures(&self) -> &AxisMeasures {
        &self.measures
    }

    #[must_use]
    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    #[must_use]
    pub fn full_scale(&self) -> AxisScale {
        self.full_scale
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    #[must_use]
    pub fn label_style(&self) -> NumberLabelStyle {
        self.label_style
    }

    /// Axis line position relative to the panel's left edge.
    #[must_use]
    pub fn x_position(&self, panel_width: f64) -> f64 {
        let offset = self.stack_index as f64 * Y_AXIS_STACK_STEP_PX + Y_AXIS_EDGE_GAP_PX;
        match self.side {
            AxisSide::Left => -offset,
            AxisSide::Right => panel_width + offset,
        }
    }

    pub fn set_domain(&mut self, domain: (f64, f64)) -> ChartResult<()> {
        self.scale.set_domain(domain)?;
        trace!(
            side = ?self.side,
            stack_index = self.stack_index,
            min = domain.0,
            max = domain.1,
            "y axis domain updated"
        );
        Ok(())
    }

    #[must_use]
    pub fn ticks(&self) -> Vec<AxisTick> {
        let (min, max) = self.scale.domain();
        nice_ticks(min, max, self.tick_count)
            .into_iter()
            .map(|value| AxisTick {
                value,
                pixel: self.scale.map(value),
                label: self.label_style.format(value),
            })
            .collect()
    }
}
