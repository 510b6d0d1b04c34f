use serde::{Deserialize, Serialize};

use crate::api::{
    AxisTick, Emphasis, LegendModel, LineLabel, SliderAxis, TooltipSnapshot, TrellisLayout,
};
use crate::core::{AxisSide, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Polyline of one series × measure in panel pixels, sorted by x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPath {
    pub line_key: String,
    pub visual_group: String,
    pub measure: String,
    pub side: AxisSide,
    pub colour: String,
    pub line_style: String,
    pub emphasis: Emphasis,
    pub opacity: f64,
    pub stroke_width: f64,
    pub points: Vec<(f64, f64)>,
}

impl SeriesPath {
    pub fn validate(&self) -> ChartResult<()> {
        Color::from_hex(&self.colour)?
            .with_alpha(self.opacity)
            .validate()?;
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "series stroke width must be finite and > 0".to_owned(),
            ));
        }
        if self
            .points
            .iter()
            .any(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(ChartError::InvalidData(format!(
                "series `{}` has non-finite points",
                self.line_key
            )));
        }
        if self.points.windows(2).any(|pair| pair[1].0 < pair[0].0) {
            return Err(ChartError::InvalidData(format!(
                "series `{}` points must be sorted by x",
                self.line_key
            )));
        }
        Ok(())
    }
}

/// Axis line position and its labelled ticks. `side` is `None` for the X axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    pub side: Option<AxisSide>,
    pub position: f64,
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderFrame {
    pub axis: SliderAxis,
    pub min_handle_px: f64,
    pub max_handle_px: f64,
    pub bounds: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelFrame {
    pub index: usize,
    pub key: String,
    pub title: Option<String>,
    pub origin: (f64, f64),
    pub size: Viewport,
    pub x_axis: AxisFrame,
    pub y_axes: Vec<AxisFrame>,
    pub series: Vec<SeriesPath>,
    pub sliders: Vec<SliderFrame>,
    /// Panel-relative line labels, empty when labels are off.
    pub line_labels: Vec<LineLabel>,
    pub legend: Option<LegendModel>,
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub generation: u64,
    pub viewport: Viewport,
    pub layout: TrellisLayout,
    /// Shared legends drawn in the legend band.
    pub legends: Vec<LegendModel>,
    pub panels: Vec<PanelFrame>,
    pub tooltip: Option<TooltipSnapshot>,
}

impl RenderFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for panel in &self.panels {
            if !panel.size.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: panel.size.width,
                    height: panel.size.height,
                });
            }
            for series in &panel.series {
                series.validate()?;
            }
        }
        if let Some(tooltip) = &self.tooltip {
            if tooltip.generation != self.generation {
                return Err(ChartError::InvalidData(
                    "tooltip snapshot belongs to another generation".to_owned(),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.panels.iter().map(|panel| panel.series.len()).sum()
    }

    pub fn series(&self) -> impl Iterator<Item = &SeriesPath> {
        self.panels.iter().flat_map(|panel| panel.series.iter())
    }
}
