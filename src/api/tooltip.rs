use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::snap::nearest_sample;
use crate::core::types::{AxisSide, format_raw_number};

use super::config::TooltipMetrics;
use super::render_context::PanelContext;

/// Series closest to the pointer at the snapped X.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestLine {
    pub key: String,
    pub visual_group: String,
    pub side: AxisSide,
    pub measure: usize,
    pub pixel_y: f64,
    pub distance_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipMeasureValue {
    pub name: String,
    pub side: AxisSide,
    pub value: Option<f64>,
    pub label: String,
    pub pixel_y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipField {
    pub name: String,
    pub value: String,
}

/// Panel-relative rectangle of the tooltip value box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything a renderer needs to draw the tooltip for one pointer position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipSnapshot {
    pub generation: u64,
    pub panel: usize,
    pub pointer: (f64, f64),
    pub target_x: f64,
    pub snapped_x: f64,
    pub snapped_px: f64,
    pub x_label: String,
    pub line: NearestLine,
    pub measures: Vec<TooltipMeasureValue>,
    pub fields: Vec<TooltipField>,
    pub placement: TooltipBox,
}

/// Finds the series whose rendered point at `snapped_x` is vertically
/// closest to `pointer_y`. Ties keep the first series found in panel order.
#[must_use]
pub fn nearest_line(panel: &PanelContext, snapped_x: f64, pointer_y: f64) -> Option<NearestLine> {
    let mut best: Option<NearestLine> = None;
    for line in panel.group.lines.values() {
        let Some(row) = line.row_at(snapped_x) else {
            continue;
        };
        for side in [AxisSide::Left, AxisSide::Right] {
            for (measure, value) in row.values(side).iter().enumerate() {
                let Some(value) = value.filter(|v| v.is_finite()) else {
                    continue;
                };
                let Some(axis) = panel.axis_for(side, measure) else {
                    continue;
                };
                let pixel_y = axis.scale().map(value);
                let distance_px = (pixel_y - pointer_y).abs();
                if best.as_ref().is_none_or(|b| distance_px < b.distance_px) {
                    best = Some(NearestLine {
                        key: line.key.clone(),
                        visual_group: line.visual_group().to_owned(),
                        side,
                        measure,
                        pixel_y,
                        distance_px,
                    });
                }
            }
        }
    }
    best
}

/// Converts pointer positions into tooltip snapshots for one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipEngine {
    metrics: TooltipMetrics,
    trellis_by_measure: bool,
}

impl TooltipEngine {
    #[must_use]
    pub fn new(metrics: TooltipMetrics, trellis_by_measure: bool) -> Self {
        Self {
            metrics,
            trellis_by_measure,
        }
    }

    /// Builds the snapshot for a pointer at `pointer_abs` (chart coordinates).
    ///
    /// Returns `None` when the panel has no samples or no series renders a
    /// value at the snapped X.
    #[must_use]
    pub fn snapshot(
        &self,
        generation: u64,
        panel: &PanelContext,
        pointer_abs: (f64, f64),
        field_names: &[String],
    ) -> Option<TooltipSnapshot> {
        let pointer = (
            pointer_abs.0 - panel.origin.0,
            pointer_abs.1 - panel.origin.1,
        );
        let x_scale = panel.x_axis.scale();
        let target_x = x_scale.invert(pointer.0);
        let snapped_x = nearest_sample(panel.group.distinct_x(), target_x)?;
        let snapped_px = x_scale.map(snapped_x);
        let line = nearest_line(panel, snapped_x, pointer.1)?;
        let row = panel.group.lines.get(&line.key)?.row_at(snapped_x)?;

        let measures: Vec<TooltipMeasureValue> = [AxisSide::Left, AxisSide::Right]
            .into_iter()
            .flat_map(|side| panel.measures(side).iter())
            .map(|measure| {
                let value = row
                    .values(measure.side)
                    .get(measure.index)
                    .copied()
                    .flatten();
                let pixel_y = value.and_then(|value| {
                    panel
                        .axis_for(measure.side, measure.index)
                        .map(|axis| axis.scale().map(value))
                });
                TooltipMeasureValue {
                    name: measure.name.clone(),
                    side: measure.side,
                    value,
                    label: value.map(format_raw_number).unwrap_or_default(),
                    pixel_y,
                }
            })
            .collect();

        let fields: Vec<TooltipField> = field_names
            .iter()
            .zip(&row.tooltip_data)
            .map(|(name, value)| TooltipField {
                name: name.clone(),
                value: value.to_string(),
            })
            .collect();

        let (width, height) = self.box_size(&measures, &fields);
        let placement = self.place_box(
            pointer,
            snapped_px,
            (width, height),
            (panel.size.width, panel.size.height),
        );
        trace!(
            generation,
            panel = panel.index,
            target_x,
            snapped_x,
            line = %line.key,
            "tooltip snapshot"
        );

        Some(TooltipSnapshot {
            generation,
            panel: panel.index,
            pointer,
            target_x,
            snapped_x,
            snapped_px,
            x_label: panel.x_axis.tooltip_label(snapped_x),
            line,
            measures,
            fields,
            placement: TooltipBox {
                x: placement.0,
                y: placement.1,
                width,
                height,
            },
        })
    }

    /// Estimated box size from label and value text lengths.
    #[must_use]
    pub fn box_size(
        &self,
        measures: &[TooltipMeasureValue],
        fields: &[TooltipField],
    ) -> (f64, f64) {
        let labels = measures
            .iter()
            .map(|m| m.name.as_str())
            .chain(fields.iter().map(|f| f.name.as_str()));
        let values = measures
            .iter()
            .map(|m| m.label.as_str())
            .chain(fields.iter().map(|f| f.value.as_str()));
        let max_label = labels.map(|text| text.chars().count()).max().unwrap_or(0);
        let max_value = values.map(|text| text.chars().count()).max().unwrap_or(0);

        let metrics = self.metrics;
        let width =
            (max_label + max_value) as f64 * metrics.char_width_px + metrics.padding_px * 3.0;
        let rows = if self.trellis_by_measure {
            2 + fields.len()
        } else {
            1 + measures.len() + fields.len()
        };
        (width, rows as f64 * metrics.row_height_px)
    }

    /// Right of the cursor when the box fits, else left of the snapped line.
    /// Vertically follows the cursor without crossing the bottom edge.
    #[must_use]
    pub fn place_box(
        &self,
        pointer: (f64, f64),
        snapped_px: f64,
        box_size: (f64, f64),
        panel_size: (f64, f64),
    ) -> (f64, f64) {
        let offset = self.metrics.cursor_offset_px;
        let x = if box_size.0 + pointer.0 <= panel_size.0 {
            pointer.0 + offset
        } else {
            snapped_px - box_size.0 - offset
        };
        let y = if box_size.1 + pointer.1 <= panel_size.1 {
            pointer.1
        } else {
            panel_size.1 - box_size.1
        };
        (x, y)
    }
}
