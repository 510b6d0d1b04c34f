use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::dictionary::Dictionary;
use crate::core::grouping::{DataGrouper, GroupedData, MeasureReplication, Panel};
use crate::core::roles::{DataTable, MeasureInfo, ResolvedRoles, resolve_roles};
use crate::core::types::{AxisSide, Viewport};
use crate::error::{ChartError, ChartResult};

use super::axis_label_format::NumberLabelStyle;
use super::axis_x::{XAxis, XValueKind};
use super::axis_y::{AxisMeasures, YAxis};
use super::config::{AxisScope, ScaleScope, TrellisSettings};
use super::layout::{LayoutRequest, TrellisLayout};
use super::line_label::{LineLabel, stacked_labels};
use super::range_slider::{RangeSlider, SliderHandle, SliderOrientation};
use super::selection::FilterTarget;
use super::series_style::StyleBinding;

/// Which axis of a panel a slider drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SliderAxis {
    X,
    /// Index into the panel's Y axes.
    Y(usize),
}

/// Everything one panel needs for drawing and pointer handling.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelContext {
    pub index: usize,
    pub key: String,
    pub title: Option<String>,
    /// Top-left corner of the plot area in chart pixels.
    pub origin: (f64, f64),
    pub size: Viewport,
    pub group: Panel,
    pub x_axis: XAxis,
    pub y_axes: Vec<YAxis>,
    pub x_slider: Option<RangeSlider>,
    /// Parallel to `y_axes` when sliders are shown, else empty.
    pub y_sliders: Vec<RangeSlider>,
    /// One per line when line labels are shown, else empty.
    pub line_labels: Vec<LineLabel>,
    left_measures: Vec<MeasureInfo>,
    right_measures: Vec<MeasureInfo>,
}

impl PanelContext {
    /// Measures drawn in this panel on `side`, indexed as the rows store them.
    #[must_use]
    pub fn measures(&self, side: AxisSide) -> &[MeasureInfo] {
        match side {
            AxisSide::Left => &self.left_measures,
            AxisSide::Right => &self.right_measures,
        }
    }

    /// Axis rendering measure `measure` on `side`.
    #[must_use]
    pub fn axis_for(&self, side: AxisSide, measure: usize) -> Option<&YAxis> {
        self.y_axes
            .iter()
            .find(|axis| axis.side() == side && axis.measures().includes(measure))
    }

    #[must_use]
    pub fn contains(&self, point: (f64, f64)) -> bool {
        let (x, y) = self.origin;
        point.0 >= x
            && point.0 <= x + self.size.width
            && point.1 >= y
            && point.1 <= y + self.size.height
    }

    #[must_use]
    pub fn slider(&self, axis: SliderAxis) -> Option<&RangeSlider> {
        match axis {
            SliderAxis::X => self.x_slider.as_ref(),
            SliderAxis::Y(idx) => self.y_sliders.get(idx),
        }
    }

    /// Drags one slider handle and pushes the resulting domain to its axis.
    ///
    /// Returns `true` when the axis domain changed.
    pub fn drag_slider(
        &mut self,
        axis: SliderAxis,
        handle: SliderHandle,
        delta_px: f64,
    ) -> ChartResult<bool> {
        let moved = match axis {
            SliderAxis::X => self
                .x_slider
                .as_mut()
                .and_then(|slider| slider.drag(handle, delta_px)),
            SliderAxis::Y(idx) => self
                .y_sliders
                .get_mut(idx)
                .and_then(|slider| slider.drag(handle, delta_px)),
        };
        let Some(domain) = moved else {
            return Ok(false);
        };

        match axis {
            SliderAxis::X => self.x_axis.set_domain(domain)?,
            SliderAxis::Y(idx) => {
                let Some(y_axis) = self.y_axes.get_mut(idx) else {
                    return Ok(false);
                };
                y_axis.set_domain(domain)?;
            }
        }
        Ok(true)
    }

    #[must_use]
    pub fn line_label(&self, line_key: &str) -> Option<&LineLabel> {
        self.line_labels
            .iter()
            .find(|label| label.line_key == line_key)
    }

    /// Moves the label of `line_key` within the plot area.
    ///
    /// Returns `true` when the label moved.
    pub fn drag_line_label(&mut self, line_key: &str, delta: (f64, f64)) -> ChartResult<bool> {
        let bounds = self.size;
        let Some(label) = self
            .line_labels
            .iter_mut()
            .find(|label| label.line_key == line_key)
        else {
            return Err(ChartError::InvalidData(format!(
                "panel {} has no label for line `{line_key}`",
                self.index
            )));
        };
        Ok(label.drag(delta, bounds))
    }
}

/// One full update's worth of derived state, tagged with its generation.
///
/// Built completely before it replaces the previous context, so handlers
/// never observe a partially built chart.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub generation: u64,
    pub viewport: Viewport,
    pub roles: ResolvedRoles,
    pub settings: TrellisSettings,
    pub scope: ScaleScope,
    pub trellis_by_measure: bool,
    pub layout: TrellisLayout,
    pub panels: Vec<PanelContext>,
    pub measure_dictionary: Dictionary,
    pub visual_group_dictionary: Dictionary,
    pub binding: StyleBinding,
    pub filter_target: Option<FilterTarget>,
}

impl RenderContext {
    pub fn build(
        generation: u64,
        table: &DataTable,
        settings: &TrellisSettings,
        viewport: Viewport,
    ) -> ChartResult<Self> {
        let roles = resolve_roles(table)?;
        let scope = ScaleScope::from_settings(settings);
        let trellis_by_measure = settings.trellis_by_measure && !roles.has_trellis_column();

        let grouper = if trellis_by_measure {
            DataGrouper::by_measure(MeasureReplication {
                left: roles.left_measures.iter().map(|m| m.name.clone()).collect(),
                right: roles.right_measures.iter().map(|m| m.name.clone()).collect(),
            })
        } else {
            DataGrouper::new()
        };
        let grouped = grouper.group(roles.rows.clone());

        let axis_count = |side: AxisSide| {
            let measures = roles.measures(side).len();
            if measures == 0 {
                0
            } else if trellis_by_measure || !settings.enable_multiple_y_axes {
                1
            } else {
                measures
            }
        };
        let layout = TrellisLayout::compute(LayoutRequest {
            viewport,
            panel_count: grouped.panel_count(),
            left_axis_count: axis_count(AxisSide::Left),
            right_axis_count: axis_count(AxisSide::Right),
            legend_by_trellis: settings.legend_by_trellis,
            vertical_legend: settings.vertical_legend,
            auto_layout: settings.trellis_auto_layout,
            user_columns: settings.trellis_columns,
        })?;

        let measure_dictionary = Dictionary::indexed(roles.all_measures().map(|m| m.name.as_str()));
        let visual_group_dictionary =
            Dictionary::indexed(roles.rows.iter().map(|row| row.visual_group_by.as_str()));

        let builder = PanelBuilder {
            roles: &roles,
            measure_dictionary: &measure_dictionary,
            settings,
            scope,
            trellis_by_measure,
            layout: &layout,
            grouped: &grouped,
        };
        let panels = grouped
            .panels
            .iter()
            .enumerate()
            .map(|(index, panel)| builder.build(index, panel))
            .collect::<ChartResult<Vec<_>>>()?;

        let binding = StyleBinding::new(scope.style_driver, roles.visual_group_category.clone());
        let filter_target = settings.enable_cross_filter.then(|| FilterTarget {
            table: roles.table_name.clone(),
            column: roles.line_category.clone(),
            value_kind: roles.line_value_kind,
        });

        debug!(
            generation,
            rows = roles.rows.len(),
            panels = panels.len(),
            columns = layout.columns,
            trellis_by_measure,
            "built render context"
        );

        Ok(Self {
            generation,
            viewport,
            roles,
            settings: settings.clone(),
            scope,
            trellis_by_measure,
            layout,
            panels,
            measure_dictionary,
            visual_group_dictionary,
            binding,
            filter_target,
        })
    }

    pub fn panel(&self, index: usize) -> ChartResult<&PanelContext> {
        self.panels.get(index).ok_or(ChartError::UnknownPanel(index))
    }

    pub fn panel_mut(&mut self, index: usize) -> ChartResult<&mut PanelContext> {
        self.panels.get_mut(index).ok_or(ChartError::UnknownPanel(index))
    }

    /// Panel whose plot area contains `point` (chart pixels).
    #[must_use]
    pub fn panel_at(&self, point: (f64, f64)) -> Option<usize> {
        self.panels
            .iter()
            .position(|panel| panel.contains(point))
    }
}

struct PanelBuilder<'a> {
    roles: &'a ResolvedRoles,
    measure_dictionary: &'a Dictionary,
    settings: &'a TrellisSettings,
    scope: ScaleScope,
    trellis_by_measure: bool,
    layout: &'a TrellisLayout,
    grouped: &'a GroupedData,
}

impl PanelBuilder<'_> {
    fn build(&self, index: usize, panel: &Panel) -> ChartResult<PanelContext> {
        let size = self.layout.panel_size;
        let (left_measures, right_measures) = self.panel_measures(panel);

        let x_domain = match self.scope.x {
            AxisScope::PerPanel => panel.x_extent(),
            AxisScope::Global => self.grouped.x_extent(),
        }
        .unwrap_or((0.0, 1.0));
        let x_kind = if self.roles.x_is_date {
            XValueKind::Date {
                continuous: self.settings.date_continuous,
            }
        } else {
            XValueKind::Numeric
        };
        let x_axis = XAxis::new(
            x_domain,
            size.width,
            x_kind,
            NumberLabelStyle::for_format(self.roles.x_format.as_deref()),
        )?;

        let mut y_axes = Vec::new();
        for (side, measures) in [
            (AxisSide::Left, &left_measures),
            (AxisSide::Right, &right_measures),
        ] {
            if measures.is_empty() {
                continue;
            }
            let per_measure = self.settings.enable_multiple_y_axes && !self.trellis_by_measure;
            let allocations: Vec<(usize, AxisMeasures, &MeasureInfo)> = if per_measure {
                measures
                    .iter()
                    .enumerate()
                    .map(|(stack, m)| (stack, AxisMeasures::Single(m.index), m))
                    .collect()
            } else {
                vec![(0, AxisMeasures::All, &measures[0])]
            };
            for (stack, axis_measures, label_measure) in allocations {
                let filter = axis_measures.as_filter();
                let max_value = match self.scope.y {
                    AxisScope::PerPanel => panel.max_value(side, filter),
                    AxisScope::Global => self.grouped.max_value(side, filter),
                };
                y_axes.push(YAxis::new(
                    side,
                    stack,
                    axis_measures,
                    max_value,
                    size.height,
                    NumberLabelStyle::for_format(label_measure.format.as_deref()),
                )?);
            }
        }

        let (x_slider, y_sliders) = if self.settings.show_sliders {
            let x_slider = RangeSlider::new(SliderOrientation::Horizontal, x_axis.full_scale())?;
            let y_sliders = y_axes
                .iter()
                .map(|axis| RangeSlider::new(SliderOrientation::Vertical, axis.full_scale()))
                .collect::<ChartResult<Vec<_>>>()?;
            (Some(x_slider), y_sliders)
        } else {
            (None, Vec::new())
        };
        let line_labels = if self.settings.show_line_labels {
            stacked_labels(panel.lines.keys().map(String::as_str))
        } else {
            Vec::new()
        };

        Ok(PanelContext {
            index,
            key: panel.key.clone(),
            title: self.settings.show_trellis_title.then(|| panel.key.clone()),
            origin: self.layout.panel_origin(index),
            size,
            group: panel.clone(),
            x_axis,
            y_axes,
            x_slider,
            y_sliders,
            line_labels,
            left_measures,
            right_measures,
        })
    }

    /// Measures as the panel's rows store them. Per-measure panels carry a
    /// single measure at index 0 on its own side.
    fn panel_measures(&self, panel: &Panel) -> (Vec<MeasureInfo>, Vec<MeasureInfo>) {
        if !self.trellis_by_measure {
            return (
                self.roles.left_measures.clone(),
                self.roles.right_measures.clone(),
            );
        }
        let Some(measure) = self
            .measure_dictionary
            .index_of(&panel.key)
            .and_then(|ordinal| self.roles.all_measures().nth(ordinal))
        else {
            return (Vec::new(), Vec::new());
        };
        let single = vec![MeasureInfo {
            index: 0,
            ..measure.clone()
        }];
        match measure.side {
            AxisSide::Left => (single, Vec::new()),
            AxisSide::Right => (Vec::new(), single),
        }
    }
}
