use crate::core::types::AxisSide;
use crate::render::{AxisFrame, PanelFrame, RenderFrame, SeriesPath, SliderFrame};

use super::legend::{LegendModel, LegendNaming, measure_legend, series_legend};
use super::range_slider::SliderHandle;
use super::render_context::{PanelContext, RenderContext, SliderAxis};
use super::selection::{Emphasis, SelectionCoordinator};
use super::style_store::StyleAssignmentStore;
use super::tooltip::TooltipSnapshot;

/// Assembles the frame for the current context, allocating styles on first sight.
///
/// A `highlight` line overrides selection emphasis for the whole frame.
pub fn build_render_frame(
    context: &RenderContext,
    store: &mut StyleAssignmentStore,
    selection: &SelectionCoordinator,
    tooltip: Option<&TooltipSnapshot>,
    highlight: Option<&str>,
) -> RenderFrame {
    let naming = LegendNaming {
        line_category: &context.roles.line_category,
        visual_group_category: &context.roles.visual_group_category,
        trellis_category: context.roles.trellis_category.as_deref(),
        distinct_line_column: context.roles.line_category != context.roles.visual_group_category,
    };
    let panel_count = context.panels.len();
    let per_panel_legends = context.layout.legend_by_trellis;

    let mut legends = Vec::new();
    if !(per_panel_legends && context.trellis_by_measure) {
        legends.push(measure_legend(
            context.measure_dictionary.names(),
            &context.measure_dictionary,
            &context.binding,
            store,
        ));
    }
    if !(per_panel_legends && !context.trellis_by_measure) {
        legends.push(series_legend(
            &context.roles.rows,
            &context.visual_group_dictionary,
            naming,
            panel_count,
            &context.binding,
            store,
        ));
    }

    let panels = context
        .panels
        .iter()
        .map(|panel| {
            let legend: Option<LegendModel> = if !per_panel_legends {
                None
            } else if context.trellis_by_measure {
                Some(measure_legend(
                    [panel.key.as_str()],
                    &context.measure_dictionary,
                    &context.binding,
                    store,
                ))
            } else {
                Some(series_legend(
                    panel.group.rows(),
                    &context.visual_group_dictionary,
                    naming,
                    panel_count,
                    &context.binding,
                    store,
                ))
            };
            panel_frame(context, panel, store, selection, highlight, legend)
        })
        .collect();

    RenderFrame {
        generation: context.generation,
        viewport: context.viewport,
        layout: context.layout,
        legends,
        panels,
        tooltip: tooltip
            .filter(|snapshot| snapshot.generation == context.generation)
            .cloned(),
    }
}

fn panel_frame(
    context: &RenderContext,
    panel: &PanelContext,
    store: &mut StyleAssignmentStore,
    selection: &SelectionCoordinator,
    highlight: Option<&str>,
    legend: Option<LegendModel>,
) -> PanelFrame {
    let x_scale = panel.x_axis.scale();
    let mut series = Vec::new();
    for line in panel.group.lines.values() {
        let emphasis = match highlight {
            Some(key) if key == line.key => Emphasis::Highlighted,
            Some(_) => Emphasis::Dimmed,
            None => selection.emphasis(&line.key),
        };
        for side in [AxisSide::Left, AxisSide::Right] {
            for measure in panel.measures(side) {
                let Some(axis) = panel.axis_for(side, measure.index) else {
                    continue;
                };
                let y_scale = axis.scale();
                let points: Vec<(f64, f64)> = line
                    .measure_points(side, measure.index)
                    .into_iter()
                    .map(|(x, y)| (x_scale.map(x), y_scale.map(y)))
                    .collect();
                if points.is_empty() {
                    continue;
                }
                let style = context
                    .binding
                    .resolve(store, line.visual_group(), &measure.name);
                series.push(SeriesPath {
                    line_key: line.key.clone(),
                    visual_group: line.visual_group().to_owned(),
                    measure: measure.name.clone(),
                    side,
                    colour: style.colour,
                    line_style: style.line_style,
                    emphasis,
                    opacity: emphasis.opacity(),
                    stroke_width: emphasis.stroke_width(),
                    points,
                });
            }
        }
    }

    let x_axis = AxisFrame {
        side: None,
        position: panel.size.height,
        ticks: panel.x_axis.ticks(),
    };
    let y_axes = panel
        .y_axes
        .iter()
        .map(|axis| AxisFrame {
            side: Some(axis.side()),
            position: axis.x_position(panel.size.width),
            ticks: axis.ticks(),
        })
        .collect();

    let slider_axes = panel
        .x_slider
        .iter()
        .map(|_| SliderAxis::X)
        .chain((0..panel.y_sliders.len()).map(SliderAxis::Y));
    let sliders = slider_axes
        .filter_map(|axis| {
            panel.slider(axis).map(|slider| SliderFrame {
                axis,
                min_handle_px: slider.handle_px(SliderHandle::Min),
                max_handle_px: slider.handle_px(SliderHandle::Max),
                bounds: slider.pixel_bounds(),
            })
        })
        .collect();

    PanelFrame {
        index: panel.index,
        key: panel.key.clone(),
        title: panel.title.clone(),
        origin: panel.origin,
        size: panel.size,
        x_axis,
        y_axes,
        series,
        sliders,
        line_labels: panel.line_labels.clone(),
        legend,
    }
}
