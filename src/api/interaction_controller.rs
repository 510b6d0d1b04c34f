use tracing::{debug, trace, warn};

use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragState, InteractionMode, LabelDragState};
use crate::render::Renderer;

use super::engine::TrellisEngine;
use super::range_slider::SliderHandle;
use super::render_context::SliderAxis;
use super::selection::ToggleOutcome;
use super::style_store::StyleKind;
use super::tooltip::{TooltipEngine, TooltipSnapshot};

impl<R: Renderer> TrellisEngine<R> {
    fn tooltip_snapshot(
        &self,
        panel: usize,
        pointer: (f64, f64),
    ) -> ChartResult<Option<TooltipSnapshot>> {
        let context = self.require_context()?;
        let panel_context = context.panel(panel)?;
        let engine = TooltipEngine::new(self.config.tooltip_metrics, context.trellis_by_measure);
        Ok(engine.snapshot(
            context.generation,
            panel_context,
            pointer,
            &context.roles.tooltip_fields,
        ))
    }

    fn require_idle_pointer(&self) -> ChartResult<()> {
        match self.interaction.mode() {
            InteractionMode::Idle => Ok(()),
            mode => Err(ChartError::InvalidData(format!(
                "cannot start a drag while {mode:?}"
            ))),
        }
    }

    fn tooltips_enabled(&self) -> bool {
        self.context
            .as_ref()
            .is_some_and(|context| context.settings.enable_tooltips)
    }

    /// Pointer entered `panel` at `pointer` (chart pixels): the tooltip becomes active.
    pub fn pointer_enter(
        &mut self,
        panel: usize,
        pointer: (f64, f64),
    ) -> ChartResult<Option<TooltipSnapshot>> {
        if !self.tooltips_enabled() {
            return Ok(None);
        }
        let snapshot = self.tooltip_snapshot(panel, pointer)?;
        trace!(panel, x = pointer.0, y = pointer.1, "pointer enter");
        self.interaction.activate_tooltip(panel, snapshot.clone());
        self.render()?;
        Ok(snapshot)
    }

    /// Pointer moved inside `panel`. Ignored while the tooltip is idle.
    pub fn pointer_move(
        &mut self,
        panel: usize,
        pointer: (f64, f64),
    ) -> ChartResult<Option<TooltipSnapshot>> {
        if !self.tooltips_enabled() || self.interaction.active_panel().is_none() {
            return Ok(None);
        }
        let snapshot = self.tooltip_snapshot(panel, pointer)?;
        self.interaction.activate_tooltip(panel, snapshot.clone());
        self.render()?;
        Ok(snapshot)
    }

    pub fn pointer_leave(&mut self) -> ChartResult<()> {
        if self.interaction.active_panel().is_none() {
            return Ok(());
        }
        trace!("pointer leave");
        self.interaction.clear_tooltip();
        self.render()
    }

    /// Click while the tooltip is active toggles selection of the nearest line.
    pub fn pointer_click(
        &mut self,
        panel: usize,
        pointer: (f64, f64),
    ) -> ChartResult<Option<ToggleOutcome>> {
        if self.interaction.active_panel().is_none() {
            return Ok(None);
        }
        let Some(snapshot) = self.tooltip_snapshot(panel, pointer)? else {
            return Ok(None);
        };
        let key = snapshot.line.key.clone();
        self.interaction.activate_tooltip(panel, Some(snapshot));
        self.toggle_selection(&key).map(Some)
    }

    /// Toggles `key` in the selection set, notifies the host filter when
    /// cross-filtering is on, and redraws with the new emphasis.
    pub fn toggle_selection(&mut self, key: &str) -> ChartResult<ToggleOutcome> {
        self.require_context()?;
        let outcome = self.selection.toggle(key);
        if let (Some(request), Some(host_filter)) =
            (outcome.request.clone(), self.host_filter.as_mut())
        {
            match host_filter.apply(request) {
                Ok(()) => self.awaiting_filter_echo = true,
                Err(err) => warn!(error = %err, "host filter request failed"),
            }
        }
        self.render()?;
        Ok(outcome)
    }

    pub fn begin_slider_drag(
        &mut self,
        panel: usize,
        axis: SliderAxis,
        handle: SliderHandle,
    ) -> ChartResult<()> {
        self.require_idle_pointer()?;
        let context = self.require_context()?;
        let generation = context.generation;
        if context.panel(panel)?.slider(axis).is_none() {
            return Err(ChartError::InvalidData(format!(
                "panel {panel} has no {axis:?} slider"
            )));
        }
        debug!(generation, panel, ?axis, ?handle, "begin slider drag");
        self.interaction.begin_drag(DragState {
            generation,
            panel,
            axis,
            handle,
        });
        Ok(())
    }

    /// Applies one drag delta. Returns `true` when the axis domain changed.
    ///
    /// A drag started against a replaced generation is dropped.
    pub fn drag_slider_by(&mut self, delta_px: f64) -> ChartResult<bool> {
        let Some(drag) = self.interaction.drag() else {
            return Ok(false);
        };
        let Some(context) = self.context.as_mut() else {
            self.interaction.end_drag();
            return Ok(false);
        };
        if context.generation != drag.generation {
            debug!(
                drag_generation = drag.generation,
                generation = context.generation,
                "dropping stale slider drag"
            );
            self.interaction.end_drag();
            return Ok(false);
        }

        let changed = context
            .panel_mut(drag.panel)?
            .drag_slider(drag.axis, drag.handle, delta_px)?;
        if changed {
            if self.interaction.active_panel() == Some(drag.panel) {
                self.interaction.activate_tooltip(drag.panel, None);
            }
            self.render()?;
        }
        Ok(changed)
    }

    pub fn end_slider_drag(&mut self) -> Option<DragState> {
        let drag = self.interaction.end_drag();
        if let Some(drag) = drag {
            debug!(panel = drag.panel, axis = ?drag.axis, "end slider drag");
        }
        drag
    }

    /// Grabs the label of `line_key` in `panel`; the line is highlighted
    /// until the drag ends.
    pub fn begin_label_drag(&mut self, panel: usize, line_key: &str) -> ChartResult<()> {
        self.require_idle_pointer()?;
        let context = self.require_context()?;
        let generation = context.generation;
        if context.panel(panel)?.line_label(line_key).is_none() {
            return Err(ChartError::InvalidData(format!(
                "panel {panel} has no label for line `{line_key}`"
            )));
        }
        debug!(generation, panel, line = line_key, "begin label drag");
        self.interaction.begin_label_drag(LabelDragState {
            generation,
            panel,
            line_key: line_key.to_owned(),
        });
        self.render()
    }

    /// Moves the grabbed label. Returns `true` when it moved.
    pub fn drag_label_by(&mut self, delta: (f64, f64)) -> ChartResult<bool> {
        let Some(drag) = self.interaction.label_drag().cloned() else {
            return Ok(false);
        };
        let Some(context) = self.context.as_mut() else {
            self.interaction.end_label_drag();
            return Ok(false);
        };
        if context.generation != drag.generation {
            debug!(
                drag_generation = drag.generation,
                generation = context.generation,
                "dropping stale label drag"
            );
            self.interaction.end_label_drag();
            return Ok(false);
        }

        let moved = context
            .panel_mut(drag.panel)?
            .drag_line_label(&drag.line_key, delta)?;
        if moved {
            self.render()?;
        }
        Ok(moved)
    }

    /// Releases the label and restores selection emphasis.
    pub fn end_label_drag(&mut self) -> ChartResult<Option<LabelDragState>> {
        let drag = self.interaction.end_label_drag();
        if let Some(drag) = &drag {
            debug!(panel = drag.panel, line = %drag.line_key, "end label drag");
            if self.context.is_some() {
                self.render()?;
            }
        }
        Ok(drag)
    }

    /// Advances a legend entry's style to the next pool member and redraws.
    pub fn increment_style(
        &mut self,
        kind: StyleKind,
        name: &str,
        category: &str,
    ) -> ChartResult<String> {
        let value = self.store.increment(kind, name, category)?;
        if self.context.is_some() {
            self.render()?;
        }
        Ok(value)
    }

    /// Clears every assignment of `kind` and redraws with fresh allocations.
    pub fn reset_styles(&mut self, kind: StyleKind) -> ChartResult<()> {
        self.store.reset(kind);
        if self.context.is_some() {
            self.render()?;
        }
        Ok(())
    }
}
