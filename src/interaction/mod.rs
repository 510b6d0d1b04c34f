use serde::{Deserialize, Serialize};

use crate::api::{SliderAxis, SliderHandle, TooltipSnapshot};

/// Tooltip lifecycle: Idle → Active on pointer-enter, Active while moving,
/// back to Idle on pointer-leave.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipPhase {
    #[default]
    Idle,
    Active {
        panel: usize,
        snapshot: Option<TooltipSnapshot>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    DraggingSlider,
    DraggingLabel,
}

/// An in-flight slider drag, pinned to the generation it started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragState {
    pub generation: u64,
    pub panel: usize,
    pub axis: SliderAxis,
    pub handle: SliderHandle,
}

/// An in-flight line-label drag. The dragged line stays highlighted until it ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelDragState {
    pub generation: u64,
    pub panel: usize,
    pub line_key: String,
}

/// Pointer and drag state. Holds only generation numbers, never context borrows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    tooltip: TooltipPhase,
    drag: Option<DragState>,
    label_drag: Option<LabelDragState>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        if self.drag.is_some() {
            InteractionMode::DraggingSlider
        } else if self.label_drag.is_some() {
            InteractionMode::DraggingLabel
        } else {
            InteractionMode::Idle
        }
    }

    #[must_use]
    pub fn tooltip_phase(&self) -> &TooltipPhase {
        &self.tooltip
    }

    /// Current snapshot, provided it belongs to `generation`.
    #[must_use]
    pub fn tooltip(&self, generation: u64) -> Option<&TooltipSnapshot> {
        match &self.tooltip {
            TooltipPhase::Active {
                snapshot: Some(snapshot),
                ..
            } if snapshot.generation == generation => Some(snapshot),
            _ => None,
        }
    }

    #[must_use]
    pub fn active_panel(&self) -> Option<usize> {
        match self.tooltip {
            TooltipPhase::Active { panel, .. } => Some(panel),
            TooltipPhase::Idle => None,
        }
    }

    pub fn activate_tooltip(&mut self, panel: usize, snapshot: Option<TooltipSnapshot>) {
        self.tooltip = TooltipPhase::Active { panel, snapshot };
    }

    pub fn clear_tooltip(&mut self) {
        self.tooltip = TooltipPhase::Idle;
    }

    #[must_use]
    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    pub fn begin_drag(&mut self, drag: DragState) {
        self.drag = Some(drag);
    }

    pub fn end_drag(&mut self) -> Option<DragState> {
        self.drag.take()
    }

    #[must_use]
    pub fn label_drag(&self) -> Option<&LabelDragState> {
        self.label_drag.as_ref()
    }

    pub fn begin_label_drag(&mut self, drag: LabelDragState) {
        self.label_drag = Some(drag);
    }

    pub fn end_label_drag(&mut self) -> Option<LabelDragState> {
        self.label_drag.take()
    }

    /// Line held highlighted by a label drag started in `generation`.
    #[must_use]
    pub fn highlighted_line(&self, generation: u64) -> Option<&str> {
        self.label_drag
            .as_ref()
            .filter(|drag| drag.generation == generation)
            .map(|drag| drag.line_key.as_str())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
