use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::types::Viewport;

use super::range_slider::clip_delta;

/// Baseline of the first label, measured from the panel's top edge.
pub const LINE_LABEL_TOP_PX: f64 = 10.0;
/// Vertical distance between stacked labels.
pub const LINE_LABEL_STEP_PX: f64 = 15.0;
/// Estimated glyph width used to size label text.
pub const LINE_LABEL_CHAR_WIDTH_PX: f64 = 7.0;

/// Movable text label naming one line of a panel.
///
/// `position` is the text anchor (left edge, baseline) relative to the
/// panel's plot origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineLabel {
    pub line_key: String,
    pub position: (f64, f64),
    pub width: f64,
}

impl LineLabel {
    /// Label for the `index`-th line, stacked down the panel's left edge.
    #[must_use]
    pub fn stacked(line_key: impl Into<String>, index: usize) -> Self {
        let line_key = line_key.into();
        let width = line_key.chars().count() as f64 * LINE_LABEL_CHAR_WIDTH_PX;
        Self {
            position: (0.0, LINE_LABEL_TOP_PX + index as f64 * LINE_LABEL_STEP_PX),
            width,
            line_key,
        }
    }

    /// Moves the label by `delta`, clipped so the text stays inside `bounds`.
    ///
    /// Returns `true` when the label moved.
    pub fn drag(&mut self, delta: (f64, f64), bounds: Viewport) -> bool {
        let (x, y) = self.position;
        let dx = clip_delta(delta.0, x, 0.0, bounds.width - self.width);
        let dy = clip_delta(delta.1, y, 0.0, bounds.height);
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        self.position = (x + dx, y + dy);
        trace!(
            line = %self.line_key,
            x = self.position.0,
            y = self.position.1,
            "line label moved"
        );
        true
    }
}

/// One stacked label per line key, in the order given.
pub fn stacked_labels<'a>(line_keys: impl IntoIterator<Item = &'a str>) -> Vec<LineLabel> {
    line_keys
        .into_iter()
        .enumerate()
        .map(|(index, key)| LineLabel::stacked(key, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{LineLabel, stacked_labels};
    use crate::core::types::Viewport;

    #[test]
    fn labels_stack_from_the_top_left() {
        let labels = stacked_labels(["north", "south", "east"]);

        let positions: Vec<(f64, f64)> = labels.iter().map(|l| l.position).collect();
        assert_eq!(positions, vec![(0.0, 10.0), (0.0, 25.0), (0.0, 40.0)]);
        assert_eq!(labels[1].width, 35.0);
    }

    #[test]
    fn drag_stops_at_every_edge() {
        let bounds = Viewport::new(200.0, 100.0);
        let mut label = LineLabel::stacked("abc", 0);

        assert!(!label.drag((-5.0, 0.0), bounds));
        assert!(label.drag((500.0, 500.0), bounds));
        assert_eq!(label.position, (200.0 - 21.0, 100.0));

        assert!(label.drag((-30.0, 0.0), bounds));
        assert_eq!(label.position, (149.0, 100.0));
    }
}
