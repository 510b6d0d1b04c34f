use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::scale::AxisScale;
use crate::error::ChartResult;

/// Minimum pixel gap kept between the two handles.
pub const HANDLE_MIN_SEPARATION_PX: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SliderOrientation {
    /// Drives the X axis. Pixels grow with values.
    Horizontal,
    /// Drives a Y axis. Pixels grow downward while values grow upward.
    Vertical,
}

/// Handle identified by the domain bound it controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SliderHandle {
    /// Left handle of a horizontal slider, bottom handle of a vertical one.
    Min,
    /// Right handle of a horizontal slider, top handle of a vertical one.
    Max,
}

/// Clips a requested handle delta so the handle stays within `[lower, upper]`.
///
/// A delta whose direction already points out of bounds yields `0.0`.
#[must_use]
pub fn clip_delta(delta: f64, position: f64, lower: f64, upper: f64) -> f64 {
    if !delta.is_finite() {
        return 0.0;
    }
    if delta < 0.0 {
        delta.max(lower - position).min(0.0)
    } else {
        delta.min(upper - position).max(0.0)
    }
}

/// Two-handle range slider over one axis.
///
/// Handle pixels convert into domain values through a scale built once from
/// the axis' full-range scale. Updates flow one way: handle → domain.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSlider {
    orientation: SliderOrientation,
    pixel_to_value: AxisScale,
    pixel_bounds: (f64, f64),
    min_handle_px: f64,
    max_handle_px: f64,
}

impl RangeSlider {
    pub fn new(orientation: SliderOrientation, full_scale: AxisScale) -> ChartResult<Self> {
        let pixel_to_value = full_scale.inverse_scale()?;
        let pixel_bounds = pixel_to_value.domain();
        let (min_handle_px, max_handle_px) = match orientation {
            SliderOrientation::Horizontal => (pixel_bounds.0, pixel_bounds.1),
            SliderOrientation::Vertical => (pixel_bounds.1, pixel_bounds.0),
        };
        Ok(Self {
            orientation,
            pixel_to_value,
            pixel_bounds,
            min_handle_px,
            max_handle_px,
        })
    }

    #[must_use]
    pub fn orientation(&self) -> SliderOrientation {
        self.orientation
    }

    #[must_use]
    pub fn pixel_bounds(&self) -> (f64, f64) {
        self.pixel_bounds
    }

    #[must_use]
    pub fn handle_px(&self, handle: SliderHandle) -> f64 {
        match handle {
            SliderHandle::Min => self.min_handle_px,
            SliderHandle::Max => self.max_handle_px,
        }
    }

    /// Pixel interval `handle` may occupy given its partner's position.
    #[must_use]
    pub fn legal_bounds(&self, handle: SliderHandle) -> (f64, f64) {
        let (lo, hi) = self.pixel_bounds;
        match (self.orientation, handle) {
            (SliderOrientation::Horizontal, SliderHandle::Min) => {
                (lo, self.max_handle_px - HANDLE_MIN_SEPARATION_PX)
            }
            (SliderOrientation::Horizontal, SliderHandle::Max) => {
                (self.min_handle_px + HANDLE_MIN_SEPARATION_PX, hi)
            }
            (SliderOrientation::Vertical, SliderHandle::Max) => {
                (lo, self.min_handle_px - HANDLE_MIN_SEPARATION_PX)
            }
            (SliderOrientation::Vertical, SliderHandle::Min) => {
                (self.max_handle_px + HANDLE_MIN_SEPARATION_PX, hi)
            }
        }
    }

    /// Moves `handle` by the legal part of `delta_px`.
    ///
    /// Returns the new `[min, max]` domain when the handle moved.
    pub fn drag(&mut self, handle: SliderHandle, delta_px: f64) -> Option<(f64, f64)> {
        let position = self.handle_px(handle);
        let (lower, upper) = self.legal_bounds(handle);
        let applied = clip_delta(delta_px, position, lower, upper);
        trace!(
            ?handle,
            requested = delta_px,
            applied,
            "range slider drag"
        );
        if applied == 0.0 {
            return None;
        }

        match handle {
            SliderHandle::Min => self.min_handle_px = position + applied,
            SliderHandle::Max => self.max_handle_px = position + applied,
        }
        Some(self.domain())
    }

    /// Domain selected by the current handle positions.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (
            self.pixel_to_value.map(self.min_handle_px),
            self.pixel_to_value.map(self.max_handle_px),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeSlider, SliderHandle, SliderOrientation, clip_delta};
    use crate::core::AxisScale;

    #[test]
    fn clip_delta_zeroes_moves_that_start_out_of_bounds() {
        assert_eq!(clip_delta(5.0, 20.0, 0.0, 10.0), 0.0);
        assert_eq!(clip_delta(-5.0, 3.0, 0.0, 10.0), -3.0);
        assert_eq!(clip_delta(4.0, 3.0, 0.0, 10.0), 4.0);
    }

    #[test]
    fn vertical_slider_keeps_bottom_handle_as_domain_min() {
        let scale = AxisScale::new((0.0, 100.0), (200.0, 0.0)).expect("scale");
        let mut slider = RangeSlider::new(SliderOrientation::Vertical, scale).expect("slider");

        let domain = slider.drag(SliderHandle::Min, -50.0).expect("moved");
        assert!((domain.0 - 25.0).abs() <= 1e-9);
        assert!((domain.1 - 100.0).abs() <= 1e-9);
    }
}
