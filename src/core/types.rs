use std::fmt;

use serde::{Deserialize, Serialize};

/// Pixel extent of the whole chart or of one panel's plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Which vertical edge of a panel an axis (and its measures) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSide {
    Left,
    Right,
}

/// A raw categorical cell as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => f.write_str(&format_raw_number(*value)),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Extra value shown in the tooltip for a row.
pub type TooltipValue = CellValue;

/// One chart sample after role resolution.
///
/// Rows are built once per full update and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub x_value: f64,
    pub y_values_left: Vec<Option<f64>>,
    pub y_values_right: Vec<Option<f64>>,
    pub line_by: String,
    pub visual_group_by: String,
    pub trellis_by: String,
    pub tooltip_data: Vec<TooltipValue>,
}

impl Row {
    #[must_use]
    pub fn values(&self, side: AxisSide) -> &[Option<f64>] {
        match side {
            AxisSide::Left => &self.y_values_left,
            AxisSide::Right => &self.y_values_right,
        }
    }

    /// Largest finite value on `side`, optionally restricted to one measure index.
    #[must_use]
    pub fn max_value(&self, side: AxisSide, measure: Option<usize>) -> Option<f64> {
        let values = self.values(side);
        let candidates: Box<dyn Iterator<Item = &Option<f64>>> = match measure {
            Some(idx) => Box::new(values.get(idx).into_iter()),
            None => Box::new(values.iter()),
        };
        candidates
            .filter_map(|value| *value)
            .filter(|value| value.is_finite())
            .reduce(f64::max)
    }
}

/// Formats a number the way a plain numeric label should read:
/// integral values without a fractional part, everything else in shortest form.
#[must_use]
pub fn format_raw_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
