use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::scale::AxisScale;
use crate::core::types::format_raw_number;
use crate::error::ChartResult;

use super::axis_label_format::{
    NumberLabelStyle, date_granularity, format_date_tick, format_full_date,
};
use super::axis_ticks::{
    AxisTick, DateGranularity, X_TICK_SPACING_PX, axis_tick_count, date_tick_count, nice_ticks,
};

/// What the x values represent and how they are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XValueKind {
    Numeric,
    /// Epoch seconds. `continuous` selects granularity-aware labels.
    Date { continuous: bool },
}

/// Horizontal axis of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct XAxis {
    scale: AxisScale,
    full_scale: AxisScale,
    kind: XValueKind,
    label_style: NumberLabelStyle,
    width: f64,
    granularity: Option<DateGranularity>,
    tick_count: usize,
}

impl XAxis {
    /// Builds the axis over `domain`, mapped onto `[0, width]`.
    pub fn new(
        domain: (f64, f64),
        width: f64,
        kind: XValueKind,
        label_style: NumberLabelStyle,
    ) -> ChartResult<Self> {
        let scale = AxisScale::new(domain, (0.0, width))?;
        let mut axis = Self {
            scale,
            full_scale: scale,
            kind,
            label_style,
            width,
            granularity: None,
            tick_count: 1,
        };
        axis.refresh_ticks();
        Ok(axis)
    }

    #[must_use]
    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    /// Scale over the untouched data domain, used to seed range sliders.
    #[must_use]
    pub fn full_scale(&self) -> AxisScale {
        self.full_scale
    }

    #[must_use]
    pub fn kind(&self) -> XValueKind {
        self.kind
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    #[must_use]
    pub fn granularity(&self) -> Option<DateGranularity> {
        self.granularity
    }

    /// Narrows the visible domain and recomputes granularity and tick count.
    pub fn set_domain(&mut self, domain: (f64, f64)) -> ChartResult<()> {
        self.scale.set_domain(domain)?;
        self.refresh_ticks();
        trace!(
            min = self.scale.domain().0,
            max = self.scale.domain().1,
            tick_count = self.tick_count,
            "x axis domain updated"
        );
        Ok(())
    }

    fn refresh_ticks(&mut self) {
        let (min, max) = self.scale.domain();
        match self.kind {
            XValueKind::Date { continuous: true } => {
                let granularity = date_granularity(min, max);
                self.granularity = Some(granularity);
                self.tick_count = date_tick_count(granularity, max - min, self.width);
            }
            _ => {
                self.granularity = None;
                self.tick_count = axis_tick_count(self.width, X_TICK_SPACING_PX);
            }
        }
    }

    #[must_use]
    pub fn format_tick(&self, value: f64) -> String {
        match (self.kind, self.granularity) {
            (XValueKind::Date { continuous: true }, Some(granularity)) => {
                format_date_tick(value, granularity)
            }
            (XValueKind::Date { .. }, _) => format_full_date(value),
            (XValueKind::Numeric, _) => self.label_style.format(value),
        }
    }

    /// X label shown in the tooltip header.
    #[must_use]
    pub fn tooltip_label(&self, value: f64) -> String {
        match self.kind {
            XValueKind::Date { .. } => format_full_date(value),
            XValueKind::Numeric => format_raw_number(value),
        }
    }

    #[must_use]
    pub fn ticks(&self) -> Vec<AxisTick> {
        let (min, max) = self.scale.domain();
        nice_ticks(min, max, self.tick_count)
            .into_iter()
            .map(|value| AxisTick {
                value,
                pixel: self.scale.map(value),
                label: self.format_tick(value),
            })
            .collect()
    }
}
