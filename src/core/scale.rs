use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Clamped linear mapping between a data domain and a pixel range.
///
/// The domain is always stored ordered (`min <= max`). The range keeps the
/// caller's orientation, so Y scales are built with `(height, 0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    domain_min: f64,
    domain_max: f64,
    range_start: f64,
    range_end: f64,
    clamp: bool,
}

impl AxisScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_min, domain_max) = normalize_domain(domain)?;
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_min,
            domain_max,
            range_start: range.0,
            range_end: range.1,
            clamp: true,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_clamped(self) -> bool {
        self.clamp
    }

    /// Replaces the domain, keeping range and clamping.
    pub fn set_domain(&mut self, domain: (f64, f64)) -> ChartResult<()> {
        let (min, max) = normalize_domain(domain)?;
        self.domain_min = min;
        self.domain_max = max;
        Ok(())
    }

    /// Maps a domain value to a pixel. Out-of-domain values land on the boundary pixel.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let span = self.domain_max - self.domain_min;
        if span == 0.0 {
            return (self.range_start + self.range_end) / 2.0;
        }

        let mut normalized = (value - self.domain_min) / span;
        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    /// Maps a pixel back to the domain, clamped to the domain bounds.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let extent = self.range_end - self.range_start;
        if extent == 0.0 {
            return (self.domain_min + self.domain_max) / 2.0;
        }

        let mut normalized = (pixel - self.range_start) / extent;
        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }
        self.domain_min + normalized * (self.domain_max - self.domain_min)
    }

    /// Builds the pixel→value scale used by range sliders: the domain and
    /// range are swapped, so handle pixels convert straight into data values.
    pub fn inverse_scale(self) -> ChartResult<Self> {
        let mut pixel_domain = Self::new((self.range_start, self.range_end), (0.0, 0.0))?;
        // normalize_domain has ordered the pixels; keep values oriented with them.
        let start_value = self.invert(pixel_domain.domain_min);
        let end_value = self.invert(pixel_domain.domain_max);
        pixel_domain.range_start = start_value;
        pixel_domain.range_end = end_value;
        Ok(pixel_domain)
    }
}

fn normalize_domain(domain: (f64, f64)) -> ChartResult<(f64, f64)> {
    let (start, end) = domain;
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "scale domain must be finite".to_owned(),
        ));
    }
    Ok((start.min(end), start.max(end)))
}
