use serde::{Deserialize, Serialize};

/// Horizontal pixels reserved per X tick.
pub const X_TICK_SPACING_PX: f64 = 70.0;
/// Vertical pixels reserved per Y tick.
pub const Y_TICK_SPACING_PX: f64 = 85.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// One labelled tick, positioned in panel pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub pixel: f64,
    pub label: String,
}

/// Tick count from available pixels: `ceil(span / spacing)`, at least one.
#[must_use]
pub fn axis_tick_count(axis_span_px: f64, spacing_px: f64) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return 1;
    }
    if !spacing_px.is_finite() || spacing_px <= 0.0 {
        return 1;
    }
    ((axis_span_px / spacing_px).ceil() as usize).max(1)
}

/// Calendar granularity for continuous date axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateGranularity {
    DayMonth,
    MonthYear,
    Year,
}

impl DateGranularity {
    /// Length of one granularity step in seconds.
    #[must_use]
    pub fn step_seconds(self) -> f64 {
        match self {
            Self::DayMonth => SECONDS_PER_DAY,
            Self::MonthYear => SECONDS_PER_DAY * 30.0,
            Self::Year => SECONDS_PER_DAY * 365.0,
        }
    }

    /// Number of granularity steps within `span_seconds`, at least one.
    #[must_use]
    pub fn points_in(self, span_seconds: f64) -> usize {
        if !span_seconds.is_finite() || span_seconds <= 0.0 {
            return 1;
        }
        ((span_seconds / self.step_seconds()).floor() as usize).max(1)
    }
}

/// Date tick count: granularity points capped by the pixel-based count.
#[must_use]
pub fn date_tick_count(granularity: DateGranularity, span_seconds: f64, width_px: f64) -> usize {
    granularity
        .points_in(span_seconds)
        .min(axis_tick_count(width_px, X_TICK_SPACING_PX))
}

/// Round tick values covering `[start, stop]`, roughly `count` of them.
///
/// Steps follow the 1-2-5 progression. Values are built from integer
/// multiples of the step so labels do not accumulate float drift.
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let (lo, hi, reversed) = if stop < start {
        (stop, start, true)
    } else {
        (start, stop, false)
    };

    let increment = tick_increment(lo, hi, count);
    if increment == 0.0 || !increment.is_finite() {
        return Vec::new();
    }

    let mut ticks: Vec<f64> = if increment > 0.0 {
        let first = (lo / increment).ceil() as i64;
        let last = (hi / increment).floor() as i64;
        (first..=last).map(|i| i as f64 * increment).collect()
    } else {
        let inverse = -increment;
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    };

    if reversed {
        ticks.reverse();
    }
    ticks
}

/// Step between nice ticks. Negative results encode `1 / |step|` for
/// sub-unit steps, which keeps decimal ticks exact.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

#[cfg(test)]
mod tests {
    use super::{DateGranularity, axis_tick_count, date_tick_count, nice_ticks};

    #[test]
    fn tick_count_rounds_up_partial_slots() {
        assert_eq!(axis_tick_count(700.0, 70.0), 10);
        assert_eq!(axis_tick_count(701.0, 70.0), 11);
        assert_eq!(axis_tick_count(0.0, 70.0), 1);
    }

    #[test]
    fn nice_ticks_use_one_two_five_steps() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(0.0, 1.0, 4), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn date_tick_count_is_capped_by_width() {
        let ninety_days = 90.0 * 86_400.0;
        assert_eq!(date_tick_count(DateGranularity::DayMonth, ninety_days, 350.0), 5);
        assert_eq!(date_tick_count(DateGranularity::Year, ninety_days, 350.0), 1);
    }
}
