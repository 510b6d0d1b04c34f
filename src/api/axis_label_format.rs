use chrono::{DateTime, Datelike, Utc};

use crate::core::primitives::unix_seconds_to_datetime;
use crate::core::types::format_raw_number;

use super::axis_ticks::DateGranularity;

/// How numeric tick values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLabelStyle {
    /// Compact SI prefix with up to six significant digits (`1.5k`, `2M`, `500m`).
    Si,
    /// Whole percent with thousands separators (`0.25` → `25%`).
    Percent,
}

impl NumberLabelStyle {
    /// Percent when the declared measure format contains `%`.
    #[must_use]
    pub fn for_format(format: Option<&str>) -> Self {
        match format {
            Some(format) if format.contains('%') => Self::Percent,
            _ => Self::Si,
        }
    }

    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Si => format_si(value),
            Self::Percent => format_percent(value),
        }
    }
}

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "\u{b5}", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];
const SI_SIGNIFICANT_DIGITS: i32 = 6;

/// Compact SI label with insignificant trailing zeros trimmed.
#[must_use]
pub fn format_si(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    if value == 0.0 {
        return "0".to_owned();
    }

    let exponent = decimal_exponent(value.abs());
    let prefix_group = exponent.div_euclid(3).clamp(-8, 8);
    let scaled = value / 10f64.powi(prefix_group * 3);
    let digits_before_point = exponent - prefix_group * 3 + 1;
    let decimals = (SI_SIGNIFICANT_DIGITS - digits_before_point).max(0) as usize;
    let mut text = format!("{scaled:.decimals$}");
    trim_fraction_zeros(&mut text);
    let prefix = SI_PREFIXES[(prefix_group + 8) as usize];
    format!("{text}{prefix}")
}

/// Whole-percent label with comma thousands separators.
#[must_use]
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let whole = (value * 100.0).round();
    let digits = format!("{:.0}", whole.abs());
    let grouped = group_thousands(&digits);
    if whole < 0.0 {
        format!("-{grouped}%")
    } else {
        format!("{grouped}%")
    }
}

/// Decimal exponent after rounding to the significant-digit budget, so
/// `999_999.7` counts as `1e6`.
fn decimal_exponent(abs_value: f64) -> i32 {
    let precision = (SI_SIGNIFICANT_DIGITS - 1) as usize;
    let scientific = format!("{abs_value:.precision$e}");
    scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse::<i32>().ok())
        .unwrap_or_else(|| abs_value.log10().floor() as i32)
}

fn trim_fraction_zeros(text: &mut String) {
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Chooses date tick granularity from the calendar distance between bounds.
#[must_use]
pub fn date_granularity(min_seconds: f64, max_seconds: f64) -> DateGranularity {
    let (Some(min), Some(max)) = (
        unix_seconds_to_datetime(min_seconds),
        unix_seconds_to_datetime(max_seconds),
    ) else {
        return DateGranularity::Year;
    };
    let months = calendar_months_between(min, max);
    let years = (max.year() - min.year()).abs();
    if months <= 2 {
        DateGranularity::DayMonth
    } else if years <= 3 {
        DateGranularity::MonthYear
    } else {
        DateGranularity::Year
    }
}

fn calendar_months_between(min: DateTime<Utc>, max: DateTime<Utc>) -> i32 {
    let months = (max.year() - min.year()) * 12 + max.month() as i32 - min.month() as i32;
    months.abs()
}

/// Continuous date tick label at the given granularity.
#[must_use]
pub fn format_date_tick(seconds: f64, granularity: DateGranularity) -> String {
    let Some(time) = unix_seconds_to_datetime(seconds) else {
        return format_raw_number(seconds);
    };
    let pattern = match granularity {
        DateGranularity::DayMonth => "%b %-d",
        DateGranularity::MonthYear => "%b %Y",
        DateGranularity::Year => "%Y",
    };
    time.format(pattern).to_string()
}

/// Full `dd/mm/yyyy` date label used by non-continuous axes and tooltips.
#[must_use]
pub fn format_full_date(seconds: f64) -> String {
    match unix_seconds_to_datetime(seconds) {
        Some(time) => time.format("%d/%m/%Y").to_string(),
        None => format_raw_number(seconds),
    }
}
