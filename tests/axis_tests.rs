use chrono::{TimeZone, Utc};
use trellis_chart::api::{
    AxisMeasures, DateGranularity, NumberLabelStyle, XAxis, XValueKind, YAxis, date_granularity,
    format_date_tick, format_full_date, format_percent, format_si,
};
use trellis_chart::core::AxisSide;
use trellis_chart::core::primitives::datetime_to_unix_seconds;

fn seconds(year: i32, month: u32, day: u32) -> f64 {
    let time = Utc
        .with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid date");
    datetime_to_unix_seconds(time)
}

#[test]
fn granularity_follows_calendar_distance() {
    assert_eq!(
        date_granularity(seconds(2023, 1, 5), seconds(2023, 3, 20)),
        DateGranularity::DayMonth
    );
    assert_eq!(
        date_granularity(seconds(2023, 11, 1), seconds(2024, 1, 10)),
        DateGranularity::DayMonth
    );
    assert_eq!(
        date_granularity(seconds(2021, 1, 1), seconds(2023, 6, 1)),
        DateGranularity::MonthYear
    );
    assert_eq!(
        date_granularity(seconds(2015, 1, 1), seconds(2023, 6, 1)),
        DateGranularity::Year
    );
}

#[test]
fn date_labels_match_granularity() {
    let time = seconds(2024, 3, 7);
    assert_eq!(format_date_tick(time, DateGranularity::DayMonth), "Mar 7");
    assert_eq!(format_date_tick(time, DateGranularity::MonthYear), "Mar 2024");
    assert_eq!(format_date_tick(time, DateGranularity::Year), "2024");
    assert_eq!(format_full_date(time), "07/03/2024");
}

#[test]
fn number_labels_follow_declared_format() {
    assert_eq!(NumberLabelStyle::for_format(Some("0.00%")), NumberLabelStyle::Percent);
    assert_eq!(NumberLabelStyle::for_format(Some("#,0")), NumberLabelStyle::Si);
    assert_eq!(NumberLabelStyle::for_format(None), NumberLabelStyle::Si);

    assert_eq!(format_si(0.0), "0");
    assert_eq!(format_si(-2500.0), "-2.5k");
    assert_eq!(format_si(0.000_002), "2\u{b5}");
    assert_eq!(format_percent(0.5), "50%");
}

#[test]
fn discrete_date_axis_uses_full_dates() {
    let start = seconds(2024, 1, 1);
    let end = seconds(2024, 1, 31);
    let axis = XAxis::new(
        (start, end),
        700.0,
        XValueKind::Date { continuous: false },
        NumberLabelStyle::Si,
    )
    .expect("axis");

    assert_eq!(axis.granularity(), None);
    assert_eq!(axis.tick_count(), 10);
    assert_eq!(axis.format_tick(start), "01/01/2024");
    assert_eq!(axis.tooltip_label(end), "31/01/2024");
}

#[test]
fn continuous_date_ticks_are_capped_by_granularity_points() {
    let start = seconds(2024, 1, 1);
    let end = seconds(2024, 1, 4);
    let axis = XAxis::new(
        (start, end),
        1_400.0,
        XValueKind::Date { continuous: true },
        NumberLabelStyle::Si,
    )
    .expect("axis");

    assert_eq!(axis.granularity(), Some(DateGranularity::DayMonth));
    assert_eq!(axis.tick_count(), 3);
}

#[test]
fn narrowing_x_domain_keeps_full_scale() {
    let mut axis =
        XAxis::new((0.0, 100.0), 500.0, XValueKind::Numeric, NumberLabelStyle::Si).expect("axis");

    axis.set_domain((20.0, 40.0)).expect("narrow");

    assert_eq!(axis.scale().domain(), (20.0, 40.0));
    assert_eq!(axis.full_scale().domain(), (0.0, 100.0));
    assert!(axis.ticks().iter().all(|tick| (20.0..=40.0).contains(&tick.value)));
}

#[test]
fn percent_y_axis_labels_ticks_as_percent() {
    let axis = YAxis::new(
        AxisSide::Left,
        0,
        AxisMeasures::All,
        Some(0.8),
        340.0,
        NumberLabelStyle::Percent,
    )
    .expect("axis");

    assert_eq!(axis.scale().domain(), (0.0, 0.8 * 1.05));
    assert_eq!(axis.scale().map(0.0), 340.0);
    assert_eq!(axis.x_position(500.0), -10.0);
    let labels: Vec<String> = axis.ticks().into_iter().map(|tick| tick.label).collect();
    assert_eq!(labels, vec!["0%", "20%", "40%", "60%", "80%"]);
}

#[test]
fn axis_measures_filter_by_index() {
    assert!(AxisMeasures::All.includes(3));
    assert!(AxisMeasures::Single(1).includes(1));
    assert!(!AxisMeasures::Single(1).includes(0));
    assert_eq!(AxisMeasures::All.as_filter(), None);
    assert_eq!(AxisMeasures::Single(2).as_filter(), Some(2));
}
