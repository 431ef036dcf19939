use chrono::{TimeZone, Utc};
use neon_chart::scales::{linear_ticks, ChartScale};
use neon_chart::utils::date_formatter::Granularity;
use neon_chart::utils::{format_number, format_value};
use neon_chart::{AxisType, Value};

#[test]
fn test_linear_ticks_are_round() {
    let ticks = linear_ticks(0.0, 100.0, 5);
    assert_eq!(ticks.first(), Some(&0.0));
    assert_eq!(ticks.last(), Some(&100.0));
    assert!(ticks.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_date_ticks_follow_granularity() {
    let aug = Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap();
    let scale = ChartScale::new_linear((0.0, 1.0), (0.0, 100.0));
    let millis = aug.timestamp_millis() as f64;

    assert_eq!(
        scale.format_tick(millis, AxisType::Date, Some(Granularity::Month)),
        "Aug 2024"
    );
    assert_eq!(
        scale.format_tick(millis, AxisType::Date, Some(Granularity::Day)),
        "01 Aug 2024"
    );
    assert_eq!(scale.format_tick(2500.0, AxisType::Number, None), "2,500");
}

#[test]
fn test_values_format_by_axis_type() {
    let date = Value::Date(Utc.with_ymd_and_hms(2023, 12, 24, 18, 0, 0).unwrap());
    assert_eq!(format_value(&date, AxisType::Date, Granularity::Year), "2023");
    assert_eq!(format_value(&Value::from("1200"), AxisType::Number, Granularity::Day), "1,200");
    assert_eq!(format_value(&Value::from("north"), AxisType::String, Granularity::Day), "north");
    assert_eq!(format_value(&Value::Number(0.25), AxisType::String, Granularity::Day), "0.25");
}

#[test]
fn test_axis_type_classification() {
    let dates = [
        Value::Date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        Value::Date(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()),
    ];
    assert_eq!(AxisType::classify(&dates), AxisType::Date);
    assert!(AxisType::Date.is_continuous());

    // Numeric-looking text still makes a string axis.
    let text = [Value::Number(1.0), Value::from("2,000")];
    assert_eq!(AxisType::classify(&text), AxisType::String);
    assert!(!AxisType::String.is_continuous());
    assert_eq!(format_number(-0.5), "-0.50");
}
