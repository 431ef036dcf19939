pub mod date_formatter;

use crate::data_types::{AxisType, Value};
use date_formatter::Granularity;

/// Display text for an axis value of the given axis type.
pub fn format_value(value: &Value, axis: AxisType, granularity: Granularity) -> String {
    match (axis, value) {
        (AxisType::Date, _) => match value.as_date() {
            Some(date) => granularity.format(date),
            None => value.key(),
        },
        (AxisType::Number, _) => match value.as_f64() {
            Some(n) => format_number(n),
            None => value.key(),
        },
        (AxisType::String, Value::Number(n)) => format_number(*n),
        (AxisType::String, _) => value.key(),
    }
}

/// Formats a number for display: integers with thousands separators,
/// tiny magnitudes with four decimals, everything else with two.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return group_thousands(&format!("{:.0}", value));
    }
    if value.abs() < 0.001 {
        return format!("{:.4}", value);
    }
    let fixed = format!("{:.2}", value);
    match fixed.split_once('.') {
        Some((int, frac)) => format!("{}.{}", group_thousands(int), frac),
        None => fixed,
    }
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_format_with_separators() {
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(-1234.0), "-1,234");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(1234.567), "1,234.57");
        assert_eq!(format_number(0.000123), "0.0001");
    }
}
