use chrono::{DateTime, Datelike, Duration, Months, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan 2024
    HourMin,    // 12 Jan 10:30
    HourMinSec, // 10:30:15
}

impl SmartDateFormat {
    fn pattern(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::MonthYear => "%b %Y",
            Self::DayMonth => "%d %b %Y",
            Self::HourMin => "%d %b %H:%M",
            Self::HourMinSec => "%H:%M:%S",
        }
    }
}

/// Determines the best date format based on the visible time range (in seconds).
pub fn determine_date_format(visible_range_sec: f64) -> SmartDateFormat {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 3600.0;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH: f64 = 30.0 * DAY;
    const YEAR: f64 = 365.0 * DAY;

    if visible_range_sec > YEAR * 2.0 {
        SmartDateFormat::Year
    } else if visible_range_sec > MONTH * 2.0 {
        SmartDateFormat::MonthYear
    } else if visible_range_sec > DAY * 1.5 {
        SmartDateFormat::DayMonth
    } else if visible_range_sec > MINUTE * 5.0 {
        SmartDateFormat::HourMin
    } else {
        SmartDateFormat::HourMinSec
    }
}

/// Formats an epoch-milliseconds timestamp according to the specified format.
pub fn format_timestamp(millis: f64, format: SmartDateFormat) -> String {
    match DateTime::from_timestamp_millis(millis as i64) {
        Some(dt) => dt.format(format.pattern()).to_string(),
        None => format!("{:.2}", millis),
    }
}

/// Bucket size of date values on a chart axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Year,
    Month,
    #[default]
    Day,
    Hour,
    Minute,
    Second,
}

impl Granularity {
    /// Start of the bucket containing `dt`.
    pub fn bucket_start(self, dt: DateTime<Utc>) -> DateTime<Utc> {
        let (month, day, hour, minute, second) = match self {
            Self::Year => (1, 1, 0, 0, 0),
            Self::Month => (dt.month(), 1, 0, 0, 0),
            Self::Day => (dt.month(), dt.day(), 0, 0, 0),
            Self::Hour => (dt.month(), dt.day(), dt.hour(), 0, 0),
            Self::Minute => (dt.month(), dt.day(), dt.hour(), dt.minute(), 0),
            Self::Second => (dt.month(), dt.day(), dt.hour(), dt.minute(), dt.second()),
        };
        Utc.with_ymd_and_hms(dt.year(), month, day, hour, minute, second)
            .single()
            .unwrap_or(dt)
    }

    /// Start of the bucket after the one containing `dt`.
    pub fn advance(self, dt: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let start = self.bucket_start(dt);
        match self {
            Self::Year => start.checked_add_months(Months::new(12)),
            Self::Month => start.checked_add_months(Months::new(1)),
            Self::Day => start.checked_add_signed(Duration::days(1)),
            Self::Hour => start.checked_add_signed(Duration::hours(1)),
            Self::Minute => start.checked_add_signed(Duration::minutes(1)),
            Self::Second => start.checked_add_signed(Duration::seconds(1)),
        }
    }

    /// Last second of the bucket containing `dt`, so a single-bucket range
    /// still spans the whole bucket ("Aug" ends Aug 31 23:59:59).
    pub fn bucket_end(self, dt: DateTime<Utc>) -> DateTime<Utc> {
        match self.advance(dt) {
            Some(next) => next - Duration::seconds(1),
            None => dt,
        }
    }

    pub fn label_format(self) -> SmartDateFormat {
        match self {
            Self::Year => SmartDateFormat::Year,
            Self::Month => SmartDateFormat::MonthYear,
            Self::Day => SmartDateFormat::DayMonth,
            Self::Hour | Self::Minute => SmartDateFormat::HourMin,
            Self::Second => SmartDateFormat::HourMinSec,
        }
    }

    pub fn format(self, dt: DateTime<Utc>) -> String {
        dt.format(self.label_format().pattern()).to_string()
    }
}
