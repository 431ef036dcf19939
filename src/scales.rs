use crate::data_types::AxisType;
use crate::utils::date_formatter::{determine_date_format, format_timestamp, Granularity};
use crate::utils::format_number;

/// Smallest positive value a logarithmic scale will map.
const LOG_FLOOR: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
pub enum ChartScale {
    Linear {
        domain: (f64, f64),
        range: (f32, f32),
    },
    Log {
        domain: (f64, f64),
        range: (f32, f32),
    },
    /// Evenly spaced slots, one per category; values are slot indices.
    Category { count: usize, range: (f32, f32) },
}

fn padded(domain: (f64, f64)) -> (f64, f64) {
    let (mut d_min, mut d_max) = domain;
    if (d_max - d_min).abs() < f64::EPSILON {
        d_min -= 0.5;
        d_max += 0.5;
    }
    (d_min, d_max)
}

impl ChartScale {
    pub fn new_linear(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self::Linear {
            domain: padded(domain),
            range,
        }
    }

    pub fn new_log(domain: (f64, f64), range: (f32, f32)) -> Self {
        let d_min = domain.0.max(LOG_FLOOR);
        let d_max = domain.1.max(d_min * 10.0);
        Self::Log {
            domain: (d_min, d_max),
            range,
        }
    }

    pub fn new_category(count: usize, range: (f32, f32)) -> Self {
        Self::Category {
            count: count.max(1),
            range,
        }
    }

    pub fn map(&self, value: f64) -> f32 {
        let res = match self {
            Self::Linear { domain, range } => {
                let t = (value - domain.0) / (domain.1 - domain.0);
                range.0 as f64 + t * (range.1 - range.0) as f64
            }
            Self::Log { domain, range } => {
                let v = value.max(LOG_FLOOR);
                let t = (v.ln() - domain.0.ln()) / (domain.1.ln() - domain.0.ln());
                range.0 as f64 + t * (range.1 - range.0) as f64
            }
            Self::Category { count, range } => {
                let slot = (range.1 - range.0) as f64 / *count as f64;
                range.0 as f64 + (value + 0.5) * slot
            }
        } as f32;
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    /// Pixel back to data space. Category scales return a fractional slot index.
    pub fn invert(&self, pixel: f32) -> f64 {
        let (r0, r1) = self.range();
        let span = (r1 - r0) as f64;
        if span == 0.0 {
            return 0.0;
        }
        let t = (pixel - r0) as f64 / span;
        match self {
            Self::Linear { domain, .. } => domain.0 + t * (domain.1 - domain.0),
            Self::Log { domain, .. } => (domain.0.ln() + t * (domain.1.ln() - domain.0.ln())).exp(),
            Self::Category { count, .. } => t * *count as f64 - 0.5,
        }
    }

    pub fn range(&self) -> (f32, f32) {
        match self {
            Self::Linear { range, .. } | Self::Log { range, .. } | Self::Category { range, .. } => {
                *range
            }
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear { domain, .. } | Self::Log { domain, .. } => *domain,
            Self::Category { count, .. } => (0.0, (*count - 1) as f64),
        }
    }

    /// Width of one category slot in pixels; 0 for continuous scales.
    pub fn slot_width(&self) -> f32 {
        match self {
            Self::Category { count, range } => (range.1 - range.0).abs() / *count as f32,
            _ => 0.0,
        }
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear { domain, .. } => {
                linear_ticks(domain.0.min(domain.1), domain.0.max(domain.1), count)
            }
            Self::Log { domain, .. } => {
                let lo = domain.0.log10().floor() as i32;
                let hi = domain.1.log10().ceil() as i32;
                (lo..=hi).map(|e| 10f64.powi(e)).collect()
            }
            Self::Category { count, .. } => (0..*count).map(|i| i as f64).collect(),
        }
    }

    pub fn format_tick(&self, value: f64, axis: AxisType, granularity: Option<Granularity>) -> String {
        match axis {
            AxisType::Date => {
                let fmt = match granularity {
                    Some(g) => g.label_format(),
                    None => {
                        let (d_min, d_max) = self.domain();
                        determine_date_format((d_max - d_min).abs() / 1000.0)
                    }
                };
                format_timestamp(value, fmt)
            }
            AxisType::Number | AxisType::String => format_number(value),
        }
    }

    pub fn update_domain(&mut self, min: f64, max: f64) {
        match self {
            Self::Linear { domain, .. } => *domain = padded((min, max)),
            Self::Log { range, .. } => {
                let range = *range;
                *self = Self::new_log((min, max), range);
            }
            // Categories are indexed, their domain follows the slot count.
            Self::Category { .. } => {}
        }
    }

    pub fn update_range(&mut self, min: f32, max: f32) {
        match self {
            Self::Linear { range, .. } | Self::Log { range, .. } | Self::Category { range, .. } => {
                *range = (min, max);
            }
        }
    }
}

/// Evenly spaced "nice" ticks covering `[min, max]`.
pub fn linear_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || count == 0 {
        return vec![];
    }
    let span = max - min;
    if span <= 0.0 {
        return vec![min];
    }
    let raw = span / count as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * magnitude;

    let mut ticks = Vec::new();
    let mut v = (min / step).ceil() * step;
    while v <= max + step * 1e-9 && ticks.len() < 1000 {
        // Clean up accumulated float error around zero.
        ticks.push(if v.abs() < step * 1e-9 { 0.0 } else { v });
        v += step;
    }
    ticks
}
