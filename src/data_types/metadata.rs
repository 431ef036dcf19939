use super::{AxisType, Point, Value};
use crate::utils::date_formatter::Granularity;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Upper bound on the number of slots a filled domain may grow to.
pub const MAX_FILLED_BUCKETS: usize = 10_000;

/// Per-draw description of the incoming points. Rebuilt on every draw.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartMetadata {
    pub x_axis: AxisType,
    pub y_axis: AxisType,
    /// Unique x values: chronological for dates, numeric for numbers, first-seen for strings.
    pub x_list: Vec<Value>,
    pub y_list: Vec<Value>,
    /// Group labels in first-seen order.
    pub groups: Vec<String>,
    pub maximum_aggregation: Option<f64>,
    pub data_length: usize,
}

impl ChartMetadata {
    pub fn from_points(points: &[Point]) -> Self {
        let x_axis = AxisType::classify(points.iter().map(|p| &p.x));
        let y_axis = AxisType::classify(points.iter().map(|p| &p.y));

        let mut seen_groups = HashSet::new();
        let mut groups = Vec::new();
        for point in points {
            if seen_groups.insert(point.group.as_str()) {
                groups.push(point.group.clone());
            }
        }

        let maximum_aggregation = points
            .iter()
            .filter_map(|p| p.aggregation)
            .fold(None, |acc: Option<f64>, a| Some(acc.map_or(a, |m| m.max(a))));

        Self {
            x_axis,
            y_axis,
            x_list: unique_sorted(points.iter().map(|p| &p.x), x_axis),
            y_list: unique_sorted(points.iter().map(|p| &p.y), y_axis),
            groups,
            maximum_aggregation,
            data_length: points.len(),
        }
    }

    /// Returns a copy whose x-domain has every bucket between its first and
    /// last entries: one per granularity step for dates, one per integer for
    /// integral numbers. String domains and oversized ranges are left alone.
    pub fn with_filled_x_domain(&self, granularity: Granularity) -> Self {
        let filled = match self.x_axis {
            AxisType::Date => fill_dates(&self.x_list, granularity),
            AxisType::Number => fill_integers(&self.x_list),
            AxisType::String => None,
        };
        let mut meta = self.clone();
        if let Some(list) = filled {
            meta.x_list = list;
        }
        meta
    }

    pub fn index_of_x(&self, value: &Value) -> Option<usize> {
        let key = value.key();
        self.x_list.iter().position(|v| v.key() == key)
    }
}

fn unique_sorted<'a>(values: impl Iterator<Item = &'a Value>, axis: AxisType) -> Vec<Value> {
    let mut seen = HashSet::new();
    let mut list: Vec<Value> = values
        .filter(|v| seen.insert(v.key()))
        .cloned()
        .collect();
    if axis != AxisType::String {
        list.sort_by(|a, b| a.compare(b));
    }
    list
}

fn fill_dates(list: &[Value], granularity: Granularity) -> Option<Vec<Value>> {
    let first = granularity.bucket_start(list.first()?.as_date()?);
    let last = granularity.bucket_start(list.last()?.as_date()?);
    let mut filled = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        if filled.len() >= MAX_FILLED_BUCKETS {
            return None;
        }
        filled.push(Value::Date(cursor));
        cursor = granularity.advance(cursor)?;
    }
    Some(filled)
}

fn fill_integers(list: &[Value]) -> Option<Vec<Value>> {
    let numbers: Vec<f64> = list.iter().filter_map(Value::as_f64).collect();
    if numbers.is_empty() || numbers.iter().any(|n| n.fract() != 0.0) {
        return None;
    }
    let first = *numbers.first()? as i64;
    let last = *numbers.last()? as i64;
    let span = usize::try_from(last - first).ok()?;
    if span >= MAX_FILLED_BUCKETS {
        return None;
    }
    Some((first..=last).map(|n| Value::Number(n as f64)).collect())
}
