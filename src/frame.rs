//! Converts query results held in a polars `DataFrame` into chart points.

use crate::color::Color;
use crate::data_types::{Point, Value};
use chrono::DateTime;
use eyre::{eyre, Result, WrapErr};
use polars::prelude::{DataFrame, DataType, Series, TimeUnit};

/// Column names of a query result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameColumns {
    pub x: String,
    pub y: String,
    /// Rows without a group column fall into a single unnamed group.
    pub group: Option<String>,
    pub aggregation: Option<String>,
}

impl FrameColumns {
    pub fn new(x: &str, y: &str) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
            group: None,
            aggregation: None,
        }
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    pub fn with_aggregation(mut self, aggregation: &str) -> Self {
        self.aggregation = Some(aggregation.to_string());
        self
    }
}

/// Reads one point per row. Rows with a null x or y are skipped; `color_for`
/// picks each group's color.
pub fn points_from_frame(
    df: &DataFrame,
    columns: &FrameColumns,
    color_for: impl Fn(&str) -> Color,
) -> Result<Vec<Point>> {
    let xs = values(df, &columns.x)?;
    let ys = values(df, &columns.y)?;
    let groups = match &columns.group {
        Some(name) => Some(strings(df, name)?),
        None => None,
    };
    let aggregations = match &columns.aggregation {
        Some(name) => Some(floats(df, name)?),
        None => None,
    };

    let mut points = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let (Some(x), Some(y)) = (xs[row].clone(), ys[row].clone()) else {
            continue;
        };
        let group = groups
            .as_ref()
            .and_then(|g| g[row].clone())
            .unwrap_or_default();
        let color = color_for(&group);
        let mut point = Point::new(x, y, group, color);
        if let Some(aggregation) = aggregations.as_ref().and_then(|a| a[row]) {
            point = point.with_aggregation(aggregation);
        }
        points.push(point);
    }
    Ok(points)
}

fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    let column = df
        .column(name)
        .wrap_err_with(|| format!("missing column {name:?}"))?;
    Ok(column.as_materialized_series())
}

fn values(df: &DataFrame, name: &str) -> Result<Vec<Option<Value>>> {
    let s = series(df, name)?;
    match s.dtype() {
        DataType::String => Ok(strings(df, name)?
            .into_iter()
            .map(|v| v.map(Value::Text))
            .collect()),
        DataType::Date | DataType::Datetime(_, _) => {
            let millis = s
                .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
                .and_then(|c| c.cast(&DataType::Int64))
                .wrap_err_with(|| format!("column {name:?} is not a readable date"))?;
            let ca = millis.i64()?;
            ca.into_iter()
                .map(|v| match v {
                    Some(ms) => DateTime::from_timestamp_millis(ms)
                        .map(|d| Some(Value::Date(d)))
                        .ok_or_else(|| eyre!("timestamp {ms} out of range in {name:?}")),
                    None => Ok(None),
                })
                .collect()
        }
        _ => Ok(floats(df, name)?
            .into_iter()
            .map(|v| v.map(Value::Number))
            .collect()),
    }
}

fn strings(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let s = series(df, name)?
        .cast(&DataType::String)
        .wrap_err_with(|| format!("column {name:?} cannot be read as text"))?;
    Ok(s.str()?.into_iter().map(|v| v.map(str::to_string)).collect())
}

fn floats(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let s = series(df, name)?
        .cast(&DataType::Float64)
        .wrap_err_with(|| format!("column {name:?} is not numeric"))?;
    Ok(s.f64()?.into_iter().collect())
}
