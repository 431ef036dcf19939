//! Groups flat points into per-group series aligned to the shared x-domain.

use crate::chart_options::{create_chart_options, ChartLayout, ChartOptions};
use crate::color::Color;
use crate::data_types::{ChartConfig, ChartMetadata, ChartProfile, Point, SelectedLabels, Value};
use crate::text::TextMeasurer;
use crate::utils::date_formatter::Granularity;
use crate::utils::format_value;
use serde::Serialize;
use std::collections::HashMap;
use tracing::trace;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DatasetPoint {
    pub x: Option<Value>,
    pub y: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub color: Color,
    /// One entry per x-domain element in domain order, or one per point for
    /// scattered data.
    pub data: Vec<DatasetPoint>,
    pub background_color: Vec<String>,
    pub hover_background_color: Vec<String>,
    pub aggregations: Vec<Option<f64>>,
}

impl Dataset {
    /// The measured value at `index`, whichever side of the point it sits on.
    pub fn value_at(&self, index: usize, horizontal: bool) -> Option<&Value> {
        let point = self.data.get(index)?;
        if horizontal {
            point.x.as_ref()
        } else {
            point.y.as_ref()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChartData {
    /// The shared x-domain.
    pub keys: Vec<Value>,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub horizontal: bool,
    /// Datasets keep every point in input order instead of one slot per key.
    pub scattered: bool,
}

impl ChartData {
    /// Value of a dataset at x-domain position `index`. Scattered datasets
    /// answer with their first point at that key.
    pub fn value_at(&self, dataset_index: usize, index: usize) -> Option<&Value> {
        let dataset = self.datasets.get(dataset_index)?;
        if !self.scattered {
            return dataset.value_at(index, self.horizontal);
        }
        let key = self.keys.get(index)?;
        dataset
            .data
            .iter()
            .find(|p| p.x.as_ref() == Some(key))
            .and_then(|p| p.y.as_ref())
    }

    /// Position of `x` in the x-domain.
    pub fn key_index(&self, x: &Value) -> Option<usize> {
        self.keys.iter().position(|k| k == x)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

struct Slot {
    value: Value,
    color: Color,
    aggregation: Option<f64>,
}

struct DatasetBuilder {
    label: String,
    color: Color,
    slots: HashMap<usize, Slot>,
}

impl DatasetBuilder {
    fn new(label: &str, color: Color) -> Self {
        Self {
            label: label.to_string(),
            color,
            slots: HashMap::new(),
        }
    }

    /// Later points for the same x replace earlier ones.
    fn add_point(&mut self, index: usize, point: &Point) {
        self.slots.insert(
            index,
            Slot {
                value: point.y.clone(),
                color: point.color,
                aggregation: point.aggregation,
            },
        );
    }

    fn finalize(mut self, keys: &[Value], selected: &SelectedLabels, profile: &ChartProfile) -> Dataset {
        let len = keys.len();
        let mut dataset = Dataset {
            label: self.label,
            color: self.color,
            data: Vec::with_capacity(len),
            background_color: Vec::with_capacity(len),
            hover_background_color: Vec::with_capacity(len),
            aggregations: Vec::with_capacity(len),
        };

        for (index, key) in keys.iter().enumerate() {
            let slot = self.slots.remove(&index);
            let color = match (&slot, profile.slice_colors) {
                (Some(slot), true) => slot.color,
                _ => self.color,
            };
            let active = selected.is_empty() || selected.contains(key);
            let value = slot.as_ref().map(|s| s.value.clone());

            dataset.data.push(if profile.horizontal {
                DatasetPoint {
                    x: value,
                    y: Some(key.clone()),
                }
            } else {
                DatasetPoint {
                    x: Some(key.clone()),
                    y: value,
                }
            });
            dataset.background_color.push(if active {
                color.selected_css()
            } else {
                color.deselected_css()
            });
            dataset.hover_background_color.push(color.hover_css());
            dataset.aggregations.push(slot.and_then(|s| s.aggregation));
        }
        dataset
    }
}

/// Builds one dataset per group, each holding exactly one slot per entry of
/// `meta.x_list`. Slots without a point hold a null value. Profiles that do
/// not align their points keep every point instead.
pub fn create_chart_data(
    points: &[Point],
    meta: &ChartMetadata,
    selected: &SelectedLabels,
    profile: &ChartProfile,
    granularity: Granularity,
) -> ChartData {
    let positions: HashMap<String, usize> = meta
        .x_list
        .iter()
        .enumerate()
        .map(|(i, v)| (v.key(), i))
        .collect();

    let datasets = if profile.aligned {
        let mut builders: Vec<DatasetBuilder> = Vec::new();
        let mut by_group: HashMap<&str, usize> = HashMap::new();
        for point in points {
            let Some(&index) = positions.get(&point.x.key()) else {
                trace!(x = %point.x, "point outside the x-domain");
                continue;
            };
            let slot = *by_group.entry(point.group.as_str()).or_insert_with(|| {
                builders.push(DatasetBuilder::new(&point.group, point.color));
                builders.len() - 1
            });
            builders[slot].add_point(index, point);
        }
        builders
            .into_iter()
            .map(|b| b.finalize(&meta.x_list, selected, profile))
            .collect()
    } else {
        scatter_series(points, &positions, selected, profile)
    };

    ChartData {
        keys: meta.x_list.clone(),
        labels: meta
            .x_list
            .iter()
            .map(|v| format_value(v, meta.x_axis, granularity))
            .collect(),
        datasets,
        horizontal: profile.horizontal,
        scattered: !profile.aligned,
    }
}

/// One dataset per group holding every point inside the x-domain, in input
/// order. Points sharing an x value are all kept.
fn scatter_series(
    points: &[Point],
    positions: &HashMap<String, usize>,
    selected: &SelectedLabels,
    profile: &ChartProfile,
) -> Vec<Dataset> {
    let mut datasets: Vec<Dataset> = Vec::new();
    let mut by_group: HashMap<&str, usize> = HashMap::new();
    for point in points {
        if !positions.contains_key(&point.x.key()) {
            trace!(x = %point.x, "point outside the x-domain");
            continue;
        }
        let slot = *by_group.entry(point.group.as_str()).or_insert_with(|| {
            datasets.push(Dataset {
                label: point.group.clone(),
                color: point.color,
                data: Vec::new(),
                background_color: Vec::new(),
                hover_background_color: Vec::new(),
                aggregations: Vec::new(),
            });
            datasets.len() - 1
        });
        let dataset = &mut datasets[slot];
        let color = if profile.slice_colors {
            point.color
        } else {
            dataset.color
        };
        let active = selected.is_empty() || selected.contains(&point.x);
        dataset.data.push(DatasetPoint {
            x: Some(point.x.clone()),
            y: Some(point.y.clone()),
        });
        dataset.background_color.push(if active {
            color.selected_css()
        } else {
            color.deselected_css()
        });
        dataset.hover_background_color.push(color.hover_css());
        dataset.aggregations.push(point.aggregation);
    }
    datasets
}

pub fn create_chart_data_and_options(
    points: &[Point],
    meta: &ChartMetadata,
    selected: &SelectedLabels,
    profile: &ChartProfile,
    config: &ChartConfig,
    layout: ChartLayout,
    measurer: &dyn TextMeasurer,
) -> (ChartData, ChartOptions) {
    let data = create_chart_data(points, meta, selected, profile, config.granularity);
    let options = create_chart_options(meta, profile, config, layout, measurer);
    (data, options)
}
