//! Axis, tick and tooltip configuration derived from chart metadata.

use crate::data_types::{parse_number, AxisType, ChartConfig, ChartKind, ChartMetadata, ChartProfile, Value};
use crate::dataset::ChartData;
use crate::scales::ChartScale;
use crate::text::{longest_width, truncate_text, FontSpec, TextMeasurer};
use crate::utils::date_formatter::Granularity;
use crate::utils::{format_number, format_value};
use eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::warn;

/// A continuous axis only turns logarithmic above this many points.
/// Fixed policy; the threshold has no tuning knob.
pub const LOG_SCALE_MIN_POINTS: usize = 10;
/// Pixels kept free between adjacent tick labels.
pub const TICK_MARGIN: f32 = 10.0;
/// Pixels between the y-axis labels and the plot.
pub const Y_AXIS_PADDING: f32 = 10.0;
const PIXELS_PER_TICK: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Category,
    Linear,
    Logarithmic,
}

/// Pixel size the chart is laid out into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChartLayout {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisOptions {
    pub display: bool,
    pub kind: ScaleKind,
    pub axis_type: AxisType,
    /// Set for continuous axes, from an override or the data extent.
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Slot indices for category axes, values otherwise.
    pub ticks: Vec<f64>,
    /// Rendered tick text, truncated to fit.
    pub tick_labels: Vec<String>,
    pub title: Option<String>,
    pub gridlines: bool,
    pub stacked: bool,
    /// Reserved label width, vertical axes only.
    pub width: Option<f32>,
}

impl AxisOptions {
    fn hidden(axis_type: AxisType) -> Self {
        Self {
            display: false,
            kind: ScaleKind::Category,
            axis_type,
            min: None,
            max: None,
            ticks: vec![],
            tick_labels: vec![],
            title: None,
            gridlines: false,
            stacked: false,
            width: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartOptions {
    pub kind: ChartKind,
    pub horizontal: bool,
    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,
    pub legend: bool,
    pub font: FontSpec,
    pub grid_color: String,
    pub aggregation_label: String,
    pub granularity: Granularity,
}

impl ChartOptions {
    /// The visual axis carrying measured values.
    pub fn value_axis(&self) -> &AxisOptions {
        if self.horizontal {
            &self.x_axis
        } else {
            &self.y_axis
        }
    }

    pub fn category_axis(&self) -> &AxisOptions {
        if self.horizontal {
            &self.y_axis
        } else {
            &self.x_axis
        }
    }

    /// Tooltip heading for the element at `index`; `None` when no dataset
    /// holds a value there.
    pub fn tooltip_title(&self, data: &ChartData, index: usize) -> Option<String> {
        data.keys.get(index)?;
        (0..data.datasets.len()).find(|d| data.value_at(*d, index).is_some())?;
        data.labels.get(index).cloned()
    }

    /// Tooltip row for one dataset; `None` for a null value.
    pub fn tooltip_label(&self, data: &ChartData, dataset_index: usize, index: usize) -> Option<String> {
        let dataset = data.datasets.get(dataset_index)?;
        let text = match data.value_at(dataset_index, index)? {
            Value::Number(n) => format_number(*n),
            other => format_value(other, self.value_axis().axis_type, self.granularity),
        };
        if dataset.label.is_empty() {
            Some(format!("{}: {}", self.aggregation_label, text))
        } else {
            Some(format!("{}: {}", dataset.label, text))
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).wrap_err("failed to serialize chart options")
    }
}

pub fn resolve_scale_kind(
    axis_type: AxisType,
    force_category: bool,
    log_scale: bool,
    data_length: usize,
) -> ScaleKind {
    if force_category {
        return ScaleKind::Category;
    }
    match axis_type {
        AxisType::String => ScaleKind::Category,
        AxisType::Date | AxisType::Number => {
            if log_scale && data_length > LOG_SCALE_MIN_POINTS {
                ScaleKind::Logarithmic
            } else {
                ScaleKind::Linear
            }
        }
    }
}

/// Reads a min/max override. Numbers and numeric strings count; anything
/// else means "no override".
pub fn scale_override(raw: Option<&serde_json::Value>) -> Option<f64> {
    let raw = raw?;
    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => parse_number(s),
        _ => None,
    };
    if parsed.is_none() && !raw.is_null() {
        warn!(value = %raw, "ignoring non-numeric scale override");
    }
    parsed
}

struct AxisSource<'a> {
    list: &'a [Value],
    axis_type: AxisType,
    kind: ScaleKind,
    /// Bars grow from zero, so a linear value extent includes it.
    include_zero: bool,
    min_override: Option<f64>,
    max_override: Option<f64>,
}

impl AxisSource<'_> {
    fn extent(&self) -> Option<(f64, f64)> {
        if self.kind == ScaleKind::Category {
            return None;
        }
        let values = self.list.iter().filter_map(Value::as_f64);
        let (mut min, mut max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if min > max {
            (min, max) = (0.0, 1.0);
        }
        if self.include_zero {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        Some((
            self.min_override.unwrap_or(min),
            self.max_override.unwrap_or(max),
        ))
    }

    fn raw_ticks(&self, axis_len: f32, granularity: Granularity) -> (Vec<f64>, Vec<String>) {
        let extent = self.extent();
        match (self.kind, extent) {
            (ScaleKind::Category, _) | (_, None) => (
                (0..self.list.len()).map(|i| i as f64).collect(),
                self.list
                    .iter()
                    .map(|v| format_value(v, self.axis_type, granularity))
                    .collect(),
            ),
            (kind, Some((min, max))) => {
                let scale = if kind == ScaleKind::Logarithmic {
                    ChartScale::new_log((min, max), (0.0, axis_len))
                } else {
                    ChartScale::new_linear((min, max), (0.0, axis_len))
                };
                let ticks = scale.ticks(tick_count(axis_len));
                let labels = ticks
                    .iter()
                    .map(|t| scale.format_tick(*t, self.axis_type, Some(granularity)))
                    .collect();
                (ticks, labels)
            }
        }
    }
}

fn tick_count(axis_len: f32) -> usize {
    ((axis_len / PIXELS_PER_TICK).floor() as usize).clamp(2, 10)
}

/// Builds axis and tooltip options for one draw.
///
/// The y-axis reserves the width of its longest label, capped at
/// `config.y_axis_max_width_pct` of the chart width; its labels are then
/// truncated to that width. X labels are truncated to an even share of the
/// remaining width minus [`TICK_MARGIN`].
pub fn create_chart_options(
    meta: &ChartMetadata,
    profile: &ChartProfile,
    config: &ChartConfig,
    layout: ChartLayout,
    measurer: &dyn TextMeasurer,
) -> ChartOptions {
    let font = &config.theme.font;
    let mut options = ChartOptions {
        kind: profile.kind,
        horizontal: profile.horizontal,
        x_axis: AxisOptions::hidden(meta.x_axis),
        y_axis: AxisOptions::hidden(meta.y_axis),
        legend: profile.kind == ChartKind::Pie || meta.groups.len() > 1,
        font: font.clone(),
        grid_color: config.theme.grid_line.selected_css(),
        aggregation_label: config.aggregation_label.clone(),
        granularity: config.granularity,
    };
    if !profile.has_axes() {
        return options;
    }

    let log_scale = profile.log_scale_allowed && config.log_scale;
    let bars = matches!(profile.kind, ChartKind::Bar | ChartKind::Histogram);
    let category = (
        &meta.x_list[..],
        meta.x_axis,
        resolve_scale_kind(meta.x_axis, profile.force_category, false, meta.data_length),
        false,
    );
    let value_kind = resolve_scale_kind(meta.y_axis, false, log_scale, meta.data_length);
    let value = (
        &meta.y_list[..],
        meta.y_axis,
        value_kind,
        // Zero has no place on a log axis.
        bars && value_kind != ScaleKind::Logarithmic,
    );
    let (visual_x, visual_y) = if profile.horizontal {
        (value, category)
    } else {
        (category, value)
    };

    let x_source = AxisSource {
        list: visual_x.0,
        axis_type: visual_x.1,
        kind: visual_x.2,
        include_zero: visual_x.3,
        min_override: scale_override(config.x_scale_min.as_ref()),
        max_override: scale_override(config.x_scale_max.as_ref()),
    };
    let y_source = AxisSource {
        list: visual_y.0,
        axis_type: visual_y.1,
        kind: visual_y.2,
        include_zero: visual_y.3,
        min_override: scale_override(config.y_scale_min.as_ref()),
        max_override: scale_override(config.y_scale_max.as_ref()),
    };

    let padding = config.theme.padding;
    let y_len = (layout.height - 2.0 * padding - (font.size + padding)).max(1.0);
    let (y_ticks, y_raw) = y_source.raw_ticks(y_len, config.granularity);
    let label_width = longest_width(measurer, font, &y_raw)
        .min(layout.width * config.y_axis_max_width_pct - Y_AXIS_PADDING);
    let y_width = (label_width + Y_AXIS_PADDING).max(0.0);
    let y_labels = y_raw
        .iter()
        .map(|l| truncate_text(measurer, font, l, label_width))
        .collect();

    let x_len = (layout.width - y_width - 2.0 * padding).max(1.0);
    let (x_ticks, x_raw) = x_source.raw_ticks(x_len, config.granularity);
    let budget = x_len / x_raw.len().max(1) as f32 - TICK_MARGIN;
    let x_labels = x_raw
        .iter()
        .map(|l| truncate_text(measurer, font, l, budget))
        .collect();

    let x_extent = x_source.extent();
    let y_extent = y_source.extent();
    options.x_axis = AxisOptions {
        display: true,
        kind: x_source.kind,
        axis_type: x_source.axis_type,
        min: x_extent.map(|e| e.0),
        max: x_extent.map(|e| e.1),
        ticks: x_ticks,
        tick_labels: x_labels,
        title: config.x_axis_title.clone(),
        gridlines: config.show_gridlines,
        stacked: config.stacked,
        width: None,
    };
    options.y_axis = AxisOptions {
        display: true,
        kind: y_source.kind,
        axis_type: y_source.axis_type,
        min: y_extent.map(|e| e.0),
        max: y_extent.map(|e| e.1),
        ticks: y_ticks,
        tick_labels: y_labels,
        title: config.y_axis_title.clone(),
        gridlines: config.show_gridlines,
        stacked: config.stacked,
        width: Some(y_width),
    };
    options
}
