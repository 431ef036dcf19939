use super::SelectMode;
use crate::theme::ChartTheme;
use crate::utils::date_formatter::Granularity;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Histogram,
    Pie,
    Line,
    Scatter,
}

/// Fixed traits of a chart variant, decided at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartProfile {
    pub kind: ChartKind,
    /// Category axis drawn vertically.
    pub horizontal: bool,
    /// The category axis is a discrete scale whatever its value type.
    pub force_category: bool,
    /// The variant allows a logarithmic value axis.
    pub log_scale_allowed: bool,
    /// Points keep their own color instead of their group's.
    pub slice_colors: bool,
    /// Each group holds one value per x-domain entry. Scatter plots keep
    /// every point instead.
    pub aligned: bool,
    pub default_select_mode: SelectMode,
}

impl ChartProfile {
    pub fn bar(horizontal: bool) -> Self {
        Self {
            kind: ChartKind::Bar,
            horizontal,
            force_category: true,
            log_scale_allowed: true,
            slice_colors: false,
            aligned: true,
            default_select_mode: SelectMode::Item,
        }
    }

    pub fn histogram(horizontal: bool) -> Self {
        Self {
            kind: ChartKind::Histogram,
            default_select_mode: SelectMode::Domain,
            ..Self::bar(horizontal)
        }
    }

    pub fn pie() -> Self {
        Self {
            kind: ChartKind::Pie,
            horizontal: false,
            force_category: true,
            log_scale_allowed: false,
            slice_colors: true,
            aligned: true,
            default_select_mode: SelectMode::Item,
        }
    }

    pub fn line() -> Self {
        Self {
            kind: ChartKind::Line,
            horizontal: false,
            force_category: false,
            log_scale_allowed: true,
            slice_colors: false,
            aligned: true,
            default_select_mode: SelectMode::Domain,
        }
    }

    pub fn scatter() -> Self {
        Self {
            kind: ChartKind::Scatter,
            aligned: false,
            default_select_mode: SelectMode::Bounds,
            ..Self::line()
        }
    }

    pub fn has_axes(&self) -> bool {
        self.kind != ChartKind::Pie
    }
}

/// User-facing display options for a chart subcomponent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Raw overrides as entered; only numeric values take effect.
    pub x_scale_min: Option<serde_json::Value>,
    pub x_scale_max: Option<serde_json::Value>,
    pub y_scale_min: Option<serde_json::Value>,
    pub y_scale_max: Option<serde_json::Value>,
    pub log_scale: bool,
    pub horizontal: bool,
    pub granularity: Granularity,
    pub theme: ChartTheme,
    /// Fraction of the chart width the y-axis labels may take.
    pub y_axis_max_width_pct: f32,
    pub show_gridlines: bool,
    pub stacked: bool,
    pub x_axis_title: Option<String>,
    pub y_axis_title: Option<String>,
    pub aggregation_label: String,
    pub select_mode: Option<SelectMode>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            x_scale_min: None,
            x_scale_max: None,
            y_scale_min: None,
            y_scale_max: None,
            log_scale: false,
            horizontal: false,
            granularity: Granularity::default(),
            theme: ChartTheme::default(),
            y_axis_max_width_pct: 0.3,
            show_gridlines: true,
            stacked: false,
            x_axis_title: None,
            y_axis_title: None,
            aggregation_label: "Count".to_string(),
            select_mode: None,
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("invalid chart configuration")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatMode {
    #[default]
    None,
    Rank,
    Value,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Aggregation,
    Value,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub heat: HeatMode,
    pub sort_field: SortField,
    /// Print each row's count beside its label.
    pub show_counts: bool,
}

impl ListConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("invalid list configuration")
    }
}
