//! neon_chart: headless chart interaction and selection for dashboard widgets

pub mod backend;
pub mod chart_options;
pub mod color;
pub mod data_types;
pub mod dataset;
#[cfg(feature = "polars")]
pub mod frame;
pub mod input;
pub mod listener;
pub mod scales;
pub mod selection;
pub mod subcomponent;
pub mod text;
pub mod theme;
pub mod transform;
pub mod utils;

pub use backend::{ChartArea, ChartBackend, HitElement, LayoutChart};
pub use chart_options::{create_chart_options, ChartLayout, ChartOptions, ScaleKind};
pub use color::Color;
pub use data_types::{
    AxisType, ChartConfig, ChartKind, ChartMetadata, ChartProfile, Gesture, ListConfig, Point,
    SelectMode, SelectedLabels, Value,
};
pub use dataset::{create_chart_data, create_chart_data_and_options, ChartData, Dataset};
pub use input::{ListClick, Modifiers, PointerEvent, PointerKind};
pub use listener::{shared, SharedListener, SubcomponentListener};
pub use selection::{GestureContext, SelectionGesture};
pub use subcomponent::{
    BarSubcomponent, ChartCore, ChartSubcomponent, Dimensions, HistogramSubcomponent,
    LineSubcomponent, ListEntry, ListSubcomponent, PieSubcomponent, ScatterSubcomponent,
    Subcomponent,
};
pub use text::{ApproxTextMeasurer, CachedMeasurer, FontSpec, TextMeasurer};
