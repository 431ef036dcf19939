//! Drawable subcomponents hosted by a visualization widget.
//!
//! Every variant owns its state and talks back to its host through a
//! [`SharedListener`](crate::listener::SharedListener). Chart variants share
//! a [`ChartCore`] and add pointer handling on top of [`Subcomponent`].

mod bar;
mod chart;
mod histogram;
mod line;
mod list;
mod pie;
mod scatter;

pub use bar::BarSubcomponent;
pub use chart::ChartCore;
pub use histogram::HistogramSubcomponent;
pub use line::LineSubcomponent;
pub use list::{heat_bands, ListEntry, ListSubcomponent, HEAT_BANDS};
pub use pie::{PieSubcomponent, MIN_PIE_SIZE};
pub use scatter::ScatterSubcomponent;

use crate::data_types::{ChartMetadata, Point, SelectedLabels, Value};
use crate::input::PointerEvent;
use eyre::Result;
use serde::Serialize;

/// Smallest edge, in pixels, any chart is laid out into.
pub const MIN_CHART_SIZE: f32 = 100.0;
/// Pixels reserved per category on bar-like charts.
pub const MIN_CATEGORY_SIZE: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

pub trait Subcomponent {
    /// Replaces the drawn points. `meta` must describe exactly `points`.
    fn draw(&mut self, points: &[Point], meta: &ChartMetadata) -> Result<()>;

    fn destroy(&mut self);

    /// Rebuilds the view from the last drawn points and the current selection.
    fn redraw(&mut self) -> Result<()>;

    /// Highlights `values`, e.g. after a filter was set elsewhere.
    fn select(&mut self, values: &[Value]) -> Result<()>;

    fn deselect(&mut self) -> Result<()>;

    fn minimum_dimensions(&self) -> Dimensions;

    fn is_horizontal(&self) -> bool;
}

/// A subcomponent drawn through a [`ChartBackend`](crate::backend::ChartBackend).
pub trait ChartSubcomponent: Subcomponent {
    fn core(&self) -> &ChartCore;

    fn core_mut(&mut self) -> &mut ChartCore;

    fn handle_pointer(&mut self, event: &PointerEvent) {
        self.core_mut().handle_pointer(event);
    }

    fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.core_mut().resize(width, height)
    }

    fn selected_labels(&self) -> &SelectedLabels {
        self.core().selected_labels()
    }
}

/// Size needed to give every category its own slot along the category axis.
fn category_dimensions(categories: usize, horizontal: bool) -> Dimensions {
    let along = (categories as f32 * MIN_CATEGORY_SIZE).max(MIN_CHART_SIZE);
    if horizontal {
        Dimensions {
            width: MIN_CHART_SIZE,
            height: along,
        }
    } else {
        Dimensions {
            width: along,
            height: MIN_CHART_SIZE,
        }
    }
}
