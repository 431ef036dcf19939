//! Transform helper for coordinate projection

use crate::backend::ChartArea;
use crate::scales::ChartScale;

/// Scales are expressed relative to the chart area; the area origin is added on projection.
#[derive(Clone, Debug)]
pub struct PlotTransform {
    pub x_scale: ChartScale,
    pub y_scale: ChartScale,
    pub area: ChartArea,
}

impl PlotTransform {
    pub fn new(x_scale: ChartScale, y_scale: ChartScale, area: ChartArea) -> Self {
        Self {
            x_scale,
            y_scale,
            area,
        }
    }

    pub fn data_to_screen(&self, x: f64, y: f64) -> (f32, f32) {
        (self.x_data_to_screen(x), self.y_data_to_screen(y))
    }

    pub fn screen_to_data(&self, x: f32, y: f32) -> (f64, f64) {
        (self.x_screen_to_data(x), self.y_screen_to_data(y))
    }

    pub fn x_data_to_screen(&self, x: f64) -> f32 {
        self.area.left + self.x_scale.map(x)
    }

    pub fn y_data_to_screen(&self, y: f64) -> f32 {
        self.area.top + self.y_scale.map(y)
    }

    pub fn x_screen_to_data(&self, x: f32) -> f64 {
        self.x_scale.invert(x - self.area.left)
    }

    pub fn y_screen_to_data(&self, y: f32) -> f64 {
        self.y_scale.invert(y - self.area.top)
    }
}
