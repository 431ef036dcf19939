use crate::color::Color;
use crate::text::FontSpec;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub font: FontSpec,
    pub grid_line: Color,
    pub axis_label: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
    /// Padding in pixels around the plot area.
    pub padding: f32,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            grid_line: Color::rgb(0xdd, 0xdd, 0xdd),
            axis_label: Color::rgb(0x33, 0x33, 0x33),
            tooltip_background: Color::rgb(0x00, 0x00, 0x00),
            tooltip_text: Color::rgb(0xff, 0xff, 0xff),
            padding: 5.0,
        }
    }
}
