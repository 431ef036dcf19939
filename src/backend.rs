//! The charting capability a subcomponent renders through, and a headless
//! implementation that lays charts out without drawing them.

use crate::chart_options::{AxisOptions, ChartOptions, ScaleKind};
use crate::data_types::ChartKind;
use crate::dataset::ChartData;
use crate::scales::ChartScale;
use crate::transform::PlotTransform;
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Fraction of a category slot a bar occupies.
pub const BAR_WIDTH_PCT: f32 = 0.8;
/// Pixel radius within which a scatter point counts as hit.
pub const HIT_RADIUS: f32 = 6.0;

/// Plot rectangle inside the chart canvas, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartArea {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl ChartArea {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    pub fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x.max(self.left).min(self.right),
            y.max(self.top).min(self.bottom),
        )
    }
}

/// A rendered element under the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitElement {
    pub dataset_index: usize,
    /// Position in the x-domain.
    pub index: usize,
    /// Element center in pixels.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Rendering library seen by a chart subcomponent.
pub trait ChartBackend {
    /// Builds the chart from scratch.
    fn render(&mut self, data: &ChartData, options: &ChartOptions) -> Result<()>;

    fn destroy(&mut self);

    fn is_rendered(&self) -> bool;

    fn resize(&mut self, width: f32, height: f32);

    /// Canvas size in pixels.
    fn size(&self) -> (f32, f32);

    fn chart_area(&self) -> ChartArea;

    /// Pixel on the x-axis back to data space; category axes give a slot index.
    fn x_value_at(&self, pixel: f32) -> f64;

    fn y_value_at(&self, pixel: f32) -> f64;

    fn hit_test(&self, x: f32, y: f32) -> Vec<HitElement>;
}

/// Headless backend: computes the plot area, scales and hit regions a
/// renderer would produce, without a canvas.
pub struct LayoutChart {
    width: f32,
    height: f32,
    padding: f32,
    area: ChartArea,
    transform: Option<PlotTransform>,
    data: Option<ChartData>,
    kind: Option<ChartKind>,
    renders: usize,
}

impl LayoutChart {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            padding: 5.0,
            area: ChartArea::default(),
            transform: None,
            data: None,
            kind: None,
            renders: 0,
        }
    }

    /// Number of times the chart has been built.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn transform(&self) -> Option<&PlotTransform> {
        self.transform.as_ref()
    }

    fn build_scale(axis: &AxisOptions, count: usize, range: (f32, f32)) -> ChartScale {
        let domain = (axis.min.unwrap_or(0.0), axis.max.unwrap_or(1.0));
        match axis.kind {
            ScaleKind::Category => ChartScale::new_category(count, range),
            ScaleKind::Linear => ChartScale::new_linear(domain, range),
            ScaleKind::Logarithmic => ChartScale::new_log(domain, range),
        }
    }

    fn hit_pie(&self, data: &ChartData, x: f32, y: f32) -> Vec<HitElement> {
        let area = self.area;
        let (cx, cy) = (area.left + area.width() / 2.0, area.top + area.height() / 2.0);
        let radius = area.width().min(area.height()) / 2.0;
        let (dx, dy) = (x - cx, y - cy);
        if (dx * dx + dy * dy).sqrt() > radius {
            return vec![];
        }

        let Some(dataset) = data.datasets.first() else {
            return vec![];
        };
        let values: Vec<f64> = (0..data.keys.len())
            .map(|i| {
                dataset
                    .value_at(i, false)
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0)
                    .max(0.0)
            })
            .collect();
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return vec![];
        }

        // Slices run clockwise from twelve o'clock.
        let angle = (dx.atan2(-dy) + 2.0 * PI) % (2.0 * PI);
        let fraction = (angle / (2.0 * PI)) as f64;
        let mut cumulative = 0.0;
        for (index, value) in values.iter().enumerate() {
            cumulative += value / total;
            if fraction <= cumulative && *value > 0.0 {
                return vec![HitElement {
                    dataset_index: 0,
                    index,
                    x: cx,
                    y: cy,
                    width: radius * 2.0,
                    height: radius * 2.0,
                }];
            }
        }
        vec![]
    }

    fn hit_category(&self, data: &ChartData, t: &PlotTransform, x: f32, y: f32) -> Vec<HitElement> {
        let horizontal = data.horizontal;
        let (scale, pixel) = if horizontal {
            (&t.y_scale, y - t.area.top)
        } else {
            (&t.x_scale, x - t.area.left)
        };
        if data.keys.is_empty() {
            return vec![];
        }
        let index = scale.invert(pixel).round().clamp(0.0, (data.keys.len() - 1) as f64) as usize;
        let extent = scale.slot_width() * BAR_WIDTH_PCT;

        (0..data.datasets.len())
            .filter_map(|dataset_index| {
                let value = data.value_at(dataset_index, index)?.as_f64()?;
                let element = if horizontal {
                    let (vx, cy) = t.data_to_screen(value, index as f64);
                    let base = t.x_data_to_screen(0.0);
                    HitElement {
                        dataset_index,
                        index,
                        x: (vx + base) / 2.0,
                        y: cy,
                        width: (vx - base).abs(),
                        height: extent,
                    }
                } else {
                    let (cx, vy) = t.data_to_screen(index as f64, value);
                    let base = t.y_data_to_screen(0.0);
                    HitElement {
                        dataset_index,
                        index,
                        x: cx,
                        y: (vy + base) / 2.0,
                        width: extent,
                        height: (vy - base).abs(),
                    }
                };
                Some(element)
            })
            .collect()
    }

    fn hit_nearest(&self, data: &ChartData, t: &PlotTransform, x: f32, y: f32) -> Vec<HitElement> {
        let mut best: Option<(f32, HitElement)> = None;
        for (dataset_index, dataset) in data.datasets.iter().enumerate() {
            for (position, point) in dataset.data.iter().enumerate() {
                let (Some(x_value), Some(y_value)) = (&point.x, &point.y) else {
                    continue;
                };
                let index = if data.scattered {
                    let Some(index) = data.key_index(x_value) else {
                        continue;
                    };
                    index
                } else {
                    position
                };
                let (Some(kx), Some(vy)) = (x_value.as_f64(), y_value.as_f64()) else {
                    continue;
                };
                let (px, py) = t.data_to_screen(kx, vy);
                let distance = ((px - x).powi(2) + (py - y).powi(2)).sqrt();
                if distance <= HIT_RADIUS && best.map_or(true, |(d, _)| distance < d) {
                    best = Some((
                        distance,
                        HitElement {
                            dataset_index,
                            index,
                            x: px,
                            y: py,
                            width: HIT_RADIUS * 2.0,
                            height: HIT_RADIUS * 2.0,
                        },
                    ));
                }
            }
        }
        best.map(|(_, hit)| vec![hit]).unwrap_or_default()
    }
}

impl ChartBackend for LayoutChart {
    fn render(&mut self, data: &ChartData, options: &ChartOptions) -> Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(eyre!(
                "cannot lay out a {}x{} chart",
                self.width,
                self.height
            ));
        }
        let p = self.padding;
        let x_axis_height = if options.x_axis.display {
            options.font.size + p
        } else {
            0.0
        };
        let y_axis_width = options.y_axis.width.filter(|_| options.y_axis.display).unwrap_or(0.0);
        let left = p + y_axis_width;
        let top = p;
        self.area = ChartArea {
            top,
            bottom: (self.height - p - x_axis_height).max(top),
            left,
            right: (self.width - p).max(left),
        };

        // The category axis has one slot per key; a category value axis has one per tick.
        let count = data.keys.len();
        let (x_count, y_count) = if options.horizontal {
            (options.x_axis.ticks.len(), count)
        } else {
            (count, options.y_axis.ticks.len())
        };
        let x_scale = Self::build_scale(&options.x_axis, x_count, (0.0, self.area.width()));
        let y_scale = Self::build_scale(&options.y_axis, y_count, (self.area.height(), 0.0));
        self.transform = Some(PlotTransform::new(x_scale, y_scale, self.area));
        self.data = Some(data.clone());
        self.kind = Some(options.kind);
        self.renders += 1;
        Ok(())
    }

    fn destroy(&mut self) {
        self.transform = None;
        self.data = None;
        self.kind = None;
    }

    fn is_rendered(&self) -> bool {
        self.transform.is_some()
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn chart_area(&self) -> ChartArea {
        self.area
    }

    fn x_value_at(&self, pixel: f32) -> f64 {
        self.transform
            .as_ref()
            .map_or(0.0, |t| t.x_screen_to_data(pixel))
    }

    fn y_value_at(&self, pixel: f32) -> f64 {
        self.transform
            .as_ref()
            .map_or(0.0, |t| t.y_screen_to_data(pixel))
    }

    fn hit_test(&self, x: f32, y: f32) -> Vec<HitElement> {
        let (Some(t), Some(data), Some(kind)) = (&self.transform, &self.data, self.kind) else {
            return vec![];
        };
        if !self.area.contains(x, y) {
            return vec![];
        }
        let category = if data.horizontal { &t.y_scale } else { &t.x_scale };
        match kind {
            ChartKind::Pie => self.hit_pie(data, x, y),
            _ if matches!(category, ChartScale::Category { .. }) => self.hit_category(data, t, x, y),
            _ => self.hit_nearest(data, t, x, y),
        }
    }
}
