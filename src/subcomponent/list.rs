use super::{Dimensions, Subcomponent};
use crate::data_types::{AxisType, ChartMetadata, HeatMode, ListConfig, Point, SortField, Value};
use crate::input::ListClick;
use crate::listener::SharedListener;
use crate::utils::date_formatter::Granularity;
use crate::utils::{format_number, format_value};
use eyre::Result;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Number of heat classes, `heat-1` through `heat-5`.
pub const HEAT_BANDS: u8 = 5;
const ROW_HEIGHT: f32 = 24.0;
const MIN_LIST_WIDTH: f32 = 150.0;

/// One rendered row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListEntry {
    pub group: String,
    pub value: Value,
    pub label: String,
    pub count: Option<f64>,
    /// Whether the count is printed next to the label.
    pub show_count: bool,
    pub heat: Option<u8>,
    pub active: bool,
}

impl ListEntry {
    /// Printed count, `None` when counts are hidden or missing.
    pub fn count_label(&self) -> Option<String> {
        self.count.filter(|_| self.show_count).map(format_number)
    }

    pub fn css_class(&self) -> String {
        let mut classes = Vec::new();
        if let Some(heat) = self.heat {
            classes.push(format!("heat-{heat}"));
        }
        if self.active {
            classes.push("active".to_string());
        }
        classes.join(" ")
    }

    fn matches(&self, group: &str, value: &Value) -> bool {
        self.group == group && self.value.key() == value.key()
    }
}

#[derive(Clone, Debug, PartialEq)]
struct SelectedRow {
    group: String,
    value: Value,
}

/// Clickable list of aggregated values. Rows are the drawn points, sorted
/// by the configured field and optionally heat-banded.
pub struct ListSubcomponent {
    config: ListConfig,
    listener: SharedListener,
    points: Vec<Point>,
    x_axis: AxisType,
    entries: Vec<ListEntry>,
    selected: Vec<SelectedRow>,
    generation: u64,
}

impl ListSubcomponent {
    pub fn new(config: ListConfig, listener: SharedListener) -> Self {
        Self {
            config,
            listener,
            points: Vec::new(),
            x_axis: AxisType::default(),
            entries: Vec::new(),
            selected: Vec::new(),
            generation: 0,
        }
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// Bumped every time the rows are rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_selected(&self, group: &str, value: &Value) -> bool {
        self.selected
            .iter()
            .any(|s| s.group == group && s.value.key() == value.key())
    }

    /// Selected `(group, value)` pairs in click order.
    pub fn selection(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.selected.iter().map(|s| (s.group.as_str(), &s.value))
    }

    /// Handles a row click. Returns false when the row was already selected
    /// and nothing happened.
    pub fn handle_click(&mut self, click: &ListClick) -> bool {
        if self.is_selected(&click.group, &click.value) {
            trace!(group = %click.group, value = %click.value, "row already selected");
            return false;
        }

        let accumulate = click.modifiers.accumulates();
        if !accumulate {
            self.selected.clear();
            for entry in &mut self.entries {
                entry.active = false;
            }
        }
        self.selected.push(SelectedRow {
            group: click.group.clone(),
            value: click.value.clone(),
        });
        for entry in &mut self.entries {
            if entry.matches(&click.group, &click.value) {
                entry.active = true;
            }
        }

        debug!(group = %click.group, value = %click.value, accumulate, "list row selected");
        self.listener
            .lock()
            .subcomponent_requests_filter(&click.group, &click.value, accumulate);
        true
    }

    fn rebuild(&mut self) {
        let mut entries: Vec<ListEntry> = self
            .points
            .iter()
            .map(|point| ListEntry {
                group: point.group.clone(),
                value: point.x.clone(),
                label: format_value(&point.x, self.x_axis, Granularity::default()),
                count: point.aggregation.or_else(|| point.y.as_f64()),
                show_count: self.config.show_counts,
                heat: None,
                active: false,
            })
            .collect();

        match self.config.sort_field {
            SortField::Aggregation => entries.sort_by(|a, b| {
                b.count
                    .partial_cmp(&a.count)
                    .unwrap_or(Ordering::Equal)
            }),
            SortField::Value => entries.sort_by(|a, b| a.value.compare(&b.value)),
        }

        let bands = heat_bands(&entries, self.config.heat, self.config.sort_field);
        for (entry, heat) in entries.iter_mut().zip(bands) {
            entry.heat = heat;
            entry.active = self
                .selected
                .iter()
                .any(|s| entry.matches(&s.group, &s.value));
        }

        self.entries = entries;
        self.generation += 1;
    }
}

/// Heat class per row, in row order.
///
/// Rank mode splits the rows into five equal runs by position. Value mode
/// splits the observed count range into five equal intervals. Either band
/// runs upward with position or count, and the ramp is reversed when the
/// rows are sorted by aggregation.
pub fn heat_bands(entries: &[ListEntry], mode: HeatMode, sort_field: SortField) -> Vec<Option<u8>> {
    let orient = |band: u8| match sort_field {
        SortField::Aggregation => HEAT_BANDS + 1 - band,
        SortField::Value => band,
    };
    match mode {
        HeatMode::None => vec![None; entries.len()],
        HeatMode::Rank => {
            let divisor = entries.len() as f64 / f64::from(HEAT_BANDS);
            (0..entries.len())
                .map(|rank| Some(orient(band_for(rank as f64, divisor))))
                .collect()
        }
        HeatMode::Value => {
            let counts = entries.iter().filter_map(|e| e.count);
            let (min, max) = counts.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
                (lo.min(c), hi.max(c))
            });
            let divisor = (max - min) / f64::from(HEAT_BANDS);
            entries
                .iter()
                .map(|e| e.count.map(|c| orient(band_for(c - min, divisor))))
                .collect()
        }
    }
}

fn band_for(offset: f64, divisor: f64) -> u8 {
    if divisor.is_nan() || divisor <= 0.0 || !offset.is_finite() {
        return 1;
    }
    ((offset / divisor).floor() as u8).saturating_add(1).min(HEAT_BANDS)
}

impl Subcomponent for ListSubcomponent {
    fn draw(&mut self, points: &[Point], meta: &ChartMetadata) -> Result<()> {
        debug!(rows = points.len(), "drawing list");
        self.points = points.to_vec();
        self.x_axis = meta.x_axis;
        self.rebuild();
        Ok(())
    }

    fn destroy(&mut self) {
        self.entries.clear();
    }

    fn redraw(&mut self) -> Result<()> {
        self.rebuild();
        Ok(())
    }

    /// Selects every row whose value is in `values`, whatever its group.
    fn select(&mut self, values: &[Value]) -> Result<()> {
        let selected = self
            .points
            .iter()
            .filter(|p| values.iter().any(|v| v.key() == p.x.key()))
            .map(|p| SelectedRow {
                group: p.group.clone(),
                value: p.x.clone(),
            })
            .collect();
        self.selected = selected;
        self.rebuild();
        Ok(())
    }

    fn deselect(&mut self) -> Result<()> {
        self.selected.clear();
        self.rebuild();
        Ok(())
    }

    fn minimum_dimensions(&self) -> Dimensions {
        Dimensions {
            width: MIN_LIST_WIDTH,
            height: ROW_HEIGHT * self.entries.len().clamp(1, 5) as f32,
        }
    }

    fn is_horizontal(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(count: f64) -> ListEntry {
        ListEntry {
            group: "g".to_string(),
            value: Value::from(count),
            label: count.to_string(),
            count: Some(count),
            show_count: true,
            heat: None,
            active: false,
        }
    }

    #[test]
    fn test_value_bands_span_the_range() {
        let entries: Vec<_> = [0.0, 20.0, 40.0, 60.0, 80.0, 100.0].into_iter().map(entry).collect();
        let bands = heat_bands(&entries, HeatMode::Value, SortField::Value);
        assert_eq!(
            bands,
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(5)]
        );
        let flipped = heat_bands(&entries, HeatMode::Value, SortField::Aggregation);
        assert_eq!(
            flipped,
            vec![Some(5), Some(4), Some(3), Some(2), Some(1), Some(1)]
        );
    }

    #[test]
    fn test_rank_bands_flip_with_sort_field() {
        let entries: Vec<_> = (0..10).map(|i| entry(i as f64)).collect();
        let by_aggregation = heat_bands(&entries, HeatMode::Rank, SortField::Aggregation);
        let by_value = heat_bands(&entries, HeatMode::Rank, SortField::Value);
        assert_eq!(by_aggregation[0], Some(5));
        assert_eq!(by_aggregation[9], Some(1));
        assert_eq!(by_value[0], Some(1));
        assert_eq!(by_value[9], Some(5));
    }

    #[test]
    fn test_flat_values_share_one_band() {
        let entries: Vec<_> = [7.0, 7.0, 7.0].into_iter().map(entry).collect();
        let bands = heat_bands(&entries, HeatMode::Value, SortField::Value);
        assert!(bands.iter().all(|b| *b == Some(1)));
    }

    #[test]
    fn test_css_class() {
        let mut row = entry(1.0);
        assert_eq!(row.css_class(), "");
        row.heat = Some(3);
        row.active = true;
        assert_eq!(row.css_class(), "heat-3 active");
    }
}
