mod common;

use chrono::{TimeZone, Utc};
use common::{domain_filters, recording_listener, recording_listener_with_canvas, Call};
use neon_chart::subcomponent::{MIN_CATEGORY_SIZE, MIN_CHART_SIZE, MIN_PIE_SIZE};
use neon_chart::text::FontSpec;
use neon_chart::{
    BarSubcomponent, ChartConfig, ChartMetadata, ChartSubcomponent, Color, HistogramSubcomponent,
    LayoutChart, LineSubcomponent, PieSubcomponent, Point, PointerEvent, ScatterSubcomponent,
    SelectMode, Subcomponent, TextMeasurer, Value,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn letters() -> Vec<Point> {
    ["A", "B", "C", "D"]
        .iter()
        .enumerate()
        .map(|(i, x)| Point::new(*x, (i + 1) as f64, "g", common::color()))
        .collect()
}

fn backend() -> Box<LayoutChart> {
    Box::new(LayoutChart::new(400.0, 300.0))
}

/// Pixel center of category `index` on a vertical chart, just above the baseline.
fn slot_center(chart: &dyn ChartSubcomponent, index: usize) -> (f32, f32) {
    let area = chart.core().backend().chart_area();
    let slot = area.width() / chart.core().data().keys.len() as f32;
    (area.left + slot * (index as f32 + 0.5), area.bottom - 2.0)
}

#[test]
fn test_bar_click_selects_an_item() {
    let (listener, calls) = recording_listener();
    let mut bar = BarSubcomponent::new(ChartConfig::default(), backend(), listener);
    let points = letters();
    bar.draw(&points, &ChartMetadata::from_points(&points)).unwrap();
    assert!(bar.core().backend().is_rendered());
    assert_eq!(bar.core().gesture().mode(), SelectMode::Item);

    let (x, y) = slot_center(&bar, 1);
    bar.handle_pointer(&PointerEvent::click(x, y));

    assert_eq!(
        *calls.lock(),
        vec![Call::Filter {
            group: "g".to_string(),
            value: Value::from("B"),
            do_not_replace: false,
        }]
    );
    assert_eq!(bar.selected_labels().as_slice(), &[Value::from("B")]);

    bar.redraw().unwrap();
    let colors = &bar.core().data().datasets[0].background_color;
    assert_eq!(colors[0], common::color().deselected_css());
    assert_eq!(colors[1], common::color().selected_css());

    bar.deselect().unwrap();
    assert!(bar.selected_labels().is_empty());
    assert_eq!(
        bar.core().data().datasets[0].background_color[0],
        common::color().selected_css()
    );
}

#[test]
fn test_click_outside_the_plot_does_nothing() {
    let (listener, calls) = recording_listener();
    let mut bar = BarSubcomponent::new(ChartConfig::default(), backend(), listener);
    let points = letters();
    bar.draw(&points, &ChartMetadata::from_points(&points)).unwrap();

    bar.handle_pointer(&PointerEvent::click(1.0, 1.0));
    assert!(calls.lock().is_empty());
}

#[test]
fn test_select_highlights_external_values() {
    let (listener, calls) = recording_listener();
    let mut bar = BarSubcomponent::new(ChartConfig::default(), backend(), listener);
    let points = letters();
    bar.draw(&points, &ChartMetadata::from_points(&points)).unwrap();

    bar.select(&[Value::from("C"), Value::from("C"), Value::from("A")]).unwrap();
    assert_eq!(
        bar.selected_labels().as_slice(),
        &[Value::from("C"), Value::from("A")]
    );
    let colors = &bar.core().data().datasets[0].background_color;
    assert_eq!(colors[1], common::color().deselected_css());
    assert_eq!(colors[2], common::color().selected_css());
    assert!(calls.lock().is_empty());
}

#[test]
fn test_histogram_domain_drag_over_filled_days() {
    let (listener, calls) = recording_listener();
    let mut histogram = HistogramSubcomponent::new(ChartConfig::default(), backend(), listener);
    let jan = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
    let points = vec![
        Point::new(jan(1), 3.0, "g", common::color()),
        Point::new(jan(4), 5.0, "g", common::color()),
    ];
    histogram
        .draw(&points, &ChartMetadata::from_points(&points))
        .unwrap();

    let data = histogram.core().data();
    assert_eq!(data.keys.len(), 4);
    assert_eq!(data.datasets[0].data.len(), 4);
    assert_eq!(data.datasets[0].data[1].y, None);
    assert_eq!(data.labels[0], "01 Jan 2024");
    assert_eq!(histogram.core().gesture().mode(), SelectMode::Domain);

    let (x0, y0) = slot_center(&histogram, 0);
    let (x1, y1) = slot_center(&histogram, 1);
    let (x3, y3) = slot_center(&histogram, 3);
    histogram.handle_pointer(&PointerEvent::down(x0, y0));
    // The empty day has no element to hit.
    histogram.handle_pointer(&PointerEvent::drag(x1, y1));
    histogram.handle_pointer(&PointerEvent::drag(x3, y3));
    histogram.handle_pointer(&PointerEvent::up(x3, y3));

    assert_eq!(
        domain_filters(&calls),
        vec![(
            Value::Date(jan(1)),
            Value::Date(Utc.with_ymd_and_hms(2024, 1, 4, 23, 59, 59).unwrap()),
        )]
    );
    assert_eq!(
        calls
            .lock()
            .iter()
            .filter(|c| matches!(c, Call::Select { .. }))
            .count(),
        2
    );
}

#[test]
fn test_single_bucket_domain_spans_the_month() {
    let (listener, calls) = recording_listener();
    let config = ChartConfig {
        granularity: neon_chart::utils::date_formatter::Granularity::Month,
        ..ChartConfig::default()
    };
    let mut histogram = HistogramSubcomponent::new(config, backend(), listener);
    let points = vec![
        Point::new(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap(), 1.0, "g", common::color()),
        Point::new(Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap(), 2.0, "g", common::color()),
    ];
    histogram
        .draw(&points, &ChartMetadata::from_points(&points))
        .unwrap();

    let (x, y) = slot_center(&histogram, 1);
    histogram.handle_pointer(&PointerEvent::down(x, y));
    histogram.handle_pointer(&PointerEvent::up(x, y));

    assert_eq!(
        domain_filters(&calls),
        vec![(
            Value::Date(Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap()),
            Value::Date(Utc.with_ymd_and_hms(2024, 8, 31, 23, 59, 59).unwrap()),
        )]
    );
}

#[test]
fn test_pie_slices_are_hit_by_angle() {
    let (listener, calls) = recording_listener();
    let mut pie = PieSubcomponent::new(ChartConfig::default(), backend(), listener);
    let points = vec![
        Point::new("first", 1.0, "", Color::rgb(1, 1, 1)),
        Point::new("second", 1.0, "", Color::rgb(2, 2, 2)),
    ];
    pie.draw(&points, &ChartMetadata::from_points(&points)).unwrap();

    let area = pie.core().backend().chart_area();
    let (cx, cy) = (area.left + area.width() / 2.0, area.top + area.height() / 2.0);
    pie.handle_pointer(&PointerEvent::click(cx + 20.0, cy));
    pie.handle_pointer(&PointerEvent::click(cx - 20.0, cy));

    let values: Vec<Value> = calls
        .lock()
        .iter()
        .filter_map(|c| match c {
            Call::Filter { value, .. } => Some(value.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(values, vec![Value::from("first"), Value::from("second")]);
    assert_eq!(pie.minimum_dimensions().width, MIN_PIE_SIZE);
    assert_eq!(pie.minimum_dimensions().height, MIN_PIE_SIZE);
    assert!(!pie.is_horizontal());
}

#[test]
fn test_select_mode_override() {
    let (listener, _calls) = recording_listener();
    let config = ChartConfig {
        select_mode: Some(SelectMode::Bounds),
        ..ChartConfig::default()
    };
    let bar = BarSubcomponent::new(config, backend(), listener);
    assert_eq!(bar.core().gesture().mode(), SelectMode::Bounds);

    let (listener, _calls) = recording_listener();
    let scatter = ScatterSubcomponent::new(ChartConfig::default(), backend(), listener);
    assert_eq!(scatter.core().gesture().mode(), SelectMode::Bounds);

    let (listener, _calls) = recording_listener();
    let line = LineSubcomponent::new(ChartConfig::default(), backend(), listener);
    assert_eq!(line.core().gesture().mode(), SelectMode::Domain);
}

#[test]
fn test_scatter_drag_filters_on_numeric_bounds() {
    let (listener, calls) = recording_listener();
    let mut scatter = ScatterSubcomponent::new(ChartConfig::default(), backend(), listener);
    let points: Vec<Point> = (0..=10)
        .map(|i| Point::new(i as f64, (i * 10) as f64, "g", common::color()))
        .collect();
    scatter
        .draw(&points, &ChartMetadata::from_points(&points))
        .unwrap();

    let area = scatter.core().backend().chart_area();
    scatter.handle_pointer(&PointerEvent::down(area.right - 1.0, area.top + 1.0));
    scatter.handle_pointer(&PointerEvent::drag(area.left + 1.0, area.bottom - 1.0));
    scatter.handle_pointer(&PointerEvent::up(area.left + 1.0, area.bottom - 1.0));

    let bounds: Vec<(f64, f64, f64, f64)> = calls
        .lock()
        .iter()
        .filter_map(|c| match c {
            Call::FilterOnBounds { x1, y1, x2, y2 } => Some((
                x1.as_f64()?,
                y1.as_f64()?,
                x2.as_f64()?,
                y2.as_f64()?,
            )),
            _ => None,
        })
        .collect();
    assert_eq!(bounds.len(), 1);
    let (x1, y1, x2, y2) = bounds[0];
    assert!(x1 < x2 && y1 < y2);
    assert!(x1 >= 0.0 && x1 < 0.5);
    assert!(x2 > 9.5 && x2 <= 10.0);
    assert!(y1 >= 0.0 && y1 < 5.0);
    assert!(y2 > 95.0 && y2 <= 100.0);
}

#[test]
fn test_scatter_drag_reaches_every_text_category() {
    let (listener, calls) = recording_listener();
    let mut scatter = ScatterSubcomponent::new(ChartConfig::default(), backend(), listener);
    let points: Vec<Point> = ["p", "q", "r", "s", "t"]
        .iter()
        .enumerate()
        .map(|(i, y)| Point::new(if i % 2 == 0 { "A" } else { "B" }, *y, "g", common::color()))
        .collect();
    let meta = ChartMetadata::from_points(&points);
    assert_eq!(meta.y_list.len(), 5);
    scatter.draw(&points, &meta).unwrap();

    let area = scatter.core().backend().chart_area();
    scatter.handle_pointer(&PointerEvent::down(area.left + 1.0, area.bottom - 1.0));
    scatter.handle_pointer(&PointerEvent::drag(area.right - 1.0, area.top + 1.0));
    scatter.handle_pointer(&PointerEvent::up(area.right - 1.0, area.top + 1.0));

    let bounds: Vec<_> = calls
        .lock()
        .iter()
        .filter_map(|c| match c {
            Call::FilterOnBounds { x1, y1, x2, y2 } => {
                Some((x1.clone(), y1.clone(), x2.clone(), y2.clone()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        bounds,
        vec![(
            Value::from("A"),
            Value::from("p"),
            Value::from("B"),
            Value::from("t"),
        )]
    );
}

#[test]
fn test_resize_lays_the_chart_out_again() {
    let (listener, _calls) = recording_listener();
    let mut bar = BarSubcomponent::new(ChartConfig::default(), backend(), listener);
    let points = letters();
    bar.draw(&points, &ChartMetadata::from_points(&points)).unwrap();
    assert_eq!(bar.core().backend().chart_area().right, 395.0);

    bar.resize(600.0, 300.0).unwrap();
    assert_eq!(bar.core().backend().size(), (600.0, 300.0));
    assert_eq!(bar.core().backend().chart_area().right, 595.0);
}

#[test]
fn test_render_failure_is_reported() {
    let (listener, _calls) = recording_listener();
    let mut bar = BarSubcomponent::new(
        ChartConfig::default(),
        Box::new(LayoutChart::new(0.0, 0.0)),
        listener,
    );
    let points = letters();
    let err = bar
        .draw(&points, &ChartMetadata::from_points(&points))
        .unwrap_err();
    assert_eq!(err.to_string(), "failed to render Bar chart");
    assert!(!bar.core().backend().is_rendered());
}

#[test]
fn test_destroy_clears_the_chart() {
    let (listener, _calls) = recording_listener();
    let mut bar = BarSubcomponent::new(ChartConfig::default(), backend(), listener);
    let points = letters();
    bar.draw(&points, &ChartMetadata::from_points(&points)).unwrap();
    bar.select(&[Value::from("A")]).unwrap();

    bar.destroy();
    assert!(!bar.core().backend().is_rendered());
    assert!(bar.core().data().is_empty());
    assert!(bar.selected_labels().is_empty());
}

#[test]
fn test_minimum_dimensions_follow_categories() {
    let (listener, _calls) = recording_listener();
    let mut bar = BarSubcomponent::new(ChartConfig::default(), backend(), listener);
    let points: Vec<Point> = (0..10)
        .map(|i| Point::new(format!("c{i}"), 1.0, "g", common::color()))
        .collect();
    bar.draw(&points, &ChartMetadata::from_points(&points)).unwrap();
    let dims = bar.minimum_dimensions();
    assert_eq!(dims.width, 10.0 * MIN_CATEGORY_SIZE);
    assert_eq!(dims.height, MIN_CHART_SIZE);

    let (listener, _calls) = recording_listener();
    let config = ChartConfig {
        horizontal: true,
        ..ChartConfig::default()
    };
    let mut sideways = BarSubcomponent::new(config, backend(), listener);
    sideways
        .draw(&points, &ChartMetadata::from_points(&points))
        .unwrap();
    assert!(sideways.is_horizontal());
    assert_eq!(sideways.minimum_dimensions().height, 10.0 * MIN_CATEGORY_SIZE);
}

struct CountingMeasurer(AtomicUsize);

impl TextMeasurer for CountingMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        self.0.fetch_add(1, Ordering::SeqCst);
        text.len() as f32 * font.size * 0.5
    }
}

#[test]
fn test_hidden_canvas_measures_labels() {
    let canvas = Arc::new(CountingMeasurer(AtomicUsize::new(0)));
    let (listener, _calls) = recording_listener_with_canvas(canvas.clone());
    let mut bar = BarSubcomponent::new(ChartConfig::default(), backend(), listener);
    let points = letters();
    bar.draw(&points, &ChartMetadata::from_points(&points)).unwrap();

    let first = canvas.0.load(Ordering::SeqCst);
    assert!(first > 0);

    // Widths are cached across renders.
    bar.redraw().unwrap();
    assert_eq!(canvas.0.load(Ordering::SeqCst), first);
}
