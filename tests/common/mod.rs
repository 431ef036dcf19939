#![allow(dead_code)]

use eyre::Result;
use neon_chart::{
    shared, ChartArea, ChartBackend, ChartData, ChartOptions, Color, HitElement, PointerEvent,
    SharedListener, SubcomponentListener, TextMeasurer, Value,
};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Deselect,
    Filter {
        group: String,
        value: Value,
        do_not_replace: bool,
    },
    FilterOnBounds {
        x1: Value,
        y1: Value,
        x2: Value,
        y2: Value,
    },
    FilterOnDomain {
        x1: Value,
        x2: Value,
    },
    Redraw,
    Select {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub struct RecordingListener {
    calls: CallLog,
    canvas: Option<Arc<dyn TextMeasurer>>,
}

impl SubcomponentListener for RecordingListener {
    fn hidden_canvas(&self) -> Option<Arc<dyn TextMeasurer>> {
        self.canvas.clone()
    }

    fn subcomponent_requests_deselect(&mut self) {
        self.calls.lock().push(Call::Deselect);
    }

    fn subcomponent_requests_filter(&mut self, group: &str, value: &Value, do_not_replace: bool) {
        self.calls.lock().push(Call::Filter {
            group: group.to_string(),
            value: value.clone(),
            do_not_replace,
        });
    }

    fn subcomponent_requests_filter_on_bounds(
        &mut self,
        x1: &Value,
        y1: &Value,
        x2: &Value,
        y2: &Value,
        _do_not_replace: bool,
    ) {
        self.calls.lock().push(Call::FilterOnBounds {
            x1: x1.clone(),
            y1: y1.clone(),
            x2: x2.clone(),
            y2: y2.clone(),
        });
    }

    fn subcomponent_requests_filter_on_domain(&mut self, x1: &Value, x2: &Value, _do_not_replace: bool) {
        self.calls.lock().push(Call::FilterOnDomain {
            x1: x1.clone(),
            x2: x2.clone(),
        });
    }

    fn subcomponent_requests_redraw(&mut self, _event: Option<&PointerEvent>) {
        self.calls.lock().push(Call::Redraw);
    }

    fn subcomponent_requests_select(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.lock().push(Call::Select {
            x,
            y,
            width,
            height,
        });
    }
}

pub fn recording_listener() -> (SharedListener, CallLog) {
    let calls = CallLog::default();
    let listener = shared(RecordingListener {
        calls: calls.clone(),
        canvas: None,
    });
    (listener, calls)
}

pub fn recording_listener_with_canvas(canvas: Arc<dyn TextMeasurer>) -> (SharedListener, CallLog) {
    let calls = CallLog::default();
    let listener = shared(RecordingListener {
        calls: calls.clone(),
        canvas: Some(canvas),
    });
    (listener, calls)
}

pub fn count(calls: &CallLog, matches: impl Fn(&Call) -> bool) -> usize {
    calls.lock().iter().filter(|c| matches(c)).count()
}

pub fn selects(calls: &CallLog) -> usize {
    count(calls, |c| matches!(c, Call::Select { .. }))
}

pub fn redraws(calls: &CallLog) -> usize {
    count(calls, |c| matches!(c, Call::Redraw))
}

pub fn deselects(calls: &CallLog) -> usize {
    count(calls, |c| matches!(c, Call::Deselect))
}

pub fn domain_filters(calls: &CallLog) -> Vec<(Value, Value)> {
    calls
        .lock()
        .iter()
        .filter_map(|c| match c {
            Call::FilterOnDomain { x1, x2 } => Some((x1.clone(), x2.clone())),
            _ => None,
        })
        .collect()
}

pub const AREA: ChartArea = ChartArea {
    top: 5.0,
    bottom: 300.0,
    left: 5.0,
    right: 300.0,
};

/// Backend with a fixed plot area and `categories` slots on both axes.
pub struct FixedChart {
    pub categories: usize,
    pub renders: usize,
    rendered: bool,
}

impl FixedChart {
    pub fn new(categories: usize) -> Self {
        Self {
            categories,
            renders: 0,
            rendered: false,
        }
    }

    pub fn slot(&self) -> f32 {
        AREA.width() / self.categories as f32
    }

    /// Hit element at the center of category `index`.
    pub fn hit(&self, index: usize) -> HitElement {
        let slot = self.slot();
        HitElement {
            dataset_index: 0,
            index,
            x: AREA.left + slot * (index as f32 + 0.5),
            y: 150.0,
            width: slot * 0.8,
            height: 100.0,
        }
    }
}

impl ChartBackend for FixedChart {
    fn render(&mut self, _data: &ChartData, _options: &ChartOptions) -> Result<()> {
        self.renders += 1;
        self.rendered = true;
        Ok(())
    }

    fn destroy(&mut self) {
        self.rendered = false;
    }

    fn is_rendered(&self) -> bool {
        self.rendered
    }

    fn resize(&mut self, _width: f32, _height: f32) {}

    fn size(&self) -> (f32, f32) {
        (305.0, 305.0)
    }

    fn chart_area(&self) -> ChartArea {
        AREA
    }

    fn x_value_at(&self, pixel: f32) -> f64 {
        ((pixel - AREA.left) / self.slot()) as f64 - 0.5
    }

    fn y_value_at(&self, pixel: f32) -> f64 {
        ((AREA.bottom - pixel) / self.slot()) as f64 - 0.5
    }

    fn hit_test(&self, _x: f32, _y: f32) -> Vec<HitElement> {
        vec![]
    }
}

pub fn color() -> Color {
    Color { r: 0x33, g: 0x66, b: 0x99 }
}
