//! Pointer-driven selection over a rendered chart.
//!
//! One [`SelectionGesture`] serves one subcomponent and answers to a single
//! [`SelectMode`]. Hover events (down, move, up, over, out) drive the drag
//! modes; clicks drive item selection. A drag turns into exactly one filter
//! request when the buttons are released.
//!
//! Two latches guard the drag modes until every button is up:
//! - cancel: a second button pressed mid-drag abandons the selection;
//! - ignore: the pointer entered the chart with a button already held.

use crate::backend::ChartBackend;
use crate::data_types::{AxisType, ChartMetadata, Gesture, SelectMode, SelectedLabels, Value};
use crate::dataset::ChartData;
use crate::input::{PointerEvent, PointerKind, PRIMARY_BUTTON};
use crate::listener::SharedListener;
use crate::utils::date_formatter::Granularity;
use chrono::DateTime;
use tracing::{debug, trace, warn};

/// What the state machine may look at while handling an event.
pub struct GestureContext<'a> {
    pub backend: &'a dyn ChartBackend,
    pub data: &'a ChartData,
    pub meta: &'a ChartMetadata,
    /// Category axis drawn vertically.
    pub horizontal: bool,
    pub granularity: Granularity,
}

#[derive(Clone, Debug)]
pub struct SelectionGesture {
    mode: SelectMode,
    gesture: Gesture,
    cancel_select: bool,
    ignore_select: bool,
    selected: SelectedLabels,
}

impl SelectionGesture {
    pub fn new(mode: SelectMode) -> Self {
        Self {
            mode,
            gesture: Gesture::None,
            cancel_select: false,
            ignore_select: false,
            selected: SelectedLabels::new(),
        }
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn selected_labels(&self) -> &SelectedLabels {
        &self.selected
    }

    /// True while a cancelled or ignored drag waits for the buttons to be released.
    pub fn is_latched(&self) -> bool {
        self.cancel_select || self.ignore_select
    }

    /// Replaces the highlighted values, e.g. when a filter is set elsewhere.
    pub fn select_labels(&mut self, values: impl IntoIterator<Item = Value>) {
        self.selected.replace(values);
    }

    /// Drops the highlight and any drag in progress.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
        self.gesture = Gesture::None;
    }

    pub fn handle(&mut self, event: &PointerEvent, ctx: &GestureContext<'_>, listener: &SharedListener) {
        match (self.mode, event.kind) {
            (SelectMode::Item, PointerKind::Click) => self.handle_item(event, ctx, listener),
            (SelectMode::Item, _) | (_, PointerKind::Click) => {}
            (SelectMode::Domain, _) => self.handle_domain(event, ctx, listener),
            (SelectMode::Bounds, _) => self.handle_bounds(event, ctx, listener, false),
            (SelectMode::BoundsDomain, _) => self.handle_bounds(event, ctx, listener, true),
        }
    }

    fn handle_item(&mut self, event: &PointerEvent, ctx: &GestureContext<'_>, listener: &SharedListener) {
        let Some(hit) = event.hits.first() else {
            return;
        };
        let (Some(dataset), Some(value)) = (
            ctx.data.datasets.get(hit.dataset_index),
            ctx.data.keys.get(hit.index),
        ) else {
            warn!(?hit, "hit element outside the chart data");
            return;
        };

        let accumulate = event.modifiers.accumulates();
        if accumulate {
            self.selected.toggle(value.clone());
        } else {
            self.selected.replace([value.clone()]);
        }
        debug!(group = %dataset.label, %value, accumulate, "item selected");
        listener
            .lock()
            .subcomponent_requests_filter(&dataset.label, value, accumulate);
    }

    /// Shared prologue of the drag modes. Returns true when the event is consumed.
    fn guard(&mut self, event: &PointerEvent, listener: &SharedListener) -> bool {
        if event.kind == PointerKind::Over && event.buttons > 0 {
            if !self.ignore_select {
                debug!("pointer entered with a button held; ignoring until release");
            }
            self.ignore_select = true;
            return true;
        }
        if event.buttons == 0 {
            // Release is handled by the caller unless a latch swallows it.
            if self.is_latched() {
                self.cancel_select = false;
                self.ignore_select = false;
                self.gesture = Gesture::None;
                return true;
            }
            return false;
        }
        if self.is_latched() {
            return true;
        }
        if event.buttons > PRIMARY_BUTTON {
            if self.gesture.is_active() {
                self.cancel(event, listener);
            }
            return true;
        }
        false
    }

    fn cancel(&mut self, event: &PointerEvent, listener: &SharedListener) {
        debug!(buttons = event.buttons, "selection cancelled");
        self.selected.clear();
        self.gesture = Gesture::None;
        self.cancel_select = true;
        let mut listener = listener.lock();
        listener.subcomponent_requests_deselect();
        listener.subcomponent_requests_redraw(Some(event));
    }

    fn handle_domain(&mut self, event: &PointerEvent, ctx: &GestureContext<'_>, listener: &SharedListener) {
        if self.guard(event, listener) {
            return;
        }

        if event.buttons == 0 {
            if let Gesture::Domain {
                begin_index,
                end_index,
                ..
            } = std::mem::take(&mut self.gesture)
            {
                self.resolve_domain(begin_index, end_index, ctx, listener);
            }
            return;
        }

        let Some(hit) = event.hits.first() else {
            return;
        };
        let (center, extent) = if ctx.horizontal {
            (hit.y, hit.height)
        } else {
            (hit.x, hit.width)
        };
        match &mut self.gesture {
            Gesture::Domain {
                end_index, end_x, ..
            } => {
                *end_index = hit.index;
                *end_x = center;
            }
            _ => {
                debug!(index = hit.index, "domain selection started");
                if !event.modifiers.accumulates() {
                    self.selected.clear();
                }
                self.gesture = Gesture::Domain {
                    begin_index: hit.index,
                    begin_x: center,
                    end_index: hit.index,
                    end_x: center,
                };
            }
        }
        if let Some(key) = ctx.data.keys.get(hit.index) {
            self.selected.insert(key.clone());
        }

        let Gesture::Domain { begin_x, end_x, .. } = self.gesture else {
            return;
        };
        // The highlight reaches one element width past each end of the range.
        let low = begin_x.min(end_x) - extent;
        let span = (begin_x - end_x).abs() + 2.0 * extent;
        let area = ctx.backend.chart_area();
        let (x, y, width, height) = if ctx.horizontal {
            (area.left, low, area.width(), span)
        } else {
            (low, area.top, span, area.height())
        };
        trace!(x, y, width, height, "domain selection moved");
        let mut listener = listener.lock();
        listener.subcomponent_requests_select(x, y, width, height);
        listener.subcomponent_requests_redraw(Some(event));
    }

    fn resolve_domain(
        &self,
        begin_index: usize,
        end_index: usize,
        ctx: &GestureContext<'_>,
        listener: &SharedListener,
    ) {
        let (low, high) = (begin_index.min(end_index), begin_index.max(end_index));
        let (Some(begin), Some(end)) = (ctx.data.keys.get(low), ctx.data.keys.get(high)) else {
            warn!(low, high, "domain selection outside the chart data");
            return;
        };
        let begin = typed_domain_value(begin, ctx.meta.x_axis, ctx.granularity, false);
        let end = typed_domain_value(end, ctx.meta.x_axis, ctx.granularity, true);
        debug!(%begin, %end, "domain selection released");
        listener
            .lock()
            .subcomponent_requests_filter_on_domain(&begin, &end, false);
    }

    fn handle_bounds(
        &mut self,
        event: &PointerEvent,
        ctx: &GestureContext<'_>,
        listener: &SharedListener,
        domain_only: bool,
    ) {
        if self.guard(event, listener) {
            return;
        }

        if event.buttons == 0 {
            if let Gesture::Bounds {
                begin_x,
                begin_y,
                end_x,
                end_y,
            } = std::mem::take(&mut self.gesture)
            {
                self.resolve_bounds((begin_x, begin_y), (end_x, end_y), ctx, listener, domain_only);
            }
            return;
        }

        let area = ctx.backend.chart_area();
        let (x, y) = area.clamp(event.x, event.y);
        match &mut self.gesture {
            Gesture::Bounds { end_x, end_y, .. } => {
                *end_x = x;
                *end_y = y;
            }
            _ => {
                debug!(x, y, "bounds selection started");
                if !event.modifiers.accumulates() {
                    self.selected.clear();
                }
                self.gesture = Gesture::Bounds {
                    begin_x: x,
                    begin_y: y,
                    end_x: x,
                    end_y: y,
                };
            }
        }
        if domain_only {
            if let Gesture::Bounds { begin_y, end_y, .. } = &mut self.gesture {
                *begin_y = area.top;
                *end_y = area.bottom;
            }
        }
        for hit in &event.hits {
            if let Some(key) = ctx.data.keys.get(hit.index) {
                self.selected.insert(key.clone());
            }
        }

        let Gesture::Bounds {
            begin_x,
            begin_y,
            end_x,
            end_y,
        } = self.gesture
        else {
            return;
        };
        let (x, y) = (begin_x.min(end_x), begin_y.min(end_y));
        let (width, height) = ((begin_x - end_x).abs(), (begin_y - end_y).abs());
        trace!(x, y, width, height, "bounds selection moved");
        let mut listener = listener.lock();
        listener.subcomponent_requests_select(x, y, width, height);
        listener.subcomponent_requests_redraw(Some(event));
    }

    fn resolve_bounds(
        &self,
        begin: (f32, f32),
        end: (f32, f32),
        ctx: &GestureContext<'_>,
        listener: &SharedListener,
        domain_only: bool,
    ) {
        let backend = ctx.backend;
        let (x1, x2) = typed_range(
            backend.x_value_at(begin.0),
            backend.x_value_at(end.0),
            ctx.meta.x_axis,
            &ctx.meta.x_list,
        );
        let mut listener = listener.lock();
        if domain_only {
            debug!(%x1, %x2, "bounds-domain selection released");
            listener.subcomponent_requests_filter_on_domain(&x1, &x2, false);
            return;
        }
        let (y1, y2) = typed_range(
            backend.y_value_at(begin.1),
            backend.y_value_at(end.1),
            ctx.meta.y_axis,
            &ctx.meta.y_list,
        );
        debug!(%x1, %y1, %x2, %y2, "bounds selection released");
        listener.subcomponent_requests_filter_on_bounds(&x1, &y1, &x2, &y2, false);
    }
}

/// Types a domain boundary for its axis. Date ends are pushed to the last
/// second of their bucket so a single bucket still spans its whole range.
fn typed_domain_value(value: &Value, axis: AxisType, granularity: Granularity, is_end: bool) -> Value {
    match axis {
        AxisType::Date => match value.as_date() {
            Some(date) if is_end => Value::Date(granularity.bucket_end(date)),
            Some(date) => Value::Date(granularity.bucket_start(date)),
            None => value.clone(),
        },
        AxisType::Number => value.as_f64().map_or_else(|| value.clone(), Value::Number),
        AxisType::String => value.clone(),
    }
}

/// Converts two inverted pixel positions into an ordered pair of typed values.
/// String axes snap to the nearest category of `list`.
fn typed_range(a: f64, b: f64, axis: AxisType, list: &[Value]) -> (Value, Value) {
    let (low, high) = (a.min(b), a.max(b));
    match axis {
        AxisType::String if !list.is_empty() => {
            let snap = |v: f64| v.round().clamp(0.0, (list.len() - 1) as f64) as usize;
            (list[snap(low)].clone(), list[snap(high)].clone())
        }
        AxisType::Date => {
            let date = |v: f64| {
                DateTime::from_timestamp_millis(v.round() as i64).map_or(Value::Number(v), Value::Date)
            };
            (date(low), date(high))
        }
        _ => (Value::Number(low), Value::Number(high)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ranges_snap_and_order() {
        let list: Vec<Value> = vec!["a".into(), "b".into(), "c".into()];
        let (lo, hi) = typed_range(2.4, -0.7, AxisType::String, &list);
        assert_eq!(lo, Value::from("a"));
        assert_eq!(hi, Value::from("c"));
    }

    #[test]
    fn number_domain_values_parse_formatted_labels() {
        let v = typed_domain_value(&Value::from("1,250"), AxisType::Number, Granularity::Day, false);
        assert_eq!(v, Value::Number(1250.0));
    }
}
