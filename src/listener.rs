//! Callbacks from a subcomponent to the widget hosting it.

use crate::data_types::Value;
use crate::input::PointerEvent;
use crate::text::TextMeasurer;
use parking_lot::Mutex;
use std::sync::Arc;

/// Implemented by the hosting widget. The host decides what each request means.
pub trait SubcomponentListener: Send {
    /// Off-screen measurement surface for axis labels, if the host has one.
    fn hidden_canvas(&self) -> Option<Arc<dyn TextMeasurer>> {
        None
    }

    fn subcomponent_requests_deselect(&mut self);

    fn subcomponent_requests_filter(&mut self, group: &str, value: &Value, do_not_replace: bool);

    fn subcomponent_requests_filter_on_bounds(
        &mut self,
        x1: &Value,
        y1: &Value,
        x2: &Value,
        y2: &Value,
        do_not_replace: bool,
    );

    fn subcomponent_requests_filter_on_domain(&mut self, x1: &Value, x2: &Value, do_not_replace: bool);

    fn subcomponent_requests_redraw(&mut self, event: Option<&PointerEvent>);

    /// Pixel rectangle to highlight while a drag is in progress.
    fn subcomponent_requests_select(&mut self, x: f32, y: f32, width: f32, height: f32);
}

/// Listener handle shared between the host and its subcomponent.
pub type SharedListener = Arc<Mutex<dyn SubcomponentListener>>;

pub fn shared<L: SubcomponentListener + 'static>(listener: L) -> SharedListener {
    Arc::new(Mutex::new(listener))
}
