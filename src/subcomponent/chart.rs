use crate::backend::ChartBackend;
use crate::chart_options::{ChartLayout, ChartOptions};
use crate::data_types::{ChartConfig, ChartMetadata, ChartProfile, Point, SelectedLabels, Value};
use crate::dataset::{create_chart_data_and_options, ChartData};
use crate::input::PointerEvent;
use crate::listener::SharedListener;
use crate::selection::{GestureContext, SelectionGesture};
use crate::text::{ApproxTextMeasurer, CachedMeasurer, TextMeasurer};
use eyre::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// State and behavior shared by every chart variant: the last drawn points,
/// the derived chart data, and the selection gesture feeding the listener.
pub struct ChartCore {
    profile: ChartProfile,
    config: ChartConfig,
    backend: Box<dyn ChartBackend>,
    listener: SharedListener,
    measurer: Arc<dyn TextMeasurer>,
    gesture: SelectionGesture,
    points: Vec<Point>,
    meta: ChartMetadata,
    data: ChartData,
    options: Option<ChartOptions>,
}

impl ChartCore {
    pub fn new(
        profile: ChartProfile,
        config: ChartConfig,
        backend: Box<dyn ChartBackend>,
        listener: SharedListener,
    ) -> Self {
        let measurer: Arc<dyn TextMeasurer> = match listener.lock().hidden_canvas() {
            Some(canvas) => Arc::new(CachedMeasurer::new(canvas)),
            None => Arc::new(ApproxTextMeasurer::default()),
        };
        let mode = config.select_mode.unwrap_or(profile.default_select_mode);
        Self {
            profile,
            config,
            backend,
            listener,
            measurer,
            gesture: SelectionGesture::new(mode),
            points: Vec::new(),
            meta: ChartMetadata::default(),
            data: ChartData::default(),
            options: None,
        }
    }

    pub fn profile(&self) -> &ChartProfile {
        &self.profile
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn meta(&self) -> &ChartMetadata {
        &self.meta
    }

    /// Chart data of the last successful render.
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    pub fn options(&self) -> Option<&ChartOptions> {
        self.options.as_ref()
    }

    pub fn backend(&self) -> &dyn ChartBackend {
        self.backend.as_ref()
    }

    pub fn gesture(&self) -> &SelectionGesture {
        &self.gesture
    }

    pub fn selected_labels(&self) -> &SelectedLabels {
        self.gesture.selected_labels()
    }

    pub fn draw(&mut self, points: &[Point], meta: ChartMetadata) -> Result<()> {
        info!(
            kind = ?self.profile.kind,
            points = points.len(),
            groups = meta.groups.len(),
            "drawing chart"
        );
        self.points = points.to_vec();
        self.meta = meta;
        self.render()
    }

    /// Destroys the backend chart and builds it again from the stored points.
    pub fn render(&mut self) -> Result<()> {
        self.backend.destroy();
        let (width, height) = self.backend.size();
        let (data, options) = create_chart_data_and_options(
            &self.points,
            &self.meta,
            self.gesture.selected_labels(),
            &self.profile,
            &self.config,
            ChartLayout { width, height },
            self.measurer.as_ref(),
        );
        if let Err(err) = self.backend.render(&data, &options) {
            warn!(%err, kind = ?self.profile.kind, "chart render failed");
            return Err(err.wrap_err(format!("failed to render {:?} chart", self.profile.kind)));
        }
        self.data = data;
        self.options = Some(options);
        Ok(())
    }

    pub fn destroy(&mut self) {
        self.backend.destroy();
        self.gesture.deselect_all();
        self.data = ChartData::default();
        self.options = None;
    }

    pub fn select(&mut self, values: &[Value]) -> Result<()> {
        debug!(count = values.len(), "selecting values");
        self.gesture.select_labels(values.iter().cloned());
        self.render()
    }

    pub fn deselect(&mut self) -> Result<()> {
        self.gesture.deselect_all();
        self.render()
    }

    /// Feeds one pointer event to the selection gesture. Events without hit
    /// elements are hit-tested against the rendered chart first.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        let tested;
        let event = if event.hits.is_empty() && self.backend.is_rendered() {
            tested = event
                .clone()
                .with_hits(self.backend.hit_test(event.x, event.y));
            &tested
        } else {
            event
        };

        let ctx = GestureContext {
            backend: self.backend.as_ref(),
            data: &self.data,
            meta: &self.meta,
            horizontal: self.profile.horizontal,
            granularity: self.config.granularity,
        };
        self.gesture.handle(event, &ctx, &self.listener);
    }

    /// Resizes the canvas and lays the chart out again for the new size.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        if self.backend.size() == (width, height) {
            return Ok(());
        }
        debug!(width, height, "resizing chart");
        self.backend.resize(width, height);
        if !self.backend.is_rendered() {
            return Ok(());
        }
        self.render()
    }
}
