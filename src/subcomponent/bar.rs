use super::{category_dimensions, ChartCore, ChartSubcomponent, Dimensions, Subcomponent};
use crate::backend::ChartBackend;
use crate::data_types::{ChartConfig, ChartMetadata, ChartProfile, Point, Value};
use crate::listener::SharedListener;
use eyre::Result;

/// Grouped bars, one bar per group and x value. Clicks select items.
pub struct BarSubcomponent {
    core: ChartCore,
}

impl BarSubcomponent {
    pub fn new(config: ChartConfig, backend: Box<dyn ChartBackend>, listener: SharedListener) -> Self {
        let profile = ChartProfile::bar(config.horizontal);
        Self::with_profile(profile, config, backend, listener)
    }

    pub(super) fn with_profile(
        profile: ChartProfile,
        config: ChartConfig,
        backend: Box<dyn ChartBackend>,
        listener: SharedListener,
    ) -> Self {
        Self {
            core: ChartCore::new(profile, config, backend, listener),
        }
    }
}

impl Subcomponent for BarSubcomponent {
    fn draw(&mut self, points: &[Point], meta: &ChartMetadata) -> Result<()> {
        self.core.draw(points, meta.clone())
    }

    fn destroy(&mut self) {
        self.core.destroy();
    }

    fn redraw(&mut self) -> Result<()> {
        self.core.render()
    }

    fn select(&mut self, values: &[Value]) -> Result<()> {
        self.core.select(values)
    }

    fn deselect(&mut self) -> Result<()> {
        self.core.deselect()
    }

    fn minimum_dimensions(&self) -> Dimensions {
        category_dimensions(self.core.meta().x_list.len(), self.is_horizontal())
    }

    fn is_horizontal(&self) -> bool {
        self.core.profile().horizontal
    }
}

impl ChartSubcomponent for BarSubcomponent {
    fn core(&self) -> &ChartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ChartCore {
        &mut self.core
    }
}
