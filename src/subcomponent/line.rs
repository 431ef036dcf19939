use super::{ChartCore, ChartSubcomponent, Dimensions, Subcomponent, MIN_CHART_SIZE};
use crate::backend::ChartBackend;
use crate::data_types::{ChartConfig, ChartMetadata, ChartProfile, Point, Value};
use crate::listener::SharedListener;
use eyre::Result;

/// One line per group over a continuous x-axis. Drags select an x-domain.
pub struct LineSubcomponent {
    core: ChartCore,
}

impl LineSubcomponent {
    pub fn new(config: ChartConfig, backend: Box<dyn ChartBackend>, listener: SharedListener) -> Self {
        Self {
            core: ChartCore::new(ChartProfile::line(), config, backend, listener),
        }
    }
}

impl Subcomponent for LineSubcomponent {
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
        Dimensions {
            width: MIN_CHART_SIZE,
            height: MIN_CHART_SIZE,
        }
    }

    fn is_horizontal(&self) -> bool {
        false
    }
}

impl ChartSubcomponent for LineSubcomponent {
    fn core(&self) -> &ChartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ChartCore {
        &mut self.core
    }
}
