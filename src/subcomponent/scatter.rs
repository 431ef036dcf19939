use super::{ChartCore, ChartSubcomponent, Dimensions, Subcomponent, MIN_CHART_SIZE};
use crate::backend::ChartBackend;
use crate::data_types::{ChartConfig, ChartMetadata, ChartProfile, Point, Value};
use crate::listener::SharedListener;
use eyre::Result;

/// Points placed by both axes. Drags select a rectangle.
pub struct ScatterSubcomponent {
    core: ChartCore,
}

impl ScatterSubcomponent {
    pub fn new(config: ChartConfig, backend: Box<dyn ChartBackend>, listener: SharedListener) -> Self {
        Self {
            core: ChartCore::new(ChartProfile::scatter(), config, backend, listener),
        }
    }
}

impl Subcomponent for ScatterSubcomponent {
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

impl ChartSubcomponent for ScatterSubcomponent {
    fn core(&self) -> &ChartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ChartCore {
        &mut self.core
    }
}
