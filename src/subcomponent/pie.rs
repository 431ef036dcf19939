use super::{ChartCore, ChartSubcomponent, Dimensions, Subcomponent};
use crate::backend::ChartBackend;
use crate::data_types::{ChartConfig, ChartMetadata, ChartProfile, Point, Value};
use crate::listener::SharedListener;
use eyre::Result;

/// Edge of the smallest square a pie is drawn into.
pub const MIN_PIE_SIZE: f32 = 200.0;

pub struct PieSubcomponent {
    core: ChartCore,
}

impl PieSubcomponent {
    pub fn new(config: ChartConfig, backend: Box<dyn ChartBackend>, listener: SharedListener) -> Self {
        Self {
            core: ChartCore::new(ChartProfile::pie(), config, backend, listener),
        }
    }
}

impl Subcomponent for PieSubcomponent {
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
            width: MIN_PIE_SIZE,
            height: MIN_PIE_SIZE,
        }
    }

    fn is_horizontal(&self) -> bool {
        false
    }
}

impl ChartSubcomponent for PieSubcomponent {
    fn core(&self) -> &ChartCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ChartCore {
        &mut self.core
    }
}
