use super::{BarSubcomponent, ChartCore, ChartSubcomponent, Dimensions, Subcomponent};
use crate::backend::ChartBackend;
use crate::data_types::{ChartConfig, ChartMetadata, ChartProfile, Point, Value};
use crate::listener::SharedListener;
use eyre::Result;
use tracing::debug;

/// Bars over a continuous x-domain with every bucket present, including
/// the empty ones. Drags select a domain.
pub struct HistogramSubcomponent {
    bars: BarSubcomponent,
}

impl HistogramSubcomponent {
    pub fn new(config: ChartConfig, backend: Box<dyn ChartBackend>, listener: SharedListener) -> Self {
        let profile = ChartProfile::histogram(config.horizontal);
        Self {
            bars: BarSubcomponent::with_profile(profile, config, backend, listener),
        }
    }
}

impl Subcomponent for HistogramSubcomponent {
    fn draw(&mut self, points: &[Point], meta: &ChartMetadata) -> Result<()> {
        let filled = meta.with_filled_x_domain(self.bars.core().config().granularity);
        if filled.x_list.len() != meta.x_list.len() {
            debug!(
                from = meta.x_list.len(),
                to = filled.x_list.len(),
                "filled histogram domain"
            );
        }
        self.bars.core_mut().draw(points, filled)
    }

    fn destroy(&mut self) {
        self.bars.destroy();
    }

    fn redraw(&mut self) -> Result<()> {
        self.bars.redraw()
    }

    fn select(&mut self, values: &[Value]) -> Result<()> {
        self.bars.select(values)
    }

    fn deselect(&mut self) -> Result<()> {
        self.bars.deselect()
    }

    fn minimum_dimensions(&self) -> Dimensions {
        self.bars.minimum_dimensions()
    }

    fn is_horizontal(&self) -> bool {
        self.bars.is_horizontal()
    }
}

impl ChartSubcomponent for HistogramSubcomponent {
    fn core(&self) -> &ChartCore {
        self.bars.core()
    }

    fn core_mut(&mut self) -> &mut ChartCore {
        self.bars.core_mut()
    }
}
