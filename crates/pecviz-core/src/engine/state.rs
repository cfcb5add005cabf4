use super::config::{ControlConfig, VisualizerConfig};
use super::control::BondLengthControl;
use super::store::SeriesStore;
use crate::core::scene::composer::FrameSnapshot;
use std::sync::Arc;

/// Single owner of the mutable state of a visualizer session.
///
/// Holds the three dataset slots and the bond-length control. Everything else
/// (animation loop, chart and statistics observers) reads from here and never writes
/// anything but the control.
#[derive(Debug, Default)]
pub struct VisualizerState {
    store: SeriesStore,
    control: BondLengthControl,
}

impl VisualizerState {
    pub fn new(control: ControlConfig) -> Self {
        Self {
            store: SeriesStore::new(),
            control: BondLengthControl::new(control),
        }
    }

    pub fn from_config(config: &VisualizerConfig) -> Self {
        Self::new(config.control)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn control(&self) -> &BondLengthControl {
        &self.control
    }

    /// Reads the bond length exactly once for the frame at `clock`.
    pub fn snapshot(&self, clock: f64) -> FrameSnapshot {
        FrameSnapshot::new(clock, self.control.get())
    }
}
