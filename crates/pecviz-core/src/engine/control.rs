use super::config::ControlConfig;
use tokio::sync::watch;
use tracing::{debug, trace};

/// The bond-length slider: a bounded, stepped scalar with change notification.
#[derive(Debug)]
pub struct BondLengthControl {
    config: ControlConfig,
    value: watch::Sender<f64>,
}

impl BondLengthControl {
    /// Creates a control starting at `config.initial`, snapped onto the step grid.
    pub fn new(config: ControlConfig) -> Self {
        let initial = snap(&config, config.initial);
        Self {
            config,
            value: watch::Sender::new(initial),
        }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn get(&self) -> f64 {
        *self.value.borrow()
    }

    /// Moves the control, clamping into range and snapping to the nearest step.
    ///
    /// Non-finite input is ignored. Returns the value actually held afterwards.
    pub fn set(&self, requested: f64) -> f64 {
        if !requested.is_finite() {
            debug!(requested, "Ignoring non-finite bond length");
            return self.get();
        }
        let value = snap(&self.config, requested);
        let changed = self.value.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
        if changed {
            trace!(bond_length = value, "Bond length changed");
        }
        value
    }

    pub fn reset(&self) -> f64 {
        self.set(self.config.initial)
    }

    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.value.subscribe()
    }
}

impl Default for BondLengthControl {
    fn default() -> Self {
        Self::new(ControlConfig::default())
    }
}

fn snap(config: &ControlConfig, value: f64) -> f64 {
    let clamped = value.clamp(config.min, config.max);
    let steps = ((clamped - config.min) / config.step).round();
    // Rounding back to 1e-9 Å removes the float noise of `min + n * step`.
    let snapped = ((config.min + steps * config.step) * 1e9).round() / 1e9;
    snapped.min(config.max)
}
