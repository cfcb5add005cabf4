use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Bounds and granularity of the bond-length control, in Angstroms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub initial: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            min: 0.4,
            max: 2.4,
            step: 0.005,
            initial: 0.735,
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [self.min, self.max, self.step, self.initial]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(ConfigError::InvalidValue {
                name: "control",
                reason: "all bounds must be finite".into(),
            });
        }
        if self.min >= self.max {
            return Err(ConfigError::InvalidValue {
                name: "control.min",
                reason: format!("min ({}) must be below max ({})", self.min, self.max),
            });
        }
        if self.step <= 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "control.step",
                reason: format!("step ({}) must be positive", self.step),
            });
        }
        if !(self.min..=self.max).contains(&self.initial) {
            return Err(ConfigError::InvalidValue {
                name: "control.initial",
                reason: format!(
                    "initial value ({}) must lie within [{}, {}]",
                    self.initial, self.min, self.max
                ),
            });
        }
        Ok(())
    }
}

/// Lowest accepted frame rate; one frame every ten seconds.
pub const MIN_FPS: f64 = 0.1;
/// Highest accepted frame rate; keeps the frame interval at or above one millisecond.
pub const MAX_FPS: f64 = 1000.0;

/// Frame timing of a headless animation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    pub fps: f64,
    pub frames: usize,
    pub start_clock: f64,
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.fps) {
            return Err(ConfigError::InvalidValue {
                name: "animation.fps",
                reason: format!(
                    "fps ({}) must lie within [{}, {}]",
                    self.fps, MIN_FPS, MAX_FPS
                ),
            });
        }
        if !self.start_clock.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: "animation.start-clock",
                reason: format!("start clock ({}) must be finite", self.start_clock),
            });
        }
        Ok(())
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: 60.0,
            frames: 240,
            start_clock: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualizerConfig {
    pub control: ControlConfig,
    pub animation: AnimationConfig,
}

#[derive(Default)]
pub struct VisualizerConfigBuilder {
    bond_length_min: Option<f64>,
    bond_length_max: Option<f64>,
    bond_length_step: Option<f64>,
    initial_bond_length: Option<f64>,
    fps: Option<f64>,
    frames: Option<usize>,
    start_clock: Option<f64>,
}

impl VisualizerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bond_length_min(mut self, value: f64) -> Self {
        self.bond_length_min = Some(value);
        self
    }
    pub fn bond_length_max(mut self, value: f64) -> Self {
        self.bond_length_max = Some(value);
        self
    }
    pub fn bond_length_step(mut self, value: f64) -> Self {
        self.bond_length_step = Some(value);
        self
    }
    pub fn initial_bond_length(mut self, value: f64) -> Self {
        self.initial_bond_length = Some(value);
        self
    }
    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }
    pub fn frames(mut self, frames: usize) -> Self {
        self.frames = Some(frames);
        self
    }
    pub fn start_clock(mut self, clock: f64) -> Self {
        self.start_clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<VisualizerConfig, ConfigError> {
        let control = ControlConfig {
            min: self
                .bond_length_min
                .ok_or(ConfigError::MissingParameter("bond_length_min"))?,
            max: self
                .bond_length_max
                .ok_or(ConfigError::MissingParameter("bond_length_max"))?,
            step: self
                .bond_length_step
                .ok_or(ConfigError::MissingParameter("bond_length_step"))?,
            initial: self
                .initial_bond_length
                .ok_or(ConfigError::MissingParameter("initial_bond_length"))?,
        };
        control.validate()?;

        let animation = AnimationConfig {
            fps: self.fps.ok_or(ConfigError::MissingParameter("fps"))?,
            frames: self.frames.ok_or(ConfigError::MissingParameter("frames"))?,
            start_clock: self.start_clock.unwrap_or(0.0),
        };
        animation.validate()?;

        Ok(VisualizerConfig { control, animation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> VisualizerConfigBuilder {
        VisualizerConfigBuilder::new()
            .bond_length_min(0.4)
            .bond_length_max(2.4)
            .bond_length_step(0.005)
            .initial_bond_length(0.735)
            .fps(60.0)
            .frames(120)
    }

    #[test]
    fn build_succeeds_with_all_parameters() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.control, ControlConfig::default());
        assert_eq!(config.animation.frames, 120);
        assert_eq!(config.animation.start_clock, 0.0);
    }

    #[test]
    fn build_fails_on_missing_parameter() {
        let result = VisualizerConfigBuilder::new()
            .bond_length_min(0.4)
            .bond_length_max(2.4)
            .bond_length_step(0.005)
            .fps(60.0)
            .frames(10)
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingParameter("initial_bond_length")
        );
    }

    #[test]
    fn build_rejects_inverted_range() {
        let result = complete_builder().bond_length_min(3.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "control.min", .. })
        ));
    }

    #[test]
    fn build_rejects_initial_outside_range() {
        let result = complete_builder().initial_bond_length(5.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "control.initial", .. })
        ));
    }

    #[test]
    fn build_rejects_non_positive_step_and_fps() {
        assert!(complete_builder().bond_length_step(0.0).build().is_err());
        assert!(complete_builder().fps(0.0).build().is_err());
        assert!(complete_builder().fps(f64::NAN).build().is_err());
    }

    #[test]
    fn build_rejects_fps_outside_the_supported_range() {
        for fps in [1e12, MAX_FPS * 1.5, 1e-300, MIN_FPS / 2.0, f64::INFINITY] {
            assert!(matches!(
                complete_builder().fps(fps).build(),
                Err(ConfigError::InvalidValue { name: "animation.fps", .. })
            ));
        }
        assert!(complete_builder().fps(MAX_FPS).build().is_ok());
        assert!(complete_builder().fps(MIN_FPS).build().is_ok());
    }

    #[test]
    fn build_rejects_non_finite_start_clock() {
        let result = complete_builder().start_clock(f64::NAN).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "animation.start-clock", .. })
        ));
    }

    #[test]
    fn default_animation_is_valid() {
        assert!(AnimationConfig::default().validate().is_ok());
    }

    #[test]
    fn default_control_is_valid() {
        assert!(ControlConfig::default().validate().is_ok());
    }
}
