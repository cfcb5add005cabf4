use pecviz::engine::config::{AnimationConfig, ControlConfig};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub data_dir: PathBuf,
    pub control: ControlConfig,
    pub animation: AnimationConfig,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            control: ControlConfig::default(),
            animation: AnimationConfig::default(),
        }
    }
}
