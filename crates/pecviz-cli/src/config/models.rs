use pecviz::engine::config as core_config;
use pecviz::engine::store::Slot;
use std::path::PathBuf;

/// Root the well-known dataset paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataBase {
    Dir(PathBuf),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLocations {
    pub base: DataBase,
    pub h2: Option<PathBuf>,
    pub lih: Option<PathBuf>,
    pub noise: Option<PathBuf>,
}

impl DataLocations {
    /// An explicit file for `slot`, bypassing the well-known location.
    pub fn explicit(&self, slot: Slot) -> Option<&PathBuf> {
        match slot {
            Slot::H2Curve => self.h2.as_ref(),
            Slot::LihCurve => self.lih.as_ref(),
            Slot::NoiseLog => self.noise.as_ref(),
        }
    }
}

pub struct AppConfig {
    pub data: DataLocations,
    pub core_config: core_config::VisualizerConfig,
}
