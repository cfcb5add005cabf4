use super::config::ConfigError;
use crate::core::data::tabular::TabularError;
use thiserror::Error;

/// Why a dataset could not be loaded into a slot.
///
/// The store never propagates these out of a load; they are logged and reported as
/// the reason of a retained outcome.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read '{location}': {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },

    #[error("Failed to fetch '{location}': {message}")]
    Fetch { location: String, message: String },

    #[error("Failed to parse '{location}': {source}")]
    Parse {
        location: String,
        source: TabularError,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Renderer failed at frame {frame}: {message}")]
    Render { frame: u64, message: String },
}
