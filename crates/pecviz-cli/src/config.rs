//! Layered CLI configuration: built-in defaults, then the TOML file, then `-S`
//! settings, then explicit command-line flags.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{CliOverrides, build_config};
pub use models::{AppConfig, DataBase, DataLocations};
