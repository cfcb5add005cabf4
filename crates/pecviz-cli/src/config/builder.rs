use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, DataBase, DataLocations};
use crate::cli::{DataSourceArgs, SettingsArgs};
use crate::error::{CliError, Result};
use pecviz::engine::config as core_config;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Values given directly on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub sources: DataSourceArgs,
    pub bond_length: Option<f64>,
    pub fps: Option<f64>,
    pub frames: Option<usize>,
    pub start_clock: Option<f64>,
}

impl From<&DataSourceArgs> for CliOverrides {
    fn from(sources: &DataSourceArgs) -> Self {
        Self {
            sources: sources.clone(),
            ..Default::default()
        }
    }
}

/// Merges defaults, the config file, `-S` settings and CLI flags, in that order.
///
/// Without `--config`, `default_config` is read when it exists.
pub fn build_config(
    settings: &SettingsArgs,
    overrides: &CliOverrides,
    default_config: Option<&Path>,
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match (&settings.config, default_config) {
        (Some(path), _) => FileConfig::from_file(path)?,
        (None, Some(path)) if path.exists() => {
            debug!("Using default config file at {:?}", path);
            FileConfig::from_file(path)?
        }
        _ => FileConfig::default(),
    };
    let file_config = apply_set_values(file_config, &settings.set_values)?;

    let data_file = file_config.data.unwrap_or_default();
    let control_file = file_config.control.unwrap_or_default();
    let animation_file = file_config.animation.unwrap_or_default();
    let cli = &overrides.sources;

    let base = match (&cli.data_dir, &cli.base_url) {
        (Some(dir), _) => DataBase::Dir(dir.clone()),
        (None, Some(url)) => DataBase::Url(url.clone()),
        (None, None) => match (data_file.dir, data_file.base_url) {
            (Some(dir), _) => DataBase::Dir(dir),
            (None, Some(url)) => DataBase::Url(url),
            (None, None) => DataBase::Dir(defaults.data_dir.clone()),
        },
    };
    let data = DataLocations {
        base,
        h2: cli.h2.clone().or(data_file.h2),
        lih: cli.lih.clone().or(data_file.lih),
        noise: cli.noise.clone().or(data_file.noise),
    };

    let mut builder = core_config::VisualizerConfigBuilder::new()
        .bond_length_min(control_file.min.unwrap_or(defaults.control.min))
        .bond_length_max(control_file.max.unwrap_or(defaults.control.max))
        .bond_length_step(control_file.step.unwrap_or(defaults.control.step))
        .initial_bond_length(
            overrides
                .bond_length
                .or(control_file.initial)
                .unwrap_or(defaults.control.initial),
        )
        .fps(
            overrides
                .fps
                .or(animation_file.fps)
                .unwrap_or(defaults.animation.fps),
        )
        .frames(
            overrides
                .frames
                .or(animation_file.frames)
                .unwrap_or(defaults.animation.frames),
        );
    if let Some(clock) = overrides.start_clock.or(animation_file.start_clock) {
        builder = builder.start_clock(clock);
    }

    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig { data, core_config })
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "data.dir" => {
                config.data.get_or_insert_with(Default::default).dir =
                    Some(PathBuf::from(value_str));
            }
            "data.base-url" => {
                config.data.get_or_insert_with(Default::default).base_url =
                    Some(value_str.to_string());
            }
            "data.h2" => {
                config.data.get_or_insert_with(Default::default).h2 =
                    Some(PathBuf::from(value_str));
            }
            "data.lih" => {
                config.data.get_or_insert_with(Default::default).lih =
                    Some(PathBuf::from(value_str));
            }
            "data.noise" => {
                config.data.get_or_insert_with(Default::default).noise =
                    Some(PathBuf::from(value_str));
            }
            "control.min" => {
                config.control.get_or_insert_with(Default::default).min =
                    Some(parse_value(key, value_str, "float")?);
            }
            "control.max" => {
                config.control.get_or_insert_with(Default::default).max =
                    Some(parse_value(key, value_str, "float")?);
            }
            "control.step" => {
                config.control.get_or_insert_with(Default::default).step =
                    Some(parse_value(key, value_str, "float")?);
            }
            "control.initial" => {
                config.control.get_or_insert_with(Default::default).initial =
                    Some(parse_value(key, value_str, "float")?);
            }
            "animation.fps" => {
                config.animation.get_or_insert_with(Default::default).fps =
                    Some(parse_value(key, value_str, "float")?);
            }
            "animation.frames" => {
                config.animation.get_or_insert_with(Default::default).frames =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "animation.start-clock" => {
                config
                    .animation
                    .get_or_insert_with(Default::default)
                    .start_clock = Some(parse_value(key, value_str, "float")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
