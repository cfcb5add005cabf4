use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileDataConfig {
    pub dir: Option<PathBuf>,
    pub base_url: Option<String>,
    pub h2: Option<PathBuf>,
    pub lih: Option<PathBuf>,
    pub noise: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileControlConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub initial: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileAnimationConfig {
    pub fps: Option<f64>,
    pub frames: Option<usize>,
    pub start_clock: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub data: Option<FileDataConfig>,
    pub control: Option<FileControlConfig>,
    pub animation: Option<FileAnimationConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kebab_case_sections() {
        let config = FileConfig::from_toml(
            r#"
            [data]
            base-url = "http://localhost:5173"

            [control]
            initial = 1.0

            [animation]
            start-clock = 2.5
            "#,
        )
        .unwrap();

        assert_eq!(
            config.data.unwrap().base_url.as_deref(),
            Some("http://localhost:5173")
        );
        assert_eq!(config.control.unwrap().initial, Some(1.0));
        assert_eq!(config.animation.unwrap().start_clock, Some(2.5));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(FileConfig::from_toml("[control]\nminimum = 0.1\n").is_err());
        assert!(FileConfig::from_toml("[render]\nfps = 30\n").is_err());
    }

    #[test]
    fn from_file_reports_the_path_on_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[control\n").unwrap();

        match FileConfig::from_file(&path) {
            Err(CliError::FileParsing { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }
}
