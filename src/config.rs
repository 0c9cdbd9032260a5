use crate::variant::ProjectVariant;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "tester.toml";
pub const CONFIG_ENV_VAR: &str = "TESTER_CONFIG";

// TOML STRUCTURE

/// Optional overrides read from `tester.toml`
#[derive(Deserialize, Default, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub program: Option<String>,
    pub time_limit_secs: Option<u64>,
    pub report_char_limit: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub parallel: Option<bool>,
}

#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Summary,
    Tap,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FailedToReadFile { path: PathBuf, source: io::Error },
    #[error("Failed to parse config file '{path}': {source}")]
    FailedToParseTomlConfig {
        path: PathBuf,
        source: toml::de::Error,
    },
}

// READ CONFIG FILE

/// Locate the config file: `$TESTER_CONFIG` if set, else `tester.toml` in
/// `current_dir` if it exists
pub fn locate_config_file(current_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    let path = current_dir.join(DEFAULT_CONFIG_FILE);
    path.is_file().then_some(path)
}

pub fn parse_toml_config(path: &Path) -> Result<TomlConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::FailedToReadFile {
        path: path.to_owned(),
        source,
    })?;

    from_str(&content).map_err(|source| ConfigError::FailedToParseTomlConfig {
        path: path.to_owned(),
        source,
    })
}

pub fn from_str(content: &str) -> Result<TomlConfig, toml::de::Error> {
    toml::from_str(content)
}

pub fn load(current_dir: &Path) -> Result<TomlConfig, ConfigError> {
    match locate_config_file(current_dir) {
        Some(path) => {
            debug!(path = %path.display(), "reading config file");
            parse_toml_config(&path)
        }
        None => Ok(TomlConfig::default()),
    }
}

// APPLY TO VARIANT

/// Settings of a run, after the config file has been merged over the
/// variant's defaults
#[derive(Debug)]
pub struct RunnerConfig {
    pub variant: ProjectVariant,
    pub output_format: OutputFormat,
    pub parallel: bool,
}

impl TomlConfig {
    pub fn apply(self, base_variant: ProjectVariant) -> RunnerConfig {
        let variant = ProjectVariant {
            program: self.program.unwrap_or(base_variant.program),
            time_limit: self
                .time_limit_secs
                .map(Duration::from_secs)
                .or(base_variant.time_limit),
            report_char_limit: self.report_char_limit.or(base_variant.report_char_limit),
            ..base_variant
        };

        RunnerConfig {
            variant,
            output_format: self.output_format.unwrap_or_default(),
            parallel: self.parallel.unwrap_or(false),
        }
    }
}
