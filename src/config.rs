use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_RAW_PATH, DEFAULT_SOURCE_URL,
};
use crate::error::{EtlError, Result};

/// What to do when a single drink fails to transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecordErrorPolicy {
    /// Leave the drink out of the output and keep going
    #[default]
    Skip,
    /// Fail the whole batch; no output file is written
    Abort,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub transform: TransformConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub raw_path: PathBuf,
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            raw_path: PathBuf::from(DEFAULT_RAW_PATH),
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub on_record_error: RecordErrorPolicy,
}

impl Config {
    /// Load configuration from `$COCKTAIL_ETL_CONFIG` or `config.toml`.
    ///
    /// A missing default file yields the built-in defaults; a missing file
    /// named explicitly through the environment is an error.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim())),
            _ => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.source.url.trim().is_empty() {
            return Err(EtlError::Config("source.url must not be empty".to_string()));
        }
        Ok(config)
    }
}
