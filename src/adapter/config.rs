//! Configuration
//!
//! フラグ、環境変数、設定ファイルから設定を解決する
//!
//! 優先順位: フラグ > 環境変数 > 設定ファイル > デフォルト値
//! （フラグと環境変数は clap が解決し、`ConfigOverrides` として渡される）

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::auth::Credentials;

pub const DEFAULT_API_URL: &str = "https://ipfs.infura.io:5001";
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/ipfs-upload/config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("parameter --{0} is required")]
    MissingParameter(&'static str),
    #[error("failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported cid_version {0} (expected 0 or 1)")]
    InvalidCidVersion(u8),
}

/// Contents of the JSON config file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub project_id: Option<String>,
    pub project_secret: Option<String>,
    pub api_url: Option<String>,
    pub pin: Option<bool>,
    pub progress: Option<bool>,
    pub hidden: Option<bool>,
    pub cid_version: Option<u8>,
}

impl FileConfig {
    /// Load a config file. `~` is expanded.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let path = expand_path(path);
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Load the default config file, or an empty config if it does not exist
    pub fn load_default() -> Result<Self, ConfigError> {
        if expand_path(DEFAULT_CONFIG_PATH).exists() {
            Self::load(DEFAULT_CONFIG_PATH)
        } else {
            Ok(Self::default())
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub project_id: Option<String>,
    pub project_secret: Option<String>,
    pub api_url: Option<String>,
    pub pin: Option<bool>,
    pub progress: Option<bool>,
    pub hidden: bool,
    pub config_path: Option<String>,
}

/// Fully resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub api_url: String,
    pub pin: bool,
    pub progress: bool,
    pub hidden: bool,
    pub cid_version: Option<u8>,
}

impl Config {
    /// Read the config file named by the overrides (or the default one) and merge
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let file = match overrides.config_path.as_deref() {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::load_default()?,
        };
        Self::merge(overrides, file)
    }

    /// Merge overrides on top of a config file. Empty strings count as unset.
    pub fn merge(overrides: &ConfigOverrides, file: FileConfig) -> Result<Self, ConfigError> {
        let project_id = pick(overrides.project_id.clone(), file.project_id)
            .ok_or(ConfigError::MissingParameter("id"))?;
        let project_secret = pick(overrides.project_secret.clone(), file.project_secret)
            .ok_or(ConfigError::MissingParameter("secret"))?;
        let api_url = pick(overrides.api_url.clone(), file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        if let Some(version) = file.cid_version {
            if version > 1 {
                return Err(ConfigError::InvalidCidVersion(version));
            }
        }

        Ok(Self {
            credentials: Credentials::new(project_id, project_secret),
            api_url,
            pin: overrides.pin.or(file.pin).unwrap_or(true),
            progress: overrides.progress.or(file.progress).unwrap_or(true),
            hidden: overrides.hidden || file.hidden.unwrap_or(false),
            cid_version: file.cid_version,
        })
    }
}

fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.filter(|s| !s.is_empty()))
}

/// Expands tilde in path
pub fn expand_path(path: &str) -> PathBuf {
    Path::new(shellexpand::tilde(path).as_ref()).to_path_buf()
}
