use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};
use crate::domain::page::{PageSettings, DEFAULT_SECRET_KEY};

pub const DEFAULT_CONFIG_FILE: &str = "deploy-smoke.toml";
pub const CONFIG_FILE_ENV: &str = "SMOKE_CONFIG";
pub const ENV_PREFIX: &str = "SMOKE_";

static SECRET_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    pub secrets_file: PathBuf,
    #[validate(regex(path = *SECRET_KEY_PATTERN))]
    pub secret_key: String,
    /// Also look the secret up in the process environment.
    pub env_secrets: bool,
    /// OS keyring service to consult; unset disables the keyring layer.
    pub keyring_service: Option<String>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8501,
            secrets_file: PathBuf::from(".streamlit/secrets.toml"),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            env_secrets: true,
            keyring_service: None,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the TOML file, then the platform `PORT`, then `SMOKE_*`.
    pub fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::raw().only(&["port"]))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
    }

    pub fn load() -> Result<Self> {
        let config_file = std::env::var_os(CONFIG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::from_figment(Self::figment(&config_file))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment.extract()?;
        config
            .validate()
            .map_err(|e| AppError::Config(format!("Invalid configuration: {}", e)))?;
        Ok(config)
    }

    pub fn page_settings(&self) -> PageSettings {
        PageSettings::default().with_secret_key(self.secret_key.clone())
    }
}
