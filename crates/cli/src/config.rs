//! Runtime configuration from environment variables.

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use purific_observability::LogFormat;
use purific_simulator::contact::DEFAULT_RECIPIENT;

pub const ENV_DATA_DIR: &str = "PURIFIC_DATA_DIR";
pub const ENV_CONTACT_NUMBER: &str = "PURIFIC_CONTACT_NUMBER";
pub const ENV_LOG_FORMAT: &str = "PURIFIC_LOG_FORMAT";
pub const ENV_IN_MEMORY: &str = "PURIFIC_IN_MEMORY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Storage directory; `None` means the OS app data directory.
    pub data_dir: Option<PathBuf>,
    /// Messaging recipient for the order link.
    pub contact_number: String,
    pub log_format: LogFormat,
    /// Keep the catalog in memory only (nothing read or written on disk).
    pub in_memory: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            contact_number: DEFAULT_RECIPIENT.to_string(),
            log_format: LogFormat::default(),
            in_memory: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset or blank variables keep defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(ENV_DATA_DIR) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(number) = get(ENV_CONTACT_NUMBER) {
            let number = number.trim().trim_start_matches('+').to_string();
            if !number.chars().all(|c| c.is_ascii_digit()) {
                return Err(anyhow!(
                    "{ENV_CONTACT_NUMBER} must contain digits only, got '{number}'"
                ));
            }
            config.contact_number = number;
        }

        if let Some(format) = get(ENV_LOG_FORMAT) {
            config.log_format = format
                .parse()
                .map_err(|e: String| anyhow!(e))
                .with_context(|| format!("invalid {ENV_LOG_FORMAT}"))?;
        }

        if let Some(flag) = get(ENV_IN_MEMORY) {
            config.in_memory = parse_flag(&flag)
                .with_context(|| format!("invalid {ENV_IN_MEMORY}"))?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected a boolean, got '{other}'")),
    }
}
