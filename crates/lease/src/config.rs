//! Lease configuration loader.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_OWNER_SCOPE_TAG: &str = "drop";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Config file is empty")]
    Empty,

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lease behavior shared by every lease a provider hands out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LeaseConfig {
    /// Label passed to the authority when allocating a transient scope.
    #[serde(default = "default_owner_scope_tag")]
    pub owner_scope_tag: String,

    /// Report leases dropped while still taken.
    #[serde(default = "default_true")]
    pub leak_detection: bool,

    /// Destroy a freshly allocated transient scope when the take under it
    /// fails, instead of leaving it to the authority.
    #[serde(default = "default_true")]
    pub discard_scope_on_failure: bool,
}

fn default_owner_scope_tag() -> String {
    DEFAULT_OWNER_SCOPE_TAG.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LeaseConfig {
    fn default() -> Self {
        Self {
            owner_scope_tag: default_owner_scope_tag(),
            leak_detection: true,
            discard_scope_on_failure: true,
        }
    }
}

impl LeaseConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.owner_scope_tag.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "owner_scope_tag must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load lease configuration from a YAML file.
///
/// Missing keys fall back to [`LeaseConfig::default`].
///
/// # Errors
/// Returns error if the file is missing, empty, not valid YAML, or names an
/// empty scope tag.
pub fn load_lease_config<P: AsRef<Path>>(config_path: P) -> Result<LeaseConfig, ConfigError> {
    let config_file = config_path.as_ref();

    if !config_file.exists() {
        return Err(ConfigError::NotFound(config_file.display().to_string()));
    }

    let content = std::fs::read_to_string(config_file)?;

    if content.trim().is_empty() {
        return Err(ConfigError::Empty);
    }

    let config: LeaseConfig = serde_yaml::from_str(&content)
        .map_err(|e| ConfigError::Invalid(format!("Invalid YAML: {}", e)))?;

    config.validate()?;
    Ok(config)
}
