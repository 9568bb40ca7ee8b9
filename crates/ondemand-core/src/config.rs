//! Launcher configuration: which service in which cluster to wake.
//!
//! Built once at process start (from the environment, a TOML file, or CLI
//! flags) and handed to the activator. Nothing below this layer reads the
//! environment.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_CLUSTER: &str = "minecraft";
pub const DEFAULT_SERVICE: &str = "minecraft-server";

pub const REGION_VAR: &str = "REGION";
pub const CLUSTER_VAR: &str = "CLUSTER";
pub const SERVICE_VAR: &str = "SERVICE";

/// Errors raised while assembling an [`ActivatorConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config field `{0}` must not be empty")]
    Empty(&'static str),

    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The (region, cluster, service) triple the activator operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivatorConfig {
    pub region: String,
    pub cluster: String,
    pub service: String,
}

/// On-disk layout: everything lives under an optional `[target]` table.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    target: Option<TargetSection>,
}

#[derive(Debug, Default, Deserialize)]
struct TargetSection {
    region: Option<String>,
    cluster: Option<String>,
    service: Option<String>,
}

impl Default for ActivatorConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            cluster: DEFAULT_CLUSTER.to_string(),
            service: DEFAULT_SERVICE.to_string(),
        }
    }
}

impl ActivatorConfig {
    /// Read `REGION`, `CLUSTER` and `SERVICE` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injected lookup.
    ///
    /// Unset and blank variables both fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::default().with_overrides(
            lookup(REGION_VAR).as_deref(),
            lookup(CLUSTER_VAR).as_deref(),
            lookup(SERVICE_VAR).as_deref(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file with an optional `[target]` table.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let target = file.target.unwrap_or_default();
        let config = Self::default().with_overrides(
            target.region.as_deref(),
            target.cluster.as_deref(),
            target.service.as_deref(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Replace fields with any non-blank override; blanks are ignored.
    pub fn with_overrides(
        mut self,
        region: Option<&str>,
        cluster: Option<&str>,
        service: Option<&str>,
    ) -> Self {
        if let Some(region) = non_blank(region) {
            self.region = region;
        }
        if let Some(cluster) = non_blank(cluster) {
            self.cluster = cluster;
        }
        if let Some(service) = non_blank(service) {
            self.service = service;
        }
        self
    }

    /// Every field must be non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::Empty("region"));
        }
        if self.cluster.trim().is_empty() {
            return Err(ConfigError::Empty("cluster"));
        }
        if self.service.trim().is_empty() {
            return Err(ConfigError::Empty("service"));
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
