use crate::core::catalog::BaseRecord;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
pub const DEFAULT_ANALYSIS_URL: &str = "http://external-api.com:3002";
/// Slowest observed upstream answer is 2.5s.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

pub const ENV_ANALYSIS_URL: &str = "STOCKDESK_ANALYSIS_URL";
pub const ENV_TIMEOUT_MS: &str = "STOCKDESK_TIMEOUT_MS";
pub const ENV_BIND_ADDR: &str = "STOCKDESK_BIND_ADDR";

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalysisProviderConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl AnalysisProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for AnalysisProviderConfig {
    fn default() -> Self {
        AnalysisProviderConfig {
            base_url: DEFAULT_ANALYSIS_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub analysis: AnalysisProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Replaces the built-in seed catalog when present.
    pub catalog: Option<Vec<BaseRecord>>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "stockdesk", "stockdesk")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Loads the config from `path` or the default location, then applies
    /// environment overrides.
    pub fn resolve(path: Option<&str>) -> Result<Self> {
        Self::resolve_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::resolve`], with overrides taken from `lookup`.
    pub fn resolve_with<F>(path: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load()?,
        };
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make every lookup fall back.
    pub fn validate(&self) -> Result<()> {
        if self.providers.analysis.timeout_ms == 0 {
            anyhow::bail!(
                "Invalid providers.analysis.timeout_ms: must be greater than 0 (set it in the config file or {ENV_TIMEOUT_MS})"
            );
        }
        Ok(())
    }

    /// Applies overrides looked up by key; values found win over the file.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_ANALYSIS_URL) {
            debug!(%url, "Overriding analysis base url");
            self.providers.analysis.base_url = url;
        }
        if let Some(ms) = lookup(ENV_TIMEOUT_MS) {
            self.providers.analysis.timeout_ms = ms
                .trim()
                .parse()
                .with_context(|| format!("Invalid {ENV_TIMEOUT_MS}: {ms}"))?;
        }
        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            self.server.bind_addr = addr;
        }
        Ok(())
    }
}
