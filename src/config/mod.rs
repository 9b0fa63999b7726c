//! Configuration module
//!
//! Handles loading and layering configuration: file, then environment,
//! then command-line flags.

mod env;

pub use env::{print_env_help, EnvConfig};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::output::OutputFormat;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./qa-automation.yaml",
    "./qa-automation.yml",
    "./.qa-automation.yaml",
    "~/.config/qa-automation/config.yaml",
];

/// Upper bound for `api.max_requests`
pub const MAX_RATE_LIMIT_REQUESTS: u32 = 100_000;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,

    /// Console output format (table, json, json-pretty, csv, summary)
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "table".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            ui: UiConfig::default(),
            format: default_format(),
        }
    }
}

/// API suite settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the version prefix
    pub base_url: String,

    /// Login used by the Users fixture and the login scenarios
    pub email: String,
    pub password: String,

    /// Requests allowed before the rate limit is expected to trip
    pub max_requests: u32,

    /// Pause between rate-limit probes in milliseconds
    pub rate_limit_pause_ms: u64,

    /// Sequential requests in the load scenario
    pub load_requests: u32,

    /// HTML report path
    pub report: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.example.com/v1".to_string(),
            email: "testuser@example.com".to_string(),
            password: "Test@1234".to_string(),
            max_requests: 100,
            rate_limit_pause_ms: 100,
            load_requests: 50,
            report: PathBuf::from("api_test_report.html"),
        }
    }
}

/// Browser suite settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,

    /// Explicit wait window in seconds
    pub wait_timeout_secs: u64,

    pub window_width: u32,
    pub window_height: u32,
    pub headless: bool,

    /// Chrome/Chromium executable; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,

    /// HTML report path
    pub report: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://qa.example.com".to_string(),
            username: "testuser@example.com".to_string(),
            password: "Test@1234".to_string(),
            wait_timeout_secs: 10,
            window_width: 1920,
            window_height: 1080,
            headless: true,
            chrome_executable: None,
            report: PathBuf::from("report.html"),
        }
    }
}

impl AppConfig {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|location| expand_path(location))
            .find(|path| path.exists())
    }

    /// Resolve configuration: explicit path, `QA_AUTOMATION_CONFIG`, standard
    /// locations, defaults; then apply environment overrides
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_with(explicit, &EnvConfig::load())
    }

    /// Resolve against a given set of environment overrides
    pub fn resolve_with(explicit: Option<&Path>, env: &EnvConfig) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env.config_file.as_ref().map(PathBuf::from))
            .or_else(Self::find);

        let mut config = match path {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };

        if env.has_any() {
            debug!("Applying QA_AUTOMATION_* environment overrides");
        }
        config.apply_env(env);
        config
            .validate()
            .context("Invalid configuration after environment overrides")?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("api", &self.api.base_url), ("ui", &self.ui.base_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("Invalid {name}.base_url '{url}': expected http(s) URL");
            }
        }

        if self.ui.wait_timeout_secs == 0 {
            anyhow::bail!("ui.wait_timeout_secs must be greater than zero");
        }

        if self.api.max_requests > MAX_RATE_LIMIT_REQUESTS {
            anyhow::bail!(
                "api.max_requests must be at most {MAX_RATE_LIMIT_REQUESTS}, got {}",
                self.api.max_requests
            );
        }

        if self.api.load_requests == 0 {
            anyhow::bail!("api.load_requests must be greater than zero");
        }

        if OutputFormat::from_str(&self.format).is_none() {
            anyhow::bail!("Unknown output format: {}", self.format);
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(url) = &env.api_url {
            self.api.base_url = url.clone();
        }
        if let Some(url) = &env.ui_url {
            self.ui.base_url = url.clone();
        }
        if let Some(email) = &env.email {
            self.api.email = email.clone();
            self.ui.username = email.clone();
        }
        if let Some(password) = &env.password {
            self.api.password = password.clone();
            self.ui.password = password.clone();
        }
        if let Some(headless) = env.headless {
            self.ui.headless = headless;
        }
        if let Some(timeout) = env.wait_timeout {
            self.ui.wait_timeout_secs = timeout;
        }
        if let Some(format) = &env.format {
            self.format = format.clone();
        }
    }
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
