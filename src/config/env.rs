//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "QA_AUTOMATION";

/// Overrides read from `QA_AUTOMATION_*` variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// QA_AUTOMATION_API_URL
    pub api_url: Option<String>,
    /// QA_AUTOMATION_UI_URL
    pub ui_url: Option<String>,
    /// QA_AUTOMATION_EMAIL
    pub email: Option<String>,
    /// QA_AUTOMATION_PASSWORD
    pub password: Option<String>,
    /// QA_AUTOMATION_HEADLESS
    pub headless: Option<bool>,
    /// QA_AUTOMATION_WAIT_TIMEOUT
    pub wait_timeout: Option<u64>,
    /// QA_AUTOMATION_FORMAT
    pub format: Option<String>,
    /// QA_AUTOMATION_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from the process environment
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));

        Self {
            api_url: get("API_URL"),
            ui_url: get("UI_URL"),
            email: get("EMAIL"),
            password: get("PASSWORD"),
            headless: get("HEADLESS").map(|v| parse_bool(&v)),
            wait_timeout: get("WAIT_TIMEOUT").and_then(|v| v.parse().ok()),
            format: get("FORMAT"),
            config_file: get("CONFIG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.api_url.is_some()
            || self.ui_url.is_some()
            || self.email.is_some()
            || self.password.is_some()
            || self.headless.is_some()
            || self.wait_timeout.is_some()
            || self.format.is_some()
            || self.config_file.is_some()
    }

    /// Print current environment configuration (password masked)
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {ENV_PREFIX}_API_URL:      {:?}", self.api_url);
        println!("  {ENV_PREFIX}_UI_URL:       {:?}", self.ui_url);
        println!("  {ENV_PREFIX}_EMAIL:        {:?}", self.email);
        println!(
            "  {ENV_PREFIX}_PASSWORD:     {}",
            if self.password.is_some() { "<set>" } else { "None" }
        );
        println!("  {ENV_PREFIX}_HEADLESS:     {:?}", self.headless);
        println!("  {ENV_PREFIX}_WAIT_TIMEOUT: {:?}", self.wait_timeout);
        println!("  {ENV_PREFIX}_FORMAT:       {:?}", self.format);
        println!("  {ENV_PREFIX}_CONFIG:       {:?}", self.config_file);
    }
}

fn parse_bool(v: &str) -> bool {
    matches!(
        v.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}

/// Print all QA_AUTOMATION environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_API_URL       API base URL (e.g. https://api.example.com/v1)");
    println!("  {ENV_PREFIX}_UI_URL        Web application base URL");
    println!("  {ENV_PREFIX}_EMAIL         Login email for both suites");
    println!("  {ENV_PREFIX}_PASSWORD      Login password for both suites");
    println!("  {ENV_PREFIX}_HEADLESS      Run the browser headless (true/false)");
    println!("  {ENV_PREFIX}_WAIT_TIMEOUT  Explicit wait window in seconds");
    println!("  {ENV_PREFIX}_FORMAT        Output format (table, json, csv, summary)");
    println!("  {ENV_PREFIX}_CONFIG        Path to configuration file");
    println!("  RUST_LOG                   Log filter (overrides --verbose)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_API_URL=http://localhost:8080/v1");
    println!("  qa-automation api");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.api_url.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_from_lookup() {
        let config = EnvConfig::from_lookup(lookup(&[
            ("QA_AUTOMATION_API_URL", "http://10.0.0.1/v1"),
            ("QA_AUTOMATION_WAIT_TIMEOUT", "5"),
            ("QA_AUTOMATION_HEADLESS", "no"),
        ]));

        assert_eq!(config.api_url.as_deref(), Some("http://10.0.0.1/v1"));
        assert_eq!(config.wait_timeout, Some(5));
        assert_eq!(config.headless, Some(false));
        assert!(config.has_any());
    }

    #[test]
    fn test_unparseable_timeout_ignored() {
        let config = EnvConfig::from_lookup(lookup(&[("QA_AUTOMATION_WAIT_TIMEOUT", "soon")]));
        assert!(config.wait_timeout.is_none());
    }

    #[test]
    fn test_env_bool_parsing() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("off"));
    }
}
