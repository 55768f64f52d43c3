//! Configuration management for the itinerary planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::ItineraryError;
use ::config::{Config, Environment, File};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Root configuration structure for the itinerary planner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Language model (Azure OpenAI deployment) configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chat-completion provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: Option<String>,
    /// Deployment identifier
    #[serde(default = "default_llm_deployment")]
    pub deployment: String,
    /// API version sent with every request
    #[serde(default = "default_llm_api_version")]
    pub api_version: String,
    /// API key
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u32,
    /// Sampling temperature, provider default when unset
    pub temperature: Option<f32>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_llm_deployment() -> String {
    "gpt-4o".to_string()
}

fn default_llm_api_version() -> String {
    "2023-03-15-preview".to_string()
}

fn default_llm_timeout() -> u32 {
    120
}

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            deployment: default_llm_deployment(),
            api_version: default_llm_api_version(),
            api_key: None,
            timeout_seconds: default_llm_timeout(),
            temperature: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, then `ITINERARY_*` variables
    ///
    /// Without an explicit path the per-user config file is tried, then
    /// `config.toml` in the working directory.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(::config::FileFormat::Toml),
            );
        }

        // ITINERARY_LLM__API_KEY, ITINERARY_SERVER__PORT, ...
        builder = builder.add_source(
            Environment::with_prefix("ITINERARY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_provider_env();
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nepal-itinerary").join("config.toml"))
    }

    /// Fill missing credentials from the provider's conventional variables
    pub fn apply_provider_env(&mut self) {
        if self.llm.endpoint.is_none() {
            self.llm.endpoint = env::var("AZURE_OPENAI_ENDPOINT").ok();
        }
        if self.llm.api_key.is_none() {
            self.llm.api_key = env::var("AZURE_OPENAI_API_KEY").ok();
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.llm.deployment.is_empty() {
            self.llm.deployment = default_llm_deployment();
        }
        if self.llm.api_version.is_empty() {
            self.llm.api_version = default_llm_api_version();
        }
        if self.llm.timeout_seconds == 0 {
            self.llm.timeout_seconds = default_llm_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_llm()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate language model settings
    pub fn validate_llm(&self) -> Result<()> {
        if let Some(endpoint) = &self.llm.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ItineraryError::config(
                    "Language model endpoint must be a valid HTTP or HTTPS URL",
                )
                .into());
            }
        }

        if let Some(api_key) = &self.llm.api_key {
            if api_key.trim().is_empty() {
                return Err(ItineraryError::config(
                    "Language model API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        if self.llm.timeout_seconds > 600 {
            return Err(
                ItineraryError::config("Language model timeout cannot exceed 600 seconds").into(),
            );
        }

        if let Some(temperature) = self.llm.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ItineraryError::config(
                    "Language model temperature must be between 0.0 and 2.0",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ItineraryError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ItineraryError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // Tests that touch process environment run one at a time.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.llm.deployment, "gpt-4o");
        assert_eq!(config.llm.api_version, "2023-03-15-preview");
        assert_eq!(config.llm.timeout_seconds, 120);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, "static");
        assert_eq!(config.logging.level, "info");
        assert!(config.llm.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_endpoint() {
        let mut config = AppConfig::default();
        config.llm.endpoint = Some("my-resource.openai.azure.com".to_string());
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("HTTP or HTTPS"));
    }

    #[test]
    fn test_config_validation_blank_api_key() {
        let mut config = AppConfig::default();
        config.llm.api_key = Some("   ".to_string());
        assert!(config.validate_llm().is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = AppConfig::default();
        config.llm.timeout_seconds = 900;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = AppConfig::default();
        config.llm.temperature = Some(3.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = AppConfig::default();
        config.llm.deployment.clear();
        config.llm.timeout_seconds = 0;
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.llm.deployment, "gpt-4o");
        assert_eq!(config.llm.timeout_seconds, 120);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = env_lock();
        let file = write_toml(
            r#"
[llm]
endpoint = "https://example.openai.azure.com"
deployment = "gpt-4o-mini"
api_key = "secret-key"

[server]
port = 9090
"#,
        );

        let config = AppConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(
            config.llm.endpoint.as_deref(),
            Some("https://example.openai.azure.com")
        );
        assert_eq!(config.llm.deployment, "gpt-4o-mini");
        assert_eq!(config.llm.api_version, "2023-03-15-preview");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
    }

    #[test]
    fn test_prefixed_env_overrides_toml() {
        let _guard = env_lock();
        let file = write_toml(
            r#"
[llm]
endpoint = "https://example.openai.azure.com"
api_key = "secret-key"

[server]
port = 9090
"#,
        );

        unsafe {
            env::set_var("ITINERARY_SERVER__PORT", "7070");
            env::set_var("ITINERARY_LLM__DEPLOYMENT", "gpt-4o-env");
        }
        let result = AppConfig::load_from_path(Some(file.path().to_path_buf()));
        unsafe {
            env::remove_var("ITINERARY_SERVER__PORT");
            env::remove_var("ITINERARY_LLM__DEPLOYMENT");
        }

        let config = result.unwrap();
        assert_eq!(config.server.port, 7070);
        assert_eq!(config.llm.deployment, "gpt-4o-env");
        assert_eq!(config.llm.api_key.as_deref(), Some("secret-key"));
    }

    #[test]
    fn test_provider_env_fills_missing_credentials_only() {
        let _guard = env_lock();
        unsafe {
            env::set_var("AZURE_OPENAI_ENDPOINT", "https://fallback.openai.azure.com");
            env::set_var("AZURE_OPENAI_API_KEY", "fallback-key");
        }

        let mut missing = AppConfig::default();
        missing.apply_provider_env();

        let mut configured = AppConfig::default();
        configured.llm.endpoint = Some("https://configured.openai.azure.com".to_string());
        configured.llm.api_key = Some("configured-key".to_string());
        configured.apply_provider_env();

        unsafe {
            env::remove_var("AZURE_OPENAI_ENDPOINT");
            env::remove_var("AZURE_OPENAI_API_KEY");
        }

        assert_eq!(
            missing.llm.endpoint.as_deref(),
            Some("https://fallback.openai.azure.com")
        );
        assert_eq!(missing.llm.api_key.as_deref(), Some("fallback-key"));
        assert_eq!(
            configured.llm.endpoint.as_deref(),
            Some("https://configured.openai.azure.com")
        );
        assert_eq!(configured.llm.api_key.as_deref(), Some("configured-key"));
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = AppConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("nepal-itinerary"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
