//! Configuration management for rJolokia-Input
//!
//! Handles loading and validating configuration from YAML files.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Error parsing the configuration file
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Context root used to compose the Jolokia read URL
    #[serde(default = "default_context")]
    pub context: String,

    /// URL scheme (http or https)
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Servers exposing the Jolokia read service
    #[serde(default)]
    pub servers: Vec<ServerConfig>,

    /// Metrics collected on every server
    #[serde(default)]
    pub metrics: Vec<MetricConfig>,
}

/// A Jolokia endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Identifying name, emitted as the `server` tag
    pub name: String,

    /// Host name or address
    pub host: String,

    /// Port, kept as configured text since it is also emitted as a tag
    #[serde(deserialize_with = "deserialize_port")]
    pub port: String,

    /// Optional username for basic auth
    #[serde(default)]
    pub username: Option<String>,

    /// Optional password for basic auth
    #[serde(default)]
    pub password: Option<String>,
}

/// A JMX attribute path to read from every server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Metric name, used as the field prefix for non-grouped responses
    pub name: String,

    /// JMX path appended to the context root
    pub jmx: String,

    /// Response holds several MBeans that should become separate measurements
    #[serde(default, alias = "MultipleMBeans", alias = "multipleMBeans")]
    pub multiple_mbeans: bool,

    /// Measurement name to emit instead of `jolokia`
    #[serde(default, alias = "SeriesNameOverride")]
    pub series_name_override: Option<String>,
}

/// Measurement name used when a metric has no override
pub const DEFAULT_SERIES_NAME: &str = "jolokia";

impl MetricConfig {
    /// Measurement name emitted for this metric
    pub fn series_name(&self) -> &str {
        match self.series_name_override.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_SERIES_NAME,
        }
    }
}

impl ServerConfig {
    /// Basic auth credentials, present when either username or password is non-empty
    pub fn credentials(&self) -> Option<(String, String)> {
        let username = self.username.clone().unwrap_or_default();
        let password = self.password.clone().unwrap_or_default();

        if username.is_empty() && password.is_empty() {
            None
        } else {
            Some((username, password))
        }
    }
}

/// Accepts `port: 8080` as well as `port: "8080"`
fn deserialize_port<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u64),
        Text(String),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Number(n) => n.to_string(),
        Port::Text(s) => s,
    })
}

// Default value functions
fn default_context() -> String {
    "/jolokia/read".to_string()
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_timeout() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context: default_context(),
            scheme: default_scheme(),
            timeout_ms: default_timeout(),
            servers: Vec::new(),
            metrics: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated
    ///
    /// # Note
    /// - If the file doesn't exist, returns `ConfigError::ReadError`
    /// - Use `Config::load_or_default()` if you want fallback to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file, falling back to defaults if not found
    ///
    /// The default configuration has no servers and no metrics, so a sweep
    /// over it emits nothing.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        Self::load(path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.context.starts_with('/') {
            return Err(ConfigError::ValidationError(
                "Context must start with '/'".to_string(),
            ));
        }

        if self.scheme != "http" && self.scheme != "https" {
            return Err(ConfigError::ValidationError(format!(
                "Unsupported scheme '{}', expected 'http' or 'https'",
                self.scheme
            )));
        }

        if self.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        for (index, server) in self.servers.iter().enumerate() {
            if server.name.is_empty() || server.host.is_empty() || server.port.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Server at index {} must have a name, host and port",
                    index
                )));
            }
        }

        for (index, metric) in self.metrics.iter().enumerate() {
            if metric.name.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "Metric at index {} must have a name",
                    index
                )));
            }
            if !metric.jmx.starts_with('/') {
                return Err(ConfigError::ValidationError(format!(
                    "JMX path of metric '{}' must start with '/'",
                    metric.name
                )));
            }
        }

        Ok(())
    }
}
