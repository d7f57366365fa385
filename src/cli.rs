//! CLI argument parsing for rJolokia-Input
//!
//! This module provides the command-line interface using clap derive macros.
//!
//! # Options
//!
//! - `--config` / `-c`: Configuration file path (default: jolokia.yaml, env: RJOLOKIA_CONFIG)
//! - `--context`: Jolokia context root (overrides config file, env: RJOLOKIA_CONTEXT)
//! - `--timeout-ms`: HTTP timeout in milliseconds (overrides config file, env: RJOLOKIA_TIMEOUT_MS)
//! - `--validate`: Validate configuration without contacting any server
//! - `--dry-run`: Show the request URLs a sweep would use
//! - `--strict`: Exit with an error when any request or MBean failed
//! - `--log-level` / `-l`: Log level (trace/debug/info/warn/error, env: RJOLOKIA_LOG_LEVEL)
//! - `--output-format`: Output format for measurements (line/json)
//!
//! # Precedence
//!
//! Configuration values are resolved in the following order (highest to lowest priority):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::Config;

/// rJolokia-Input - Jolokia JMX input
///
/// Reads JMX attributes from every configured server via Jolokia and
/// prints them as flat, tagged measurements.
#[derive(Parser, Debug)]
#[command(name = "rjolokia-input")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "jolokia.yaml",
        env = "RJOLOKIA_CONFIG"
    )]
    pub config: PathBuf,

    /// Jolokia context root (overrides config file)
    #[arg(long, value_name = "PATH", env = "RJOLOKIA_CONTEXT")]
    pub context: Option<String>,

    /// HTTP timeout in milliseconds (overrides config file)
    #[arg(long, value_name = "MS", env = "RJOLOKIA_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Validate configuration without contacting any server
    #[arg(long)]
    pub validate: bool,

    /// Show the request URLs a sweep would use
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with an error when any request or MBean failed
    #[arg(long)]
    pub strict: bool,

    /// Log level
    #[arg(
        short,
        long,
        value_enum,
        default_value = "info",
        env = "RJOLOKIA_LOG_LEVEL"
    )]
    pub log_level: LogLevel,

    /// Output format for measurements
    #[arg(long, value_enum, default_value = "line")]
    pub output_format: OutputFormat,
}

impl Cli {
    /// Apply CLI overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(context) = &self.context {
            config.context = context.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
    }
}

/// Log level options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Trace level - most verbose
    Trace,
    /// Debug level
    Debug,
    /// Info level - default
    Info,
    /// Warn level
    Warn,
    /// Error level - least verbose
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// InfluxDB line protocol
    Line,
    /// One JSON object per line
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Line => write!(f, "line"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Trace.to_string(), "trace");
        assert_eq!(LogLevel::Debug.to_string(), "debug");
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert_eq!(LogLevel::Error.to_string(), "error");
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Line.to_string(), "line");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["rjolokia-input"]);
        assert_eq!(cli.config, PathBuf::from("jolokia.yaml"));
        assert_eq!(cli.context, None);
        assert_eq!(cli.timeout_ms, None);
        assert!(!cli.validate);
        assert!(!cli.dry_run);
        assert!(!cli.strict);
        assert_eq!(cli.log_level, LogLevel::Info);
        assert_eq!(cli.output_format, OutputFormat::Line);
    }

    #[test]
    fn test_cli_with_options() {
        let cli = Cli::parse_from([
            "rjolokia-input",
            "-c",
            "custom.yaml",
            "--log-level",
            "debug",
            "--validate",
            "--output-format",
            "json",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.yaml"));
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert!(cli.validate);
        assert_eq!(cli.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from([
            "rjolokia-input",
            "--context",
            "/api/jolokia/read",
            "--timeout-ms",
            "250",
        ]);

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.context, "/api/jolokia/read");
        assert_eq!(config.timeout_ms, 250);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let cli = Cli::parse_from(["rjolokia-input", "--dry-run", "--strict"]);
        assert!(cli.dry_run);
        assert!(cli.strict);

        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.context, "/jolokia/read");
        assert_eq!(config.timeout_ms, 5000);
    }
}
