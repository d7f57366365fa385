//! rJolokia-Input - Jolokia JMX input
//!
//! Performs one sweep over every configured (server, metric) pair and
//! prints the resulting measurements to stdout.

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};

use rjolokia_input::cli::{Cli, OutputFormat};
use rjolokia_input::collector::Gatherer;
use rjolokia_input::config::Config;
use rjolokia_input::sink::MemorySink;
use rjolokia_input::transformer::{format_json_lines, LineProtocolFormatter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    rjolokia_input::init_logging(&cli.log_level.to_string())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting rJolokia-Input"
    );

    let mut config = Config::load_or_default(&cli.config)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    if cli.validate {
        return print_validation(&cli, &config);
    }

    let gatherer = Gatherer::from_config(&config)?;

    if cli.dry_run {
        return print_dry_run(&cli, &gatherer);
    }

    let mut sink = MemorySink::new();
    let report = gatherer.gather(&mut sink).await;

    let output = match cli.output_format {
        OutputFormat::Line => {
            let now_ns = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as i64)
                .unwrap_or(0);
            LineProtocolFormatter::new()
                .with_timestamp(now_ns)
                .format(sink.measurements())
        }
        OutputFormat::Json => format_json_lines(sink.measurements())?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write measurements")?;
    stdout.flush()?;

    let stats = gatherer.stats();
    let durations = &stats.request_duration_seconds;
    info!(
        requests = stats.requests_total.get(),
        measurements = stats.measurements_total.get(),
        request_failures = stats.failures_total(),
        mbean_errors = stats.mbean_errors_total.get(),
        failures_by_kind = ?stats.failures_by_kind(),
        mean_duration_seconds = durations.mean().unwrap_or(0.0),
        max_duration_bucket_seconds = durations.upper_bound().unwrap_or(0.0),
        "Sweep statistics"
    );
    if !report.is_clean() {
        warn!(
            request_failures = report.failures.len(),
            mbean_errors = report.mbean_errors.len(),
            "Sweep finished with failures"
        );
    }

    if cli.strict && !report.is_clean() {
        anyhow::bail!(
            "{} request(s) and {} MBean(s) failed",
            report.failures.len(),
            report.mbean_errors.len()
        );
    }

    Ok(())
}

fn print_validation(cli: &Cli, config: &Config) -> Result<()> {
    match cli.output_format {
        OutputFormat::Line => {
            println!("Configuration is valid");
            println!("  context: {}", config.context);
            println!("  servers: {}", config.servers.len());
            println!("  metrics: {}", config.metrics.len());
        }
        OutputFormat::Json => {
            let summary = json!({
                "valid": true,
                "context": config.context,
                "servers": config.servers.len(),
                "metrics": config.metrics.len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn print_dry_run<T>(cli: &Cli, gatherer: &Gatherer<T>) -> Result<()>
where
    T: rjolokia_input::collector::HttpTransport,
{
    let targets = gatherer.request_targets();

    match cli.output_format {
        OutputFormat::Line => {
            println!("Dry run: {} request(s)", targets.len());
            for target in &targets {
                println!(
                    "  [{}] {} -> {}{}",
                    target.server,
                    target.metric,
                    target.url,
                    if target.authenticated { " (basic auth)" } else { "" }
                );
            }
        }
        OutputFormat::Json => {
            let entries: Vec<_> = targets
                .iter()
                .map(|t| {
                    json!({
                        "server": t.server,
                        "metric": t.metric,
                        "url": t.url,
                        "authenticated": t.authenticated,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
