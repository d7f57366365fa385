//! CLI integration tests
//!
//! Tests for the command-line interface using assert_cmd.
//!
//! These tests verify:
//! - Help and version flags
//! - Configuration validation
//! - Dry run mode
//! - A full sweep against a mocked Jolokia endpoint

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get a command for the rjolokia-input binary
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("rjolokia-input").expect("Failed to find rjolokia-input binary")
}

/// Helper to create a temporary config file with given content
fn create_temp_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file.flush().expect("Failed to flush");
    file
}

const VALID_CONFIG: &str = r#"
context: /jolokia/read
servers:
  - name: stable
    host: 192.168.103.2
    port: "8180"
    username: myuser
    password: mypassword
metrics:
  - name: heap_memory_usage
    jmx: /java.lang:type=Memory/HeapMemoryUsage
  - name: gc
    jmx: /java.lang:type=GarbageCollector,name=*
    MultipleMBeans: true
"#;

/// Test --help flag displays usage information
#[test]
fn test_help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:").or(predicate::str::contains("usage:")))
        .stdout(predicate::str::contains("--config"));
}

/// Test --version flag displays version
#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that a valid configuration is accepted via --validate flag
#[test]
fn test_validate_valid_config() {
    let file = create_temp_config(VALID_CONFIG);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("servers: 1"))
        .stdout(predicate::str::contains("metrics: 2"));
}

/// Test --validate with JSON output
#[test]
fn test_validate_json_output() {
    let file = create_temp_config(VALID_CONFIG);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--validate")
        .arg("--output-format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"));
}

/// Test that invalid YAML is rejected
#[test]
fn test_validate_invalid_config_bad_yaml() {
    let file = create_temp_config("servers: [not valid yaml\n");

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--validate")
        .assert()
        .failure();
}

/// Test that a context without a leading slash is rejected
#[test]
fn test_invalid_context() {
    let file = create_temp_config("context: jolokia/read\n");

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Context must start with '/'"));
}

/// Test that a CLI override is validated like the config file value
#[test]
fn test_context_override_is_validated() {
    let file = create_temp_config(VALID_CONFIG);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--context")
        .arg("no-slash")
        .arg("--validate")
        .assert()
        .failure();
}

/// Test that a missing config file falls back to defaults
#[test]
fn test_missing_config_file_uses_defaults() {
    cmd()
        .arg("-c")
        .arg("/nonexistent/path/jolokia.yaml")
        .arg("--validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("servers: 0"));
}

/// Test --dry-run lists every request URL without contacting servers
#[test]
fn test_dry_run_lists_urls() {
    let file = create_temp_config(VALID_CONFIG);

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: 2 request(s)"))
        .stdout(predicate::str::contains(
            "http://192.168.103.2:8180/jolokia/read/java.lang:type=Memory/HeapMemoryUsage",
        ))
        .stdout(predicate::str::contains("(basic auth)"));
}

/// Test environment variable override for the context root
#[test]
fn test_env_context_override() {
    let file = create_temp_config(VALID_CONFIG);

    cmd()
        .arg("-c")
        .arg(file.path())
        .env("RJOLOKIA_CONTEXT", "/api/jolokia/read")
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "http://192.168.103.2:8180/api/jolokia/read/java.lang:type=Memory/HeapMemoryUsage",
        ));
}

/// Run a full sweep against a mocked endpoint and check the line protocol output
#[tokio::test]
async fn test_sweep_prints_line_protocol() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jolokia/read/java.lang:type=Memory/HeapMemoryUsage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": {"committed": 456, "used": 123},
            "status": 200
        })))
        .mount(&mock_server)
        .await;

    let config = format!(
        r#"
servers:
  - name: local
    host: 127.0.0.1
    port: {}
metrics:
  - name: heap
    jmx: /java.lang:type=Memory/HeapMemoryUsage
"#,
        mock_server.address().port()
    );
    let file = create_temp_config(&config);
    let port = mock_server.address().port();

    let assert = tokio::task::spawn_blocking(move || {
        cmd().arg("-c").arg(file.path()).arg("--strict").assert()
    })
    .await
    .unwrap();

    assert.success().stdout(predicate::str::starts_with(format!(
        "jolokia,host=127.0.0.1,port={},server=local heap_committed=456i,heap_used=123i ",
        port
    )));
}

/// Test --strict turns failures into a non-zero exit code
#[test]
fn test_strict_fails_on_unreachable_server() {
    let file = create_temp_config(
        r#"
timeout_ms: 500
servers:
  - name: dead
    host: 127.0.0.1
    port: 1
metrics:
  - name: heap
    jmx: /java.lang:type=Memory/HeapMemoryUsage
"#,
    );

    cmd()
        .arg("-c")
        .arg(file.path())
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("Sweep statistics"))
        .stderr(predicate::str::contains("Sweep finished with failures"));

    cmd()
        .arg("-c")
        .arg(file.path())
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 request(s) and 0 MBean(s) failed"));
}
