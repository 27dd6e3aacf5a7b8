//! Tests for the symbolbridge binary
//!
//! These tests verify:
//! - `load` prints nothing when no list is saved
//! - `save` / `load` round-trip, including the empty list
//! - `serve` answers port messages on stdout
//! - Failures exit with code 1

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use symbolbridge::config::DEFAULT_DATA_DIR;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn symbolbridge(data_dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_symbolbridge"));
    command.arg("--data-dir").arg(data_dir).env("RUST_LOG", "off");
    command
}

fn run(command: &mut Command) -> Output {
    command.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

// =============================================================================
// Load / Save Tests
// =============================================================================

#[test]
fn test_cli_load_without_save_prints_nothing() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(symbolbridge(temp_dir.path()).arg("load"));

    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_cli_save_then_load() {
    let temp_dir = TempDir::new().unwrap();

    let saved = run(symbolbridge(temp_dir.path()).args(["save", "AAPL", "MSFT"]));
    assert!(saved.status.success());
    assert_eq!(stdout(&saved), "");

    let loaded = run(symbolbridge(temp_dir.path()).arg("load"));
    assert!(loaded.status.success());
    assert_eq!(stdout(&loaded), "[\"AAPL\",\"MSFT\"]\n");
}

#[test]
fn test_cli_save_without_symbols_stores_empty_list() {
    let temp_dir = TempDir::new().unwrap();
    run(symbolbridge(temp_dir.path()).args(["save", "AAPL"]));

    let saved = run(symbolbridge(temp_dir.path()).arg("save"));
    assert!(saved.status.success());

    let loaded = run(symbolbridge(temp_dir.path()).arg("load"));
    assert_eq!(stdout(&loaded), "[]\n");
}

#[test]
fn test_cli_custom_key_is_isolated() {
    let temp_dir = TempDir::new().unwrap();
    run(symbolbridge(temp_dir.path()).args(["--key", "watchlist", "save", "AMD"]));

    let default_key = run(symbolbridge(temp_dir.path()).arg("load"));
    let custom_key = run(symbolbridge(temp_dir.path()).args(["--key", "watchlist", "load"]));

    assert_eq!(stdout(&default_key), "");
    assert_eq!(stdout(&custom_key), "[\"AMD\"]\n");
}

#[test]
fn test_cli_default_data_dir() {
    let temp_dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_symbolbridge"))
        .args(["save", "IBM"])
        .current_dir(temp_dir.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(temp_dir.path().join(DEFAULT_DATA_DIR).is_dir());
}

// =============================================================================
// Serve Tests
// =============================================================================

#[test]
fn test_cli_serve_answers_on_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let mut child = symbolbridge(temp_dir.path())
        .arg("serve")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    {
        let mut stdin = child.stdin.take().unwrap();
        stdin
            .write_all(
                concat!(
                    "{\"port\":\"loadSymbols\"}\n",
                    "{\"port\":\"saveSymbols\",\"payload\":[\"NVDA\"]}\n",
                    "{\"port\":\"loadSymbols\"}\n",
                )
                .as_bytes(),
            )
            .unwrap();
    }

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "{\"port\":\"symbolsPort\",\"payload\":[\"NVDA\"]}\n"
    );
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_cli_empty_key_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(symbolbridge(temp_dir.path()).args(["--key", "", "load"]));

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_cli_quota_exceeded_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(symbolbridge(temp_dir.path()).args(["--quota-bytes", "8", "save", "AAPL"]));
    assert_eq!(output.status.code(), Some(1));

    let loaded = run(symbolbridge(temp_dir.path()).arg("load"));
    assert_eq!(stdout(&loaded), "");
}

#[test]
fn test_cli_zero_quota_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(symbolbridge(temp_dir.path()).args(["--quota-bytes", "0", "save"]));

    assert_eq!(output.status.code(), Some(1));
}
