//! Integration tests for the tripmind CLI

use std::process::{Command, Output};

/// Run the binary with no credentials and an empty config directory
fn tripmind(args: &[&str]) -> Output {
    let home = std::env::temp_dir().join(format!("tripmind-cli-{}", std::process::id()));
    std::fs::create_dir_all(&home).unwrap();

    let mut command = Command::new(env!("CARGO_BIN_EXE_tripmind"));
    command
        .args(args)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", &home)
        .env("RUST_LOG", "off");
    for variable in [
        "AMADEUS_ENV",
        "AMADEUS_CLIENT_ID",
        "AMADEUS_CLIENT_SECRET",
        "HF_MODEL",
        "HUGGINGFACE_API_KEY",
        "TRIPMIND_CONFIG",
    ] {
        command.env_remove(variable);
    }

    command.output().expect("Failed to execute tripmind")
}

#[test]
fn test_cli_help() {
    let output = tripmind(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tripmind"));
    assert!(stdout.contains("search"));
}

#[test]
fn test_search_without_credentials_prints_estimates() {
    let output = tripmind(&[
        "search",
        "--origin",
        "tas",
        "--destination",
        "IST",
        "--departure",
        "2025-06-01",
        "--return",
        "2025-06-04",
        "--budget",
        "900",
    ]);

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["source"], "estimated");
    assert_eq!(outcome["flights"].as_array().unwrap().len(), 5);
    assert_eq!(outcome["hotels"][0]["name"], "Grand Hyatt Istanbul");
    assert!(
        outcome["recommendation"]
            .as_str()
            .unwrap()
            .starts_with("Best value picks: Wizz Air at $180")
    );
}

#[test]
fn test_search_rejects_return_before_departure() {
    let output = tripmind(&[
        "search",
        "--origin",
        "LHR",
        "--destination",
        "CDG",
        "--departure",
        "2025-06-05",
        "--return",
        "2025-06-01",
        "--budget",
        "900",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Return date must be after the departure date"));
}

#[test]
fn test_search_rejects_malformed_dates() {
    let output = tripmind(&[
        "search",
        "--origin",
        "LHR",
        "--destination",
        "CDG",
        "--departure",
        "June 1st",
        "--return",
        "2025-06-05",
        "--budget",
        "900",
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("YYYY-MM-DD"));
}
