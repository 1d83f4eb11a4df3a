//! CLI integration tests

use std::process::Command;

fn wildpredict(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "-q", "-p", "wildpredict-cli", "--"])
        .args(args)
        .env_remove("WILDLIFE_BACKEND_URL")
        .env_remove("WILDLIFE_API_KEY")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute command")
}

const TIGER: &[&str] = &[
    "--species",
    "Tiger",
    "--height",
    "90",
    "--weight",
    "200",
    "--gestation-period",
    "110",
    "--top-speed",
    "65",
    "--offspring-per-birth",
    "3",
    "--diet",
    "Carnivore",
    "--habitat",
    "Not Oceans",
    "--social-structure",
    "Solitary",
];

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = wildpredict(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Wildlife Trait Predictor"),
        "Should show app name"
    );
    assert!(stdout.contains("lifespan"), "Should show lifespan command");
    assert!(
        stdout.contains("conservation"),
        "Should show conservation command"
    );
    assert!(stdout.contains("features"), "Should show features command");
    assert!(stdout.contains("status"), "Should show status command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = wildpredict(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("wildpredict"), "Should show binary name");
}

/// Test profile options on the lifespan command
#[test]
fn test_lifespan_help() {
    let output = wildpredict(&["lifespan", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Lifespan help should succeed");
    for flag in [
        "--species",
        "--height",
        "--weight",
        "--gestation-period",
        "--top-speed",
        "--offspring-per-birth",
        "--diet",
        "--habitat",
        "--social-structure",
        "--profile",
    ] {
        assert!(stdout.contains(flag), "Should show {} option", flag);
    }
}

/// Test global options
#[test]
fn test_global_options() {
    let output = wildpredict(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("--format"), "Should show format option");
    assert!(stdout.contains("--api-url"), "Should show api-url option");
    assert!(
        stdout.contains("WILDLIFE_BACKEND_URL"),
        "Should show env var"
    );
    assert!(stdout.contains("--metrics"), "Should show metrics option");
}

/// Test curated status lookup
#[test]
fn test_status_endangered() {
    let output = wildpredict(&["status", "1", "--format", "json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Status lookup should succeed");
    let entry: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(entry["status"], "Endangered");
    assert_eq!(entry["color"], "orange");
}

/// Test fallback status lookup
#[test]
fn test_status_fallback() {
    let output = wildpredict(&["status", "99"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Status lookup should succeed");
    assert!(stdout.contains("Status Level: 99"));
}

/// Test feature preview without a service
#[test]
fn test_features_lifespan() {
    let mut args = vec!["features", "lifespan", "--format", "json"];
    args.extend_from_slice(TIGER);
    let output = wildpredict(&args);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Feature preview should succeed");
    let record: serde_json::Value = serde_json::from_str(&stdout).expect("JSON output");
    assert_eq!(record["Diet_Carnivore"], 1);
    assert_eq!(record["Habitat_Oceans"], 0);
    assert_eq!(record["Conservation Status_Endangered"], 1);
    assert!(record.get("species").is_none());
}

/// Test that invalid profiles are rejected before any request
#[test]
fn test_invalid_profile_rejected() {
    let output = wildpredict(&[
        "--api-url",
        "http://127.0.0.1:9/",
        "--api-key",
        "unused",
        "lifespan",
        "--species",
        "T",
        "--height",
        "-5",
        "--weight",
        "200",
        "--gestation-period",
        "110",
        "--top-speed",
        "65",
        "--offspring-per-birth",
        "3",
        "--diet",
        "Carnivore",
        "--habitat",
        "Not Oceans",
        "--social-structure",
        "Solitary",
    ]);

    assert!(!output.status.success(), "Invalid profile should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Species name must be at least 2 characters."));
    assert!(stderr.contains("Height must be a positive number."));
}

/// Test that profile problems are reported even without a configured service
#[test]
fn test_invalid_profile_reported_without_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let output = wildpredict(&[
        "--config",
        config.to_str().unwrap(),
        "lifespan",
        "--species",
        "T",
        "--height",
        "-5",
    ]);

    assert!(!output.status.success(), "Invalid profile should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Species name must be at least 2 characters."));
    assert!(stderr.contains("Height must be a positive number."));
    assert!(stderr.contains("Please select a diet type."));
    assert!(
        !stderr.contains("not configured"),
        "Configuration should not be checked for an invalid profile"
    );
}

/// Test missing service configuration
#[test]
fn test_missing_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let mut args = vec!["--config", config.to_str().unwrap(), "conservation"];
    args.extend_from_slice(TIGER);
    let output = wildpredict(&args);

    assert!(!output.status.success(), "Missing configuration should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not configured"));
}

/// Test invalid command error handling
#[test]
fn test_invalid_command() {
    let output = wildpredict(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("invalid"),
        "Should show error message"
    );
}
