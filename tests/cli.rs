use assert_cmd::prelude::*;
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn blobkit(dir: &Path) -> Command {
    let bin = assert_cmd::cargo::cargo_bin!("blobkit");
    let mut cmd = Command::new(bin);
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("AZURE_STORAGE_CONNECTION_STRING")
        .env_remove("BLOBKIT__ENVIRONMENT")
        .env_remove("BLOBKIT__CONNECTION_STRINGS__AZURE_STORAGE_CONNECTION_STRING");
    cmd
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output")
}

#[test]
fn validate_accepts_well_formed_paths() {
    let dir = tempdir().unwrap();
    let assert = blobkit(dir.path())
        .args(["validate", "my-container/folder/file.txt"])
        .assert()
        .success();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("Path 'my-container/folder/file.txt' is valid."));
    assert!(stdout.contains("container: my-container"));
}

#[test]
fn validate_reports_every_violation() {
    let dir = tempdir().unwrap();
    let assert = blobkit(dir.path())
        .args(["validate", "ab--/file."])
        .assert()
        .failure();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("  ERRORS:"));
    assert!(stdout.contains("may not contain consecutive dash"));
    assert!(stdout.contains("may not end with a period"));
}

#[test]
fn validate_emits_json() {
    let dir = tempdir().unwrap();
    let assert = blobkit(dir.path())
        .args(["--output", "json", "validate", "nocontainer"])
        .assert()
        .failure();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).expect("valid json");
    assert_eq!(value["valid"], Value::Bool(false));
    assert_eq!(value["violations"][0]["kind"].as_str(), Some("MissingContainer"));
    assert_eq!(value["violations"][0]["code"].as_str(), Some("PATH.MISSING_CONTAINER"));
}

#[test]
fn run_reads_and_writes_through_local_root() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    std::fs::create_dir_all(store.join("docs")).unwrap();
    std::fs::write(store.join("docs/input.txt"), "hello from input\nsecond\n").unwrap();
    std::fs::write(
        dir.path().join("appsettings.json"),
        format!(
            r#"{{
                "connection_strings": {{"azure_storage_connection_string": "LocalRoot={}"}},
                "settings": {{"container_name": "docs", "input_file_name": "input.txt", "output_file_name": "output.txt"}}
            }}"#,
            store.display()
        ),
    )
    .unwrap();

    let assert = blobkit(dir.path()).arg("run").assert().success();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("Environment name: Production"));
    assert!(stdout.contains("First line read from file: 'hello from input'"));
    assert!(stdout.contains("File written successfully."));

    let written = std::fs::read_to_string(store.join("docs/output.txt")).unwrap();
    assert!(written.starts_with("This was written at "));
}

#[test]
fn run_reads_pascal_case_appsettings() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    std::fs::create_dir_all(store.join("docs")).unwrap();
    std::fs::write(store.join("docs/input.txt"), "first\n").unwrap();
    std::fs::write(
        dir.path().join("appsettings.json"),
        format!(
            r#"{{
                "ConnectionStrings": {{"AZURE_STORAGE_CONNECTION_STRING": "LocalRoot={}"}},
                "Settings": {{"ContainerName": "docs", "InputFileName": "input.txt", "OutputFileName": "output.txt"}}
            }}"#,
            store.display()
        ),
    )
    .unwrap();

    let assert = blobkit(dir.path()).arg("run").assert().success();
    assert!(stdout_of(&assert).contains("First line read from file: 'first'"));
    assert!(store.join("docs/output.txt").exists());
}

#[test]
fn run_aborts_after_failed_read() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    std::fs::create_dir_all(store.join("docs")).unwrap();

    let assert = blobkit(dir.path())
        .env(
            "AZURE_STORAGE_CONNECTION_STRING",
            format!("LocalRoot={}", store.display()),
        )
        .args([
            "--set",
            "settings.container_name=docs",
            "--set",
            "settings.input_file_name=missing.txt",
            "--set",
            "settings.output_file_name=out.txt",
            "run",
        ])
        .assert()
        .failure();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("Failed to read from file.  Aborting."));
    assert!(stdout.contains("    Unable to read from file 'docs/missing.txt'."));
    assert!(!store.join("docs/out.txt").exists());
}

#[test]
fn missing_connection_string_is_reported() {
    let dir = tempdir().unwrap();
    let assert = blobkit(dir.path())
        .args(["read", "--path", "docs/a.txt"])
        .assert()
        .failure();
    let stdout = stdout_of(&assert);
    assert!(stdout.contains("No storage account connection string specified."));
}

#[test]
fn write_then_read_with_explicit_paths() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    std::fs::create_dir_all(store.join("notes")).unwrap();
    let conn = format!(
        "connection_strings.azure_storage_connection_string=LocalRoot={}",
        store.display()
    );

    blobkit(dir.path())
        .args(["--set", &conn, "write", "--path", "notes/today.txt", "--text", "custom line"])
        .assert()
        .success();

    let assert = blobkit(dir.path())
        .args(["--set", &conn, "--output", "json", "read", "--path", "notes/today.txt"])
        .assert()
        .success();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).expect("valid json");
    assert_eq!(value["value"].as_str(), Some("custom line"));
    assert_eq!(value["ok"], Value::Bool(true));

    let assert = blobkit(dir.path())
        .args(["--set", &conn, "--output", "json", "list", "--container", "notes"])
        .assert()
        .success();
    let value: Value = serde_json::from_str(&stdout_of(&assert)).expect("valid json");
    assert_eq!(value["value"][0]["name"].as_str(), Some("today.txt"));
}

#[test]
fn missing_config_file_fails_before_dispatch() {
    let dir = tempdir().unwrap();
    let assert = blobkit(dir.path())
        .args(["--config", "absent.json", "validate", "docs/a.txt"])
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).expect("utf8 output");
    assert!(stderr.contains("Failed to load configuration"));
}
