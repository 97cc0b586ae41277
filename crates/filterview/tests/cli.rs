use std::fs;
use std::process::Command;

use tempfile::TempDir;

#[test]
fn keys_prints_the_keymap() {
    let output = Command::new(env!("CARGO_BIN_EXE_filterview"))
        .arg("keys")
        .output()
        .expect("failed to run filterview keys");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Escape"));
    assert!(stdout.contains("load image 2 (mandrill)"));
    assert!(stdout.contains("blur"));
}

#[test]
fn where_honours_config_dir_override() {
    let root = TempDir::new().unwrap();
    let config_dir = root.path().join("config");

    let output = Command::new(env!("CARGO_BIN_EXE_filterview"))
        .env("FILTERVIEW_CONFIG_DIR", &config_dir)
        .arg("where")
        .output()
        .expect("failed to run filterview where");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = config_dir.join("filterview.toml");
    assert!(stdout.contains(&expected.display().to_string()));
    assert!(stdout.contains("missing"));

    fs::create_dir_all(&config_dir).unwrap();
    fs::write(&expected, "version = 1\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_filterview"))
        .env("FILTERVIEW_CONFIG_DIR", &config_dir)
        .arg("where")
        .output()
        .expect("failed to rerun filterview where");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("present"));
}

#[test]
fn invalid_config_fails_before_opening_a_window() {
    let root = TempDir::new().unwrap();
    let config = root.path().join("filterview.toml");
    fs::write(&config, "version = 2\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_filterview"))
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run filterview");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let root = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_filterview"))
        .arg("--config")
        .arg(root.path().join("nope.toml"))
        .output()
        .expect("failed to run filterview");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.toml"));
}

#[test]
fn malformed_size_is_rejected_by_the_parser() {
    let output = Command::new(env!("CARGO_BIN_EXE_filterview"))
        .args(["--size", "0x100", "keys"])
        .output()
        .expect("failed to run filterview");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("greater than zero"));
}
