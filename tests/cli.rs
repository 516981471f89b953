//! Binary-level tests

use assert_cmd::Command;
use predicates::prelude::*;

fn nutrimcp(workdir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nutrimcp").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("USDA_API_KEY")
        .env_remove("USDA_API_BASE_URL")
        .env_remove("NUTRIMCP_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_missing_api_key_exits_with_instructions() {
    let dir = tempfile::tempdir().unwrap();

    nutrimcp(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "ERROR: USDA_API_KEY environment variable required",
        ))
        .stderr(predicate::str::contains(
            "Get a free key at: https://fdc.nal.usda.gov/api-guide.html",
        ));
}

#[test]
fn test_desktop_config_needs_no_key() {
    let dir = tempfile::tempdir().unwrap();

    nutrimcp(&dir)
        .arg("desktop-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mcpServers\""))
        .stdout(predicate::str::contains("YOUR_API_KEY_HERE"));
}

#[test]
fn test_serves_protocol_on_stdio() {
    let dir = tempfile::tempdir().unwrap();
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
    );

    nutrimcp(&dir)
        .env("USDA_API_KEY", "test-key")
        .env("USDA_API_BASE_URL", "http://127.0.0.1:9/fdc/v1")
        .arg("--log-level")
        .arg("error")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""protocolVersion":"2024-11-05""#))
        .stdout(predicate::str::contains("search_food_items"))
        .stdout(predicate::str::contains("get_nutrition_by_id"))
        .stdout(predicate::str::contains("search_nutrition"));
}

#[test]
fn test_logs_config_file_in_use() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("nutrimcp.toml");
    std::fs::write(&config, "[usda]\ntimeout_secs = 3\n").unwrap();

    nutrimcp(&dir)
        .env("USDA_API_KEY", "test-key")
        .arg("--config")
        .arg(&config)
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("Using config file"))
        .stderr(predicate::str::contains("nutrimcp.toml"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[usda\n").unwrap();

    nutrimcp(&dir)
        .env("USDA_API_KEY", "test-key")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}
