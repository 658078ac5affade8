//! CLI tests for `zmlabel explain`.

use std::process::Command;

use assert_cmd::cargo;

fn zmlabel_cmd() -> Command {
    Command::new(cargo::cargo_bin!("zmlabel"))
}

#[test]
fn explain_known_code_json_returns_explanation() {
    let output = zmlabel_cmd()
        .args(["explain", "ZML1104", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["id"], "ZML1104");
    assert!(json["explanation"].is_string());
}

#[test]
fn explain_unknown_code_json_returns_null_explanation() {
    let output = zmlabel_cmd()
        .args(["explain", "ZML9999", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["id"], "ZML9999");
    assert!(json["explanation"].is_null());
}

#[test]
fn explain_pretty_shows_human_readable_text() {
    let output = zmlabel_cmd()
        .args(["explain", "ZML3001", "--output", "pretty"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ZML3001") && stdout.contains(':'), "unexpected output: {stdout}");
}
