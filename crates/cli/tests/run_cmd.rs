//! CLI tests for `zmlabel run`, which executes wire payloads.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use assert_cmd::cargo;

fn zmlabel_cmd() -> Command {
    Command::new(cargo::cargo_bin!("zmlabel"))
}

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .to_string()
}

/// The fixture payload with `Operate` replaced.
fn payload_with_operate(operate: &str) -> (tempfile::TempDir, String) {
    let mut payload: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(fixture("print_payload.json")).expect("fixture")).expect("json");
    payload["Operate"] = operate.into();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("payload.json");
    fs::write(&path, payload.to_string()).expect("write payload");
    (dir, path.to_string_lossy().to_string())
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid json ({e}): {stdout}"))
}

#[test]
fn print_payload_prints_requested_copies() {
    let output = zmlabel_cmd()
        .args(["run", &fixture("print_payload.json"), "--output", "json"])
        .output()
        .expect("run payload");

    assert!(output.status.success(), "stderr={}", String::from_utf8_lossy(&output.stderr));
    let json = stdout_json(&output);
    assert_eq!(json["result"]["action"], "printed");
    assert_eq!(json["result"]["printed"], 2);
    assert_eq!(json["failed"], serde_json::json!([]));
}

#[test]
fn busy_printer_refuses_the_payload() {
    let output = zmlabel_cmd()
        .args(["run", &fixture("print_payload.json"), "--simulate-status", "4", "--output", "json"])
        .output()
        .expect("run payload");

    assert!(!output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["success"], false);
    assert!(
        json["message"].as_str().is_some_and(|m| m.contains("printer not ready")),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn waiting_printer_accepts_the_payload() {
    let output = zmlabel_cmd()
        .args(["run", &fixture("print_payload.json"), "--simulate-status", "96", "--output", "json"])
        .output()
        .expect("run payload");

    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["result"]["action"], "printed");
}

#[test]
fn preview_payload_writes_image() {
    let (dir, path) = payload_with_operate("Preview");
    let image = dir.path().join("preview.pbm");

    let output = zmlabel_cmd()
        .args(["run", &path, "-o"])
        .arg(&image)
        .args(["--output", "json"])
        .output()
        .expect("run payload");

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["result"]["action"], "previewed");
    assert_eq!(json["result"]["rendered"], true);
    assert!(fs::read(&image).expect("image written").starts_with(b"P4\n"));
}

#[test]
fn unknown_operate_takes_no_action() {
    let (_dir, path) = payload_with_operate("archive");

    let output = zmlabel_cmd()
        .args(["run", &path, "--output", "json"])
        .output()
        .expect("run payload");

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["result"]["action"], "no_action");
    assert_eq!(json["result"]["operate"], "archive");
}

#[test]
fn invalid_object_is_reported_and_skipped() {
    let mut payload: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(fixture("print_payload.json")).expect("fixture")).expect("json");
    payload["LabelObjectList"][1]["barcodekind"] = "Not A Symbology".into();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("payload.json");
    fs::write(&path, payload.to_string()).expect("write payload");

    let output = zmlabel_cmd()
        .arg("run")
        .arg(&path)
        .args(["--output", "json"])
        .output()
        .expect("run payload");

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["failed"], serde_json::json!([1]));
    assert_eq!(json["result"]["action"], "printed");
    assert!(
        json["diagnostics"]
            .as_array()
            .is_some_and(|d| d.iter().any(|d| d["id"] == "ZML2104")),
        "diagnostics: {}",
        json["diagnostics"]
    );
}

#[test]
fn malformed_payload_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"Printer\": ").expect("write payload");

    let output = zmlabel_cmd()
        .arg("run")
        .arg(&path)
        .args(["--output", "json"])
        .output()
        .expect("run payload");

    assert!(!output.status.success());
    let json = stdout_json(&output);
    assert!(
        json["message"].as_str().is_some_and(|m| m.contains("payload cannot be executed")),
        "unexpected message: {}",
        json["message"]
    );
}
