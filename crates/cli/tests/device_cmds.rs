//! CLI tests for `zmlabel status`, `devices`, and `read-tag`.

use std::process::{Command, Output};

use assert_cmd::cargo;

fn zmlabel_cmd() -> Command {
    Command::new(cargo::cargo_bin!("zmlabel"))
}

fn run_json(args: &[&str]) -> (Output, serde_json::Value) {
    let output = zmlabel_cmd().args(args).args(["--output", "json"]).output().expect("run command");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let json = serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid json ({e}): {stdout}"));
    (output, json)
}

#[test]
fn status_of_idle_printer() {
    let (output, json) = run_json(&["status"]);

    assert!(output.status.success());
    assert_eq!(json["code"], 0);
    assert_eq!(json["bucket"], "ready");
}

#[test]
fn status_reports_error_bucket() {
    let (output, json) = run_json(&["status", "--simulate-status", "81"]);

    assert!(output.status.success());
    assert_eq!(json["code"], 81);
    assert_eq!(json["message"], "paper out");
    assert_eq!(json["bucket"], "error");
}

#[test]
fn network_status_needs_an_address() {
    let (output, json) = run_json(&["status", "--interface", "net"]);

    assert!(!output.status.success());
    assert!(
        json["message"].as_str().is_some_and(|m| m.contains("invalid printer settings")),
        "unexpected message: {}",
        json["message"]
    );

    let (output, _) = run_json(&["status", "--interface", "net", "--address", "10.0.0.7"]);
    assert!(output.status.success());
}

#[test]
fn devices_lists_virtual_printer() {
    let (output, json) = run_json(&["devices"]);

    assert!(output.status.success());
    assert_eq!(json["interface"], "USB");
    assert_eq!(json["devices"], serde_json::json!(["VIRTUAL-0001"]));
}

#[test]
fn devices_uses_simulated_ids() {
    let (_, json) = run_json(&["devices", "--simulate-device", "A1", "--simulate-device", "B2"]);
    assert_eq!(json["devices"], serde_json::json!(["A1", "B2"]));

    let (_, json) = run_json(&["devices", "--interface", "net"]);
    assert_eq!(json["devices"], serde_json::json!([]));
}

#[test]
fn read_tag_returns_tag_data() {
    let (output, json) = run_json(&["read-tag", "--area", "epc", "--simulate-tag", "E28011606000020400000000"]);

    assert!(output.status.success());
    assert_eq!(json["area"], "epc");
    assert_eq!(json["data"], "E28011606000020400000000");
}

#[test]
fn read_tag_needs_rfid_interface() {
    let (output, json) = run_json(&["read-tag", "--interface", "usb", "--simulate-tag", "E280"]);

    assert!(!output.status.success());
    assert!(
        json["message"].as_str().is_some_and(|m| m.contains("does not support RFID")),
        "unexpected message: {}",
        json["message"]
    );
}

#[test]
fn read_tag_without_tag_is_a_device_error() {
    let (output, json) = run_json(&["read-tag"]);

    assert!(!output.status.success());
    assert!(
        json["message"].as_str().is_some_and(|m| m.contains("no tag in field")),
        "unexpected message: {}",
        json["message"]
    );
}
