//! End-to-end tests of the `qplay` binary.
//!
//! Each test runs the compiled binary with `HOME` pointed at an empty
//! temporary directory so no user configuration leaks in.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const BELL_JSON: &str =
    r#"{"qubits": 2, "gates": [{"type": "H", "qubits": [0]}, {"type": "CNOT", "qubits": [0, 1]}]}"#;

const BELL_QASM: &str = "OPENQASM 2.0;
include \"qelib1.inc\";
qreg q[2];
creg c[2];
h q[0];
cx q[0], q[1];
measure q[0] -> c[0];
measure q[1] -> c[1];
";

fn qplay(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_qplay"));
    cmd.env("HOME", home)
        .env_remove("QPLAY_CONFIG")
        .env_remove("QPLAY_BACKEND")
        .env_remove("QPLAY_TIMEOUT_SECS")
        .env_remove("QPLAY_DEFAULT_SHOTS")
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn write_file(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn export_qasm_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.json", BELL_JSON);

    let output = qplay(dir.path()).args(["export-qasm", &input]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), BELL_QASM);
}

#[test]
fn export_code_to_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.json", BELL_JSON);
    let target = dir.path().join("bell.py");

    let status = qplay(dir.path())
        .args(["export-code", &input, "-o"])
        .arg(&target)
        .status()
        .unwrap();
    assert!(status.success());

    let code = std::fs::read_to_string(target).unwrap();
    assert!(code.starts_with("from qiskit import QuantumCircuit\n"));
    assert!(code.contains("circuit.cx(0, 1)\n"));
}

#[test]
fn import_qasm_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = qplay(dir.path());
    cmd.args(["import-qasm", "-"]);

    let output = run_with_stdin(cmd, BELL_QASM);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["circuit_data"]["qubits"], 2);
    assert_eq!(value["circuit_data"]["gates"][1]["type"], "CNOT");
    assert_eq!(
        value["circuit_data"]["gates"][1]["qubits"],
        serde_json::json!([0, 1])
    );
}

#[test]
fn import_qasm_parse_error_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = qplay(dir.path());
    cmd.args(["import-qasm", "-"]);

    let output = run_with_stdin(cmd, "OPENQASM 2.0;\nh q[0];\n");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn simulate_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.json", BELL_JSON);

    let output = qplay(dir.path())
        .args(["simulate", &input, "--shots", "256", "--seed", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], true);
    assert_eq!(value["num_qubits"], 2);
    assert_eq!(value["depth"], 2);
    let total: u64 = value["counts"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert!(total <= 256);
    assert_eq!(value["statevector"].as_array().unwrap().len(), 4);
}

#[test]
fn simulate_qasm_input_with_legacy_backend() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "flip.qasm", "qreg q[1];\nx q[0];\n");

    let output = qplay(dir.path())
        .args(["simulate", &input, "--backend", "legacy", "--shots", "10"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["counts"], serde_json::json!({ "1": 10 }));
}

#[test]
fn simulate_invalid_circuit_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(
        dir.path(),
        "bad.json",
        r#"{"qubits": 1, "gates": [{"type": "X", "qubits": [3]}]}"#,
    );

    let output = qplay(dir.path()).args(["simulate", &input]).output().unwrap();
    assert!(!output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().starts_with("Invalid circuit"));
}

#[test]
fn validate_reports_shape() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.json", BELL_JSON);

    let output = qplay(dir.path()).args(["validate", &input]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "valid": true, "qubit_count": 2, "depth": 2, "gate_count": 2 })
    );
}

#[test]
fn config_file_is_honored() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_file(dir.path(), "bell.json", BELL_JSON);
    let config = write_file(
        dir.path(),
        "qplay.yaml",
        "execution:\n  default_shots: 32\n  statevector_max_qubits: 1\nbackend:\n  preference: legacy\n",
    );

    let output = qplay(dir.path())
        .args(["--config", &config, "simulate", &input])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let total: u64 = value["counts"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(total, 32);
    assert!(value.get("statevector").is_none());
}

#[test]
fn backends_lists_every_generation() {
    let dir = tempfile::tempdir().unwrap();
    let output = qplay(dir.path())
        .env_remove("QPLAY_SEED")
        .arg("backends")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sampler"));
    assert!(stdout.contains("legacy-execute"));
    assert!(!stdout.contains("rebuild with"));
    assert!(stdout.contains("Seeded: no"));
}

#[test]
fn invalid_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_file(dir.path(), "qplay.yaml", "execution:\n  timeout_secs: 0\n");

    let output = qplay(dir.path())
        .args(["--config", &config, "backends"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = qplay(dir.path())
        .args(["export-qasm", "does-not-exist.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
}
