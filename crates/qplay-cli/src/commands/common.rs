//! Shared helpers for CLI commands.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use qplay_engine::{Engine, EngineConfig, ImportQasmRequest};
use qplay_ir::CircuitData;

/// Return the default config file path (~/.qplay/config.yaml).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".qplay").join("config.yaml"))
}

/// Load the engine configuration.
///
/// An explicit path must exist; the default path is used only when present.
pub fn load_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path().filter(|p| p.is_file()),
    };
    if let Some(path) = &path {
        debug!(path = %path.display(), "loading configuration");
    }
    EngineConfig::load(path.as_deref()).context("Failed to load configuration")
}

/// Read an input argument: a file path, or `-` for stdin.
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read stdin")?;
        return Ok(source);
    }

    let path = Path::new(input);
    if !path.exists() {
        anyhow::bail!("File not found: {input}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {input}"))
}

/// Whether `source` looks like assembly text rather than JSON.
pub fn looks_like_qasm(input: &str, source: &str) -> bool {
    let ext = Path::new(input)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "qasm" => true,
        "json" => false,
        _ => !source.trim_start().starts_with('{'),
    }
}

/// Load a circuit description from JSON, or from QASM via the parser.
pub fn load_circuit_data(engine: &Engine, input: &str) -> Result<CircuitData> {
    let source = read_input(input)?;
    parse_circuit_data(engine, input, source)
}

/// Interpret already-read `source` as a circuit description.
pub fn parse_circuit_data(engine: &Engine, input: &str, source: String) -> Result<CircuitData> {
    if looks_like_qasm(input, &source) {
        let imported = engine
            .import_qasm(&ImportQasmRequest { qasm: source })
            .with_context(|| format!("Failed to parse QASM from {input}"))?;
        Ok(imported.circuit_data)
    } else {
        serde_json::from_str(&source)
            .with_context(|| format!("Invalid circuit description in {input}"))
    }
}

/// Write `text` to `output`, or to stdout.
pub fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

/// Pretty-printed JSON with a trailing newline.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_qasm() {
        assert!(looks_like_qasm("bell.qasm", "{"));
        assert!(!looks_like_qasm("bell.json", "OPENQASM 2.0;"));
        assert!(looks_like_qasm("-", "OPENQASM 2.0;\nqreg q[1];"));
        assert!(!looks_like_qasm("-", "  { \"qubits\": 1 }"));
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input("/nonexistent/circuit.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_parse_circuit_data_both_formats() {
        let engine = Engine::new(EngineConfig::default());

        let data = parse_circuit_data(
            &engine,
            "-",
            r#"{"qubits": 2, "gates": [{"type": "H", "qubits": [0]}]}"#.to_string(),
        )
        .unwrap();
        assert_eq!(data.qubits, 2);

        let data = parse_circuit_data(
            &engine,
            "-",
            "OPENQASM 2.0;\nqreg q[3];\nx q[2];\n".to_string(),
        )
        .unwrap();
        assert_eq!(data.qubits, 3);
        assert_eq!(data.gates[0].kind, "X");
    }

    #[test]
    fn test_parse_circuit_data_reports_bad_json() {
        let engine = Engine::new(EngineConfig::default());
        let err = parse_circuit_data(&engine, "c.json", "{ nope".to_string()).unwrap_err();
        assert!(err.to_string().contains("Invalid circuit description"));
    }
}
