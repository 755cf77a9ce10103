//! Import command implementation.

use std::path::Path;

use anyhow::{Context, Result};

use qplay_engine::{Engine, EngineConfig, ImportQasmRequest};

use super::common::{read_input, to_json, write_output};

/// Execute the import-qasm command.
pub fn execute(config: EngineConfig, input: &str, output: Option<&Path>) -> Result<()> {
    let engine = Engine::new(config);
    let qasm = read_input(input)?;
    let response = engine
        .import_qasm(&ImportQasmRequest { qasm })
        .with_context(|| format!("Failed to parse QASM from {input}"))?;
    write_output(output, &to_json(&response)?)
}
