//! Export command implementations.

use std::path::Path;

use anyhow::Result;

use qplay_engine::{Engine, EngineConfig};

use super::common::{load_circuit_data, write_output};

/// Execute the export-qasm command.
pub fn execute_qasm(config: EngineConfig, input: &str, output: Option<&Path>) -> Result<()> {
    let engine = Engine::new(config);
    let data = load_circuit_data(&engine, input)?;
    let response = engine.export_qasm(&data)?;
    write_output(output, &response.qasm)
}

/// Execute the export-code command.
pub fn execute_code(config: EngineConfig, input: &str, output: Option<&Path>) -> Result<()> {
    let engine = Engine::new(config);
    let data = load_circuit_data(&engine, input)?;
    let response = engine.export_code(&data)?;
    write_output(output, &response.code)
}
