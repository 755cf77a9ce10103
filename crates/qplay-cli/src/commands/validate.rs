//! Validate command implementation.

use anyhow::Result;

use qplay_engine::{Engine, EngineConfig};

use super::common::{load_circuit_data, to_json};

/// Execute the validate command.
pub fn execute(config: EngineConfig, input: &str) -> Result<()> {
    let engine = Engine::new(config);
    let data = load_circuit_data(&engine, input)?;
    let response = engine.validate(&data);
    print!("{}", to_json(&response)?);

    if !response.valid {
        anyhow::bail!("Circuit is not valid");
    }
    Ok(())
}
