//! Backends command implementation.

use anyhow::Result;
use console::style;

use qplay_engine::{Engine, EngineConfig};
use qplay_hal::ApiGeneration;

/// Cargo feature that compiles in each generation.
const GENERATION_FEATURES: [(ApiGeneration, &str); 2] = [
    (ApiGeneration::Sampling, "sampler"),
    (ApiGeneration::LegacyExecute, "legacy-execute"),
];

/// Execute the backends command.
pub fn execute(config: EngineConfig) -> Result<()> {
    println!("{} Compiled-in backends:\n", style("qplay").cyan().bold());

    let registry = qplay_adapter_sim::registry();
    for (name, generation) in registry.available_backends() {
        println!(
            "  {} {} {}",
            style("●").green(),
            style(name).bold(),
            style(format!("({generation})")).dim()
        );
    }
    for (generation, feature) in GENERATION_FEATURES {
        if !registry.has_generation(generation) {
            println!(
                "  {} {} {}",
                style("○").red(),
                style(generation).dim(),
                style(format!("(rebuild with --features {feature})")).dim()
            );
        }
    }

    let preference = config.backend.preference;
    let engine = Engine::with_registry(&registry, config);
    println!();
    match engine.backend_info() {
        Ok(info) => {
            println!(
                "Selected for '{}': {} ({})",
                preference,
                style(&info.name).yellow().bold(),
                info.generation
            );
            println!("    Qubits: {}", info.max_qubits);
            println!("    Max shots: {}", info.max_shots);
            println!(
                "    Statevector: {}",
                if info.statevector { "yes" } else { "no" }
            );
            println!("    Seeded: {}", if info.seeded { "yes" } else { "no" });
        }
        Err(e) => {
            println!("Selected for '{preference}': {}", style(e).red());
        }
    }

    Ok(())
}
