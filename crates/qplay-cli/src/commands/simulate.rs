//! Simulate command implementation.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qplay_engine::{Engine, EngineConfig, SimulateRequest, SimulateResponse, SimulationResult};
use qplay_hal::BackendPreference;

use super::common::{load_circuit_data, to_json};
use crate::OutputFormat;

/// Per-invocation overrides of the loaded configuration.
#[derive(Debug, Default)]
pub struct Overrides {
    pub timeout_secs: Option<u64>,
    pub backend: Option<BackendPreference>,
    pub seed: Option<u64>,
}

impl Overrides {
    /// Apply to `config` and re-check it.
    pub fn apply(self, mut config: EngineConfig) -> Result<EngineConfig> {
        if let Some(timeout) = self.timeout_secs {
            config.execution.timeout_secs = timeout;
        }
        if let Some(backend) = self.backend {
            config.backend.preference = backend;
        }
        if let Some(seed) = self.seed {
            config.backend.seed = Some(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Execute the simulate command.
pub async fn execute(
    config: EngineConfig,
    input: &str,
    shots: Option<u32>,
    overrides: Overrides,
    format: OutputFormat,
) -> Result<()> {
    let engine = Engine::new(overrides.apply(config)?);
    let mut request = SimulateRequest::new(load_circuit_data(&engine, input)?);
    request.shots = shots;

    match format {
        OutputFormat::Json => {
            let response = engine.simulate(&request).await;
            print!("{}", to_json(&response)?);
            if let SimulateResponse {
                success: false,
                error: Some(error),
                ..
            } = response
            {
                anyhow::bail!(error);
            }
            Ok(())
        }
        OutputFormat::Table => {
            let info = engine.backend_info()?;
            let shots = shots.unwrap_or(engine.config().execution.default_shots);
            println!(
                "{} Simulating {} on {} ({} shots)",
                style("→").cyan().bold(),
                style(input).green(),
                style(&info.name).yellow(),
                shots
            );

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Running...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let result = engine.run(&request).await;
            spinner.finish_and_clear();

            print_results(&result?, shots);
            Ok(())
        }
    }
}

/// Print a counts histogram, most frequent outcomes first.
pub fn print_results(result: &SimulationResult, shots: u32) {
    println!(
        "\n{} Results ({} qubits, depth {}, {} gates):",
        style("✓").green().bold(),
        result.num_qubits,
        result.depth,
        result.gate_count
    );

    let sorted = result.counts.sorted_by_count();
    let total = f64::from(shots);

    for (bitstring, count) in sorted.iter().take(16) {
        #[allow(clippy::cast_precision_loss)]
        let prob = *count as f64 / total * 100.0;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > 16 {
        println!("  ... and {} more outcomes", sorted.len() - 16);
    }

    let recorded = result.counts.total_shots();
    if recorded < u64::from(shots) {
        println!(
            "\n  {} of {} shots lost to rounding",
            style(u64::from(shots) - recorded).yellow(),
            shots
        );
    }

    if let Some(statevector) = &result.statevector {
        println!("\n  Statevector: {} amplitudes", statevector.len());
    }
}
