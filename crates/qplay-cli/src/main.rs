//! qplay Command-Line Interface
//!
//! Converts circuit descriptions to and from OpenQASM 2.0, generates
//! Qiskit-style source, and runs circuits on the local simulator under a
//! deadline.
//!
//! ```text
//!   circuit.json ──→ qplay export-qasm ──→ circuit.qasm
//!   circuit.qasm ──→ qplay import-qasm ──→ circuit.json
//!   circuit.json ──→ qplay simulate    ──→ counts
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use qplay_hal::BackendPreference;

mod commands;

use commands::{backends, common, export, import, simulate, validate, version};

/// qplay - circuit interchange and bounded simulation
#[derive(Parser)]
#[command(name = "qplay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ~/.qplay/config.yaml when present)
    #[arg(short, long, global = true, env = "QPLAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for simulation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a circuit on the local simulator
    Simulate {
        /// Input file (JSON circuit description or QASM), `-` for stdin
        input: String,

        /// Number of shots
        #[arg(short, long)]
        shots: Option<u32>,

        /// Deadline in seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Simulator API generation (auto, sampling, legacy)
        #[arg(short, long)]
        backend: Option<BackendPreference>,

        /// RNG seed for reproducible counts
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Check a circuit description without running it
    Validate {
        /// Input file (JSON circuit description), `-` for stdin
        input: String,
    },

    /// Convert a circuit description to OpenQASM 2.0
    ExportQasm {
        /// Input file (JSON circuit description), `-` for stdin
        input: String,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate Qiskit-style Python source for a circuit description
    ExportCode {
        /// Input file (JSON circuit description), `-` for stdin
        input: String,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert OpenQASM text back into a circuit description
    ImportQasm {
        /// Input file (QASM), `-` for stdin
        input: String,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List compiled-in simulator backends
    Backends,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = run(cli).await;

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = common::load_config(cli.config.as_deref())?;

    // Setup logging
    let filter = match cli.verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    let init = match filter {
        Some(filter) => qplay_engine::init_tracing(
            filter,
            config.logging.format.parse().unwrap_or_default(),
        ),
        None => qplay_engine::telemetry::init_from_config(&config.logging),
    };
    if let Err(e) = init {
        eprintln!("{} {e}", style("Warning:").yellow());
    }

    match cli.command {
        Commands::Simulate {
            input,
            shots,
            timeout,
            backend,
            seed,
            format,
        } => {
            let overrides = simulate::Overrides {
                timeout_secs: timeout,
                backend,
                seed,
            };
            simulate::execute(config, &input, shots, overrides, format).await
        }

        Commands::Validate { input } => validate::execute(config, &input),

        Commands::ExportQasm { input, output } => {
            export::execute_qasm(config, &input, output.as_deref())
        }

        Commands::ExportCode { input, output } => {
            export::execute_code(config, &input, output.as_deref())
        }

        Commands::ImportQasm { input, output } => {
            import::execute(config, &input, output.as_deref())
        }

        Commands::Backends => backends::execute(config),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_defaults() {
        let cli = Cli::try_parse_from(["qplay", "simulate", "bell.json"]).unwrap();
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Simulate {
                input,
                shots,
                timeout,
                backend,
                seed,
                format,
            } => {
                assert_eq!(input, "bell.json");
                assert_eq!(shots, None);
                assert_eq!(timeout, None);
                assert_eq!(backend, None);
                assert_eq!(seed, None);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_simulate_all_options() {
        let cli = Cli::try_parse_from([
            "qplay", "-vv", "simulate", "-", "--shots", "100", "--timeout", "5", "--backend",
            "legacy", "--seed", "7", "--format", "table",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Simulate {
                input,
                shots,
                timeout,
                backend,
                seed,
                format,
            } => {
                assert_eq!(input, "-");
                assert_eq!(shots, Some(100));
                assert_eq!(timeout, Some(5));
                assert_eq!(backend, Some(BackendPreference::Legacy));
                assert_eq!(seed, Some(7));
                assert_eq!(format, OutputFormat::Table);
            }
            _ => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_simulate_rejects_unknown_backend() {
        assert!(
            Cli::try_parse_from(["qplay", "simulate", "c.json", "--backend", "quantum"]).is_err()
        );
        assert!(Cli::try_parse_from(["qplay", "simulate", "c.json", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_simulate_requires_input() {
        assert!(Cli::try_parse_from(["qplay", "simulate"]).is_err());
    }

    #[test]
    fn test_export_commands() {
        let cli =
            Cli::try_parse_from(["qplay", "export-qasm", "c.json", "-o", "c.qasm"]).unwrap();
        match cli.command {
            Commands::ExportQasm { input, output } => {
                assert_eq!(input, "c.json");
                assert_eq!(output, Some(PathBuf::from("c.qasm")));
            }
            _ => panic!("expected export-qasm"),
        }

        let cli = Cli::try_parse_from(["qplay", "export-code", "c.json"]).unwrap();
        assert!(matches!(cli.command, Commands::ExportCode { output: None, .. }));

        let cli = Cli::try_parse_from(["qplay", "import-qasm", "c.qasm"]).unwrap();
        assert!(matches!(cli.command, Commands::ImportQasm { .. }));
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["qplay", "backends", "--config", "/etc/qplay.yaml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/qplay.yaml")));
        assert!(matches!(cli.command, Commands::Backends));
    }

    #[test]
    fn test_version_and_validate() {
        let cli = Cli::try_parse_from(["qplay", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));

        let cli = Cli::try_parse_from(["qplay", "validate", "c.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { .. }));
    }
}
