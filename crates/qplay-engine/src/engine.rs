//! The engine: one entry point per client operation.

use std::sync::Arc;

use tracing::{info, warn};

use qplay_hal::{Backend, BackendConfig, BackendRegistry, HalError};
use qplay_ir::{Circuit, CircuitData};

use crate::config::EngineConfig;
use crate::dto::{
    ExportCodeResponse, ExportQasmResponse, ImportQasmRequest, ImportQasmResponse,
    SimulateRequest, SimulateResponse, ValidateResponse,
};
use crate::error::{EngineError, EngineResult};
use crate::executor::{Executor, SimulationOptions, SimulationResult};

/// Name and generation of the backend an engine runs on.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BackendInfo {
    pub name: String,
    pub generation: String,
    pub max_qubits: u32,
    pub max_shots: u32,
    pub statevector: bool,
    /// Counts repeat across runs.
    pub seeded: bool,
}

/// Circuit interchange and bounded execution.
///
/// Holds only immutable state, so one engine can serve concurrent requests
/// behind an `Arc`.
pub struct Engine {
    config: EngineConfig,
    executor: Result<Executor, String>,
}

impl Engine {
    /// Probe the compiled-in simulators and pick one per the configured preference.
    ///
    /// A missing simulation capability does not fail construction; simulate
    /// calls report it while every other operation keeps working.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_registry(&qplay_adapter_sim::registry(), config)
    }

    /// Like [`Engine::new`], probing `registry` instead of the built-in one.
    pub fn with_registry(registry: &BackendRegistry, config: EngineConfig) -> Self {
        let backend_config = backend_config(&config);
        let executor = match registry.select(config.backend.preference, &backend_config) {
            Ok(backend) => Ok(Executor::new(
                Arc::from(backend),
                config.execution.statevector_max_qubits,
            )),
            Err(e) => {
                warn!(error = %e, "simulation unavailable");
                Err(match e {
                    HalError::BackendUnavailable(reason) => reason,
                    other => other.to_string(),
                })
            }
        };
        Self { config, executor }
    }

    /// Use an already constructed backend.
    pub fn with_backend(backend: Arc<dyn Backend>, config: EngineConfig) -> Self {
        info!(backend = backend.name(), "using provided simulation backend");
        let executor = Executor::new(backend, config.execution.statevector_max_qubits);
        Self {
            config,
            executor: Ok(executor),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The selected backend, if any.
    pub fn backend_info(&self) -> EngineResult<BackendInfo> {
        let executor = self.executor()?;
        let caps = executor.backend().capabilities();
        Ok(BackendInfo {
            name: executor.backend().name().to_string(),
            generation: caps.generation.as_str().to_string(),
            max_qubits: caps.max_qubits,
            max_shots: caps.max_shots,
            statevector: caps.statevector,
            seeded: caps.has_feature("seeded"),
        })
    }

    fn executor(&self) -> EngineResult<&Executor> {
        self.executor
            .as_ref()
            .map_err(|reason| EngineError::BackendUnavailable(reason.clone()))
    }

    /// Reject descriptions wider than `execution.max_qubits` before anything
    /// is allocated for them.
    fn check_width(&self, data: &CircuitData) -> EngineResult<()> {
        let max_qubits = self.config.execution.max_qubits;
        if data.qubits > i64::from(max_qubits) {
            return Err(EngineError::InvalidRequest(format!(
                "circuit uses {} qubits, limit is {max_qubits}",
                data.qubits
            )));
        }
        Ok(())
    }

    fn build(&self, data: &CircuitData) -> EngineResult<Circuit> {
        self.check_width(data)?;
        Ok(Circuit::from_data(data)?)
    }

    /// Run a circuit, returning the typed result or the error.
    ///
    /// Request and circuit errors are reported ahead of a missing backend.
    pub async fn run(&self, request: &SimulateRequest) -> EngineResult<SimulationResult> {
        let exec = &self.config.execution;
        let shots = request.shots.unwrap_or(exec.default_shots);
        if shots > exec.max_shots {
            return Err(EngineError::InvalidRequest(format!(
                "shots must be at most {}, got {shots}",
                exec.max_shots
            )));
        }
        self.check_width(&request.circuit_data)?;

        let executor = match &self.executor {
            Ok(executor) => executor,
            Err(reason) => {
                Circuit::from_data(&request.circuit_data)?;
                return Err(EngineError::BackendUnavailable(reason.clone()));
            }
        };

        let options = SimulationOptions {
            shots,
            timeout: exec.timeout(),
        };
        executor.execute(&request.circuit_data, options).await
    }

    /// Run a circuit. Never fails; errors come back as `success: false`.
    pub async fn simulate(&self, request: &SimulateRequest) -> SimulateResponse {
        match self.run(request).await {
            Ok(result) => SimulateResponse::completed(result),
            Err(e) => SimulateResponse::failed(e),
        }
    }

    /// Build the circuit and report its shape without running it.
    pub fn validate(&self, data: &CircuitData) -> ValidateResponse {
        match self.build(data) {
            Ok(circuit) => ValidateResponse::valid(
                circuit.num_qubits(),
                circuit.depth(),
                circuit.gate_count(),
            ),
            Err(e) => ValidateResponse::invalid(e),
        }
    }

    /// OpenQASM 2.0 text for a circuit description.
    pub fn export_qasm(&self, data: &CircuitData) -> EngineResult<ExportQasmResponse> {
        let circuit = self.build(data)?;
        Ok(ExportQasmResponse {
            qasm: qplay_qasm::emit(&circuit),
        })
    }

    /// Qiskit-style Python source for a circuit description.
    pub fn export_code(&self, data: &CircuitData) -> EngineResult<ExportCodeResponse> {
        let circuit = self.build(data)?;
        Ok(ExportCodeResponse {
            code: qplay_qasm::generate_code(&circuit)?,
        })
    }

    /// Circuit description recovered from assembly text.
    pub fn import_qasm(&self, request: &ImportQasmRequest) -> EngineResult<ImportQasmResponse> {
        let max_qubits = self.config.execution.max_qubits;
        let circuit = qplay_qasm::parse_with_limit(&request.qasm, max_qubits)?;
        Ok(ImportQasmResponse {
            circuit_data: circuit.to_data(),
        })
    }
}

fn backend_config(config: &EngineConfig) -> BackendConfig {
    let mut backend = BackendConfig::new("qplay").with_max_qubits(config.execution.max_qubits);
    if let Some(seed) = config.backend.seed {
        backend = backend.with_seed(seed);
    }
    backend
}

#[cfg(test)]
mod tests {
    use super::*;
    use qplay_ir::GateData;

    fn bell() -> CircuitData {
        CircuitData {
            qubits: 2,
            gates: vec![GateData::new("H", [0]), GateData::new("CNOT", [0, 1])],
        }
    }

    #[test]
    fn test_validate_never_needs_backend() {
        let engine = Engine::with_registry(&BackendRegistry::new(), EngineConfig::default());
        let response = engine.validate(&bell());
        assert!(response.valid);
        assert_eq!(response.qubit_count, Some(2));
        assert_eq!(response.depth, Some(2));
        assert_eq!(response.gate_count, Some(2));
    }

    #[test]
    fn test_validate_reports_reason() {
        let engine = Engine::with_registry(&BackendRegistry::new(), EngineConfig::default());
        let data = CircuitData {
            qubits: 2,
            gates: vec![GateData::new("CNOT", [1, 1])],
        };
        let response = engine.validate(&data);
        assert!(!response.valid);
        assert!(response.error.unwrap().starts_with("Invalid circuit"));
    }

    #[test]
    fn test_backend_config_carries_limits() {
        let mut config = EngineConfig::default();
        config.backend.seed = Some(3);
        let backend = backend_config(&config);
        assert_eq!(backend.max_qubits, Some(20));
        assert_eq!(backend.seed, Some(3));
    }
}
