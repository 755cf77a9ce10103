//! Legacy execute API generation.
//!
//! The [`LegacyExecutor`] is the older synchronous call: run the circuit for
//! a number of shots and get back exact per-shot counts keyed by bitstring.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};

use qplay_hal::{
    Amplitude, ApiGeneration, Backend, BackendConfig, BackendFactory, Capabilities, Counts,
    HalResult,
};
use qplay_ir::Circuit;

use crate::statevector::{Statevector, outcome_to_bitstring};

/// The synchronous execute primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyExecutor {
    seed: Option<u64>,
}

impl LegacyExecutor {
    /// Create an executor, optionally seeded.
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    /// Execute `shots` measured runs and count the bitstrings.
    pub fn execute(&self, circuit: &Circuit, shots: u32) -> FxHashMap<String, u64> {
        let sv = Statevector::from_circuit(circuit);
        let width = sv.num_qubits();
        let mut rng = crate::common::rng(self.seed);

        let mut counts = FxHashMap::default();
        for (shot, outcome) in sv.sample(shots, &mut rng).into_iter().enumerate() {
            *counts.entry(outcome_to_bitstring(outcome, width)).or_insert(0) += 1;
            if shot > 0 && shot % 10_000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }
        counts
    }
}

/// Backend over the legacy execute primitive.
pub struct LegacyExecuteBackend {
    capabilities: Capabilities,
    executor: LegacyExecutor,
}

impl LegacyExecuteBackend {
    /// Registry name.
    pub const NAME: &'static str = "legacy-execute";

    /// Create a backend with default limits.
    pub fn new() -> Self {
        Self::with_max_qubits(crate::DEFAULT_MAX_QUBITS)
    }

    /// Create a backend accepting at most `max_qubits`.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(
                Self::NAME,
                ApiGeneration::LegacyExecute,
                max_qubits,
            ),
            executor: LegacyExecutor::default(),
        }
    }

    /// Seed the executor for reproducible counts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.executor = LegacyExecutor::new(Some(seed));
        self.capabilities = self.capabilities.with_feature("seeded");
        self
    }
}

impl Default for LegacyExecuteBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for LegacyExecuteBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit), fields(qubits = circuit.num_qubits()))]
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<Counts> {
        self.validate(circuit, shots).await?;

        let executor = self.executor;
        let owned = circuit.clone();
        let raw = crate::common::run_blocking(move || executor.execute(&owned, shots)).await?;
        debug!(outcomes = raw.len(), "executor returned counts");

        Ok(raw.into_iter().collect())
    }

    async fn statevector(&self, circuit: &Circuit) -> HalResult<Vec<Amplitude>> {
        self.validate(circuit, 1).await?;
        crate::common::statevector_of(circuit).await
    }
}

impl BackendFactory for LegacyExecuteBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let backend = Self::with_max_qubits(crate::common::max_qubits(&config)?);
        Ok(match config.seed {
            Some(seed) => backend.with_seed(seed),
            None => backend,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qplay_ir::{CircuitData, GateData};

    fn ghz(n: i64) -> Circuit {
        let mut gates = vec![GateData::new("H", [0])];
        for q in 0..n - 1 {
            gates.push(GateData::new("CNOT", [q, q + 1]));
        }
        Circuit::from_data(&CircuitData { qubits: n, gates }).unwrap()
    }

    #[test]
    fn test_execute_counts_every_shot() {
        let counts = LegacyExecutor::new(Some(3)).execute(&ghz(3), 500);
        assert_eq!(counts.values().sum::<u64>(), 500);
        assert!(counts.keys().all(|k| k == "000" || k == "111"));
    }

    #[tokio::test]
    async fn test_backend_counts_sum_to_shots() {
        let backend = LegacyExecuteBackend::new().with_seed(11);
        let counts = backend.run(&ghz(4), 1000).await.unwrap();
        assert_eq!(counts.total_shots(), 1000);
        assert_eq!(counts.len(), 2);
    }

    #[tokio::test]
    async fn test_bit_order() {
        let circuit = Circuit::from_data(&CircuitData {
            qubits: 3,
            gates: vec![GateData::new("X", [0])],
        })
        .unwrap();
        let counts = LegacyExecuteBackend::new().run(&circuit, 10).await.unwrap();
        assert_eq!(counts.get("001"), 10);
    }

    #[test]
    fn test_capabilities() {
        let backend = LegacyExecuteBackend::new();
        assert_eq!(backend.name(), "legacy-execute");
        assert_eq!(
            backend.capabilities().generation,
            ApiGeneration::LegacyExecute
        );
        assert_eq!(backend.capabilities().max_qubits, crate::DEFAULT_MAX_QUBITS);
    }
}
