//! Backend trait and configuration.
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run() ──→ statevector()
//!    (sync, &ref)       (async)       (async)     (async, optional)
//! ```
//!
//! `run` always measures every qubit at the end of the circuit; circuits
//! never carry measurements themselves. Deadlines are the caller's job:
//! implementations may keep working after the caller stops waiting, and
//! must tolerate their result being dropped.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use qplay_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::{Amplitude, Counts};

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend instance.
    pub name: String,
    /// Cap on qubits, below the backend's own limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_qubits: Option<u32>,
    /// RNG seed for reproducible sampling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_qubits: None,
            seed: None,
        }
    }

    /// Cap the qubit count.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = Some(max_qubits);
        self
    }

    /// Seed the backend's RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("max_qubits", &self.max_qubits)
            .field("seed", &self.seed)
            .finish()
    }
}

/// Trait for simulation backends.
///
/// # Contract
///
/// - `capabilities()` is synchronous and infallible; the value is cached at
///   construction time.
/// - `run()` returns a histogram whose total never exceeds `shots`.
/// - `statevector()` runs the measurement-free circuit and returns
///   `2^n` amplitudes indexed with qubit `k` in bit `k`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Check a circuit and shot count against the capabilities.
    async fn validate(&self, circuit: &Circuit, shots: u32) -> HalResult<()> {
        let caps = self.capabilities();
        if circuit.num_qubits() > caps.max_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit has {} qubits, {} supports at most {}",
                circuit.num_qubits(),
                self.name(),
                caps.max_qubits
            )));
        }
        if shots == 0 || shots > caps.max_shots {
            return Err(HalError::InvalidShots(format!(
                "shots must be between 1 and {}, got {shots}",
                caps.max_shots
            )));
        }
        Ok(())
    }

    /// Run the circuit with every qubit measured at the end.
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<Counts>;

    /// Exact amplitudes of the measurement-free circuit.
    async fn statevector(&self, circuit: &Circuit) -> HalResult<Vec<Amplitude>> {
        let _ = circuit;
        Err(HalError::Unsupported(format!(
            "{} does not expose a statevector",
            self.name()
        )))
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::ApiGeneration;
    use qplay_ir::{CircuitData, GateData};

    struct FixedBackend {
        caps: Capabilities,
    }

    #[async_trait]
    impl Backend for FixedBackend {
        fn name(&self) -> &str {
            "fixed"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<Counts> {
            let mut counts = Counts::new();
            counts.add("0".repeat(circuit.num_qubits() as usize), u64::from(shots));
            Ok(counts)
        }
    }

    fn backend() -> FixedBackend {
        FixedBackend {
            caps: Capabilities::simulator("fixed", ApiGeneration::Sampling, 2).with_max_shots(100),
        }
    }

    fn circuit(qubits: i64) -> Circuit {
        Circuit::from_data(&CircuitData {
            qubits,
            gates: vec![GateData::new("H", [0])],
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_default_validate() {
        let backend = backend();
        assert!(backend.validate(&circuit(2), 100).await.is_ok());
        assert!(matches!(
            backend.validate(&circuit(3), 10).await,
            Err(HalError::CircuitTooLarge(_))
        ));
        assert!(matches!(
            backend.validate(&circuit(1), 0).await,
            Err(HalError::InvalidShots(_))
        ));
        assert!(matches!(
            backend.validate(&circuit(1), 101).await,
            Err(HalError::InvalidShots(_))
        ));
    }

    #[tokio::test]
    async fn test_default_statevector_unsupported() {
        let backend = backend();
        assert!(matches!(
            backend.statevector(&circuit(1)).await,
            Err(HalError::Unsupported(_))
        ));
        let counts = backend.run(&circuit(2), 5).await.unwrap();
        assert_eq!(counts.get("00"), 5);
    }

    #[test]
    fn test_config_builder() {
        let config = BackendConfig::new("sim").with_max_qubits(8).with_seed(7);
        assert_eq!(config.max_qubits, Some(8));
        assert_eq!(config.seed, Some(7));
    }
}
