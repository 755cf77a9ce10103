//! Helpers shared by both API generations.
#![cfg_attr(
    not(any(feature = "sampler", feature = "legacy-execute")),
    allow(dead_code)
)]

use qplay_hal::{Amplitude, BackendConfig, HalError, HalResult};
use qplay_ir::Circuit;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::statevector::Statevector;
use crate::{DEFAULT_MAX_QUBITS, MAX_SUPPORTED_QUBITS};

/// Resolve the qubit limit requested by a backend config.
pub(crate) fn max_qubits(config: &BackendConfig) -> HalResult<u32> {
    match config.max_qubits {
        None => Ok(DEFAULT_MAX_QUBITS),
        Some(n) if (1..=MAX_SUPPORTED_QUBITS).contains(&n) => Ok(n),
        Some(n) => Err(HalError::Configuration(format!(
            "max_qubits must be between 1 and {MAX_SUPPORTED_QUBITS}, got {n}"
        ))),
    }
}

/// Fresh RNG, seeded when a seed is configured.
pub(crate) fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Run simulator work on the blocking pool.
///
/// If the caller stops waiting, the work still runs to completion and its
/// result is dropped.
pub(crate) async fn run_blocking<T, F>(work: F) -> HalResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| HalError::Backend(format!("simulation task failed: {e}")))
}

/// Exact amplitudes of the measurement-free circuit, off the async runtime.
pub(crate) async fn statevector_of(circuit: &Circuit) -> HalResult<Vec<Amplitude>> {
    let circuit = circuit.clone();
    run_blocking(move || Statevector::from_circuit(&circuit).to_amplitudes()).await
}
