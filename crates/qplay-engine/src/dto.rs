//! Request and response shapes.
//!
//! Field names are the JSON contract seen by clients. Optional fields are
//! left out of the serialized form entirely rather than sent as `null`.

use serde::{Deserialize, Serialize};

use qplay_hal::{Amplitude, Counts};
use qplay_ir::CircuitData;

use crate::executor::SimulationResult;

/// Run a circuit and return its outcome distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulateRequest {
    /// The circuit to run.
    #[serde(default)]
    pub circuit_data: CircuitData,
    /// Shots to sample; the configured default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u32>,
}

impl SimulateRequest {
    /// Request with the default shot count.
    pub fn new(circuit_data: CircuitData) -> Self {
        Self {
            circuit_data,
            shots: None,
        }
    }

    /// Set the shot count.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = Some(shots);
        self
    }
}

/// Outcome of a simulate call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<Counts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statevector: Option<Vec<Amplitude>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_qubits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SimulateResponse {
    /// Successful run.
    pub fn completed(result: SimulationResult) -> Self {
        Self {
            success: true,
            counts: Some(result.counts),
            statevector: result.statevector,
            num_qubits: Some(result.num_qubits),
            depth: Some(result.depth),
            gate_count: Some(result.gate_count),
            error: None,
        }
    }

    /// Failed run, carrying the error text.
    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            counts: None,
            statevector: None,
            num_qubits: None,
            depth: None,
            gate_count: None,
            error: Some(error.to_string()),
        }
    }
}

/// Outcome of a validate call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qubit_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidateResponse {
    pub fn valid(qubit_count: u32, depth: usize, gate_count: usize) -> Self {
        Self {
            valid: true,
            qubit_count: Some(qubit_count),
            depth: Some(depth),
            gate_count: Some(gate_count),
            error: None,
        }
    }

    pub fn invalid(error: impl ToString) -> Self {
        Self {
            valid: false,
            qubit_count: None,
            depth: None,
            gate_count: None,
            error: Some(error.to_string()),
        }
    }
}

/// OpenQASM 2.0 text of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportQasmResponse {
    pub qasm: String,
}

/// Qiskit-style Python source of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCodeResponse {
    pub code: String,
}

/// Assembly text to convert back into a circuit description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportQasmRequest {
    pub qasm: String,
}

/// Circuit description recovered from assembly text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportQasmResponse {
    pub circuit_data: CircuitData,
}
