//! Building circuits from structural descriptions.
//!
//! A [`CircuitData`] is the untrusted JSON shape clients submit:
//!
//! ```json
//! { "qubits": 2, "gates": [{ "type": "H", "qubits": [0] },
//!                          { "type": "CNOT", "qubits": [0, 1] }] }
//! ```
//!
//! Gate types are matched case-insensitively against the catalog. Types that
//! are empty or not in the catalog are skipped rather than rejected, so older
//! clients that send extra gate kinds still get a circuit back. Everything
//! else that breaks an invariant is an [`IrError::InvalidCircuit`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::gate::GateKind;
use crate::instruction::GateOp;
use crate::qubit::QubitId;

fn default_qubits() -> i64 {
    1
}

/// Structural description of a circuit.
///
/// Integer fields are signed so that negative input reaches the builder and
/// is reported as an invalid circuit rather than a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitData {
    /// Number of qubits.
    #[serde(default = "default_qubits")]
    pub qubits: i64,
    /// Gate entries in submission order.
    #[serde(default)]
    pub gates: Vec<GateData>,
}

impl Default for CircuitData {
    fn default() -> Self {
        Self {
            qubits: default_qubits(),
            gates: vec![],
        }
    }
}

/// One gate entry of a [`CircuitData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateData {
    /// Gate type name, e.g. `"H"` or `"CNOT"`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Operand indices.
    #[serde(default)]
    pub qubits: Vec<i64>,
    /// Numeric parameters.
    #[serde(default)]
    pub params: Vec<f64>,
}

impl GateData {
    /// Create a parameterless gate entry.
    pub fn new(kind: impl Into<String>, qubits: impl IntoIterator<Item = i64>) -> Self {
        Self {
            kind: kind.into(),
            qubits: qubits.into_iter().collect(),
            params: vec![],
        }
    }
}

impl Circuit {
    /// Build a circuit from a structural description.
    pub fn from_data(data: &CircuitData) -> IrResult<Self> {
        let num_qubits = u32::try_from(data.qubits)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or_else(|| {
                IrError::invalid(format!(
                    "qubit count must be at least 1, got {}",
                    data.qubits
                ))
            })?;

        let mut ops = Vec::with_capacity(data.gates.len());
        for (position, gate) in data.gates.iter().enumerate() {
            let Some(kind) = GateKind::from_name(&gate.kind) else {
                debug!(position, gate_type = %gate.kind, "skipping unrecognized gate");
                continue;
            };
            let qubits = gate
                .qubits
                .iter()
                .map(|&q| {
                    u32::try_from(q).map(QubitId).map_err(|_| {
                        IrError::invalid(format!(
                            "gate {kind} at position {position} has invalid qubit index {q}"
                        ))
                    })
                })
                .collect::<IrResult<Vec<_>>>()?;
            ops.push(GateOp {
                kind,
                qubits,
                params: gate.params.clone(),
            });
        }

        Circuit::new(num_qubits, ops)
    }

    /// Convert back into a structural description.
    pub fn to_data(&self) -> CircuitData {
        CircuitData {
            qubits: i64::from(self.num_qubits()),
            gates: self
                .ops()
                .iter()
                .map(|op| GateData {
                    kind: op.kind.type_name().to_string(),
                    qubits: op.qubits.iter().map(|q| i64::from(q.0)).collect(),
                    params: op.params.clone(),
                })
                .collect(),
        }
    }
}
