//! Gate operations and the instruction stream derived from a circuit.

use serde::{Deserialize, Serialize};

use crate::gate::GateKind;
use crate::qubit::{ClbitId, QubitId};

/// A single gate application.
///
/// Only [`Circuit`](crate::Circuit) construction produces these with the
/// catalog invariants checked; fields stay public for reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateOp {
    /// Which gate.
    pub kind: GateKind,
    /// Operands in order. For `CNOT` this is `[control, target]`.
    pub qubits: Vec<QubitId>,
    /// Numeric parameters. Empty for every gate in the current catalog.
    pub params: Vec<f64>,
}

impl GateOp {
    /// Create a parameterless gate op.
    pub fn new(kind: GateKind, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind,
            qubits: qubits.into_iter().collect(),
            params: vec![],
        }
    }
}

/// An element of the executable instruction stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction<'a> {
    /// A gate from the circuit body.
    Gate(&'a GateOp),
    /// A terminal measurement appended at emission or execution time.
    Measure {
        /// Measured qubit.
        qubit: QubitId,
        /// Destination classical bit.
        clbit: ClbitId,
    },
}
