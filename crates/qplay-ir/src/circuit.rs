//! Validated, immutable circuits.

use serde::Serialize;

use crate::dag::DependencyDag;
use crate::error::{IrError, IrResult};
use crate::instruction::{GateOp, Instruction};
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit over the closed gate catalog.
///
/// Circuits are validated on construction and cannot be mutated afterwards,
/// so every op is known to have the right arity, in-range operands and
/// distinct `CNOT` control and target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    num_qubits: u32,
    ops: Vec<GateOp>,
}

impl Circuit {
    /// Create a circuit, checking every op against the catalog.
    pub fn new(num_qubits: u32, ops: Vec<GateOp>) -> IrResult<Self> {
        if num_qubits < 1 {
            return Err(IrError::invalid("circuit must have at least 1 qubit"));
        }
        for (position, op) in ops.iter().enumerate() {
            validate_op(op, num_qubits, position)?;
        }
        Ok(Self { num_qubits, ops })
    }

    /// Number of qubits (and classical bits).
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Gate ops in submission order.
    #[inline]
    pub fn ops(&self) -> &[GateOp] {
        &self.ops
    }

    /// Number of gate ops. Terminal measurements are not counted.
    #[inline]
    pub fn gate_count(&self) -> usize {
        self.ops.len()
    }

    /// Longest dependency chain through the gate ops.
    ///
    /// Two ops depend on each other when they share a qubit. Terminal
    /// measurements do not contribute.
    pub fn depth(&self) -> usize {
        DependencyDag::from_circuit(self).depth()
    }

    /// Qubits in ascending order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> {
        (0..self.num_qubits).map(QubitId)
    }

    /// The gate ops followed by one measurement per qubit, `q[i] -> c[i]`.
    pub fn instructions(&self) -> impl Iterator<Item = Instruction<'_>> {
        self.ops.iter().map(Instruction::Gate).chain(self.qubits().map(|qubit| {
            Instruction::Measure {
                qubit,
                clbit: ClbitId::from(qubit),
            }
        }))
    }
}

fn validate_op(op: &GateOp, num_qubits: u32, position: usize) -> IrResult<()> {
    let expected = op.kind.num_qubits();
    if op.qubits.len() != expected {
        return Err(IrError::invalid(format!(
            "gate {} at position {position} requires {expected} qubit(s), got {}",
            op.kind,
            op.qubits.len()
        )));
    }
    if op.params.len() != op.kind.num_params() {
        return Err(IrError::invalid(format!(
            "gate {} at position {position} takes {} parameter(s), got {}",
            op.kind,
            op.kind.num_params(),
            op.params.len()
        )));
    }
    if let Some(qubit) = op.qubits.iter().find(|q| q.0 >= num_qubits) {
        return Err(IrError::invalid(format!(
            "gate {} at position {position} targets qubit {} but the circuit has {num_qubits} qubit(s)",
            op.kind, qubit.0
        )));
    }
    if expected == 2 && op.qubits[0] == op.qubits[1] {
        return Err(IrError::invalid(format!(
            "gate {} at position {position} uses qubit {} as both control and target",
            op.kind, op.qubits[0].0
        )));
    }
    Ok(())
}
