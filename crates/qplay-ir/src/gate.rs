//! The gate catalog.
//!
//! [`GateKind`] is the single source of truth for which gates exist. The
//! emitter, parser, source generator and simulator all match on it without a
//! wildcard arm, so adding a variant fails to compile until every stage
//! handles it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gates in the closed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// Controlled-X gate. Operands are `[control, target]`.
    CNOT,
}

impl GateKind {
    /// Every gate in the catalog, in catalog order.
    pub const ALL: [GateKind; 7] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::S,
        GateKind::T,
        GateKind::CNOT,
    ];

    /// Number of qubits the gate acts on.
    #[inline]
    pub fn num_qubits(self) -> usize {
        match self {
            GateKind::H | GateKind::X | GateKind::Y | GateKind::Z | GateKind::S | GateKind::T => 1,
            GateKind::CNOT => 2,
        }
    }

    /// Number of numeric parameters the gate takes.
    #[inline]
    pub fn num_params(self) -> usize {
        match self {
            GateKind::H
            | GateKind::X
            | GateKind::Y
            | GateKind::Z
            | GateKind::S
            | GateKind::T
            | GateKind::CNOT => 0,
        }
    }

    /// Lowercase assembly mnemonic (`h`, `cx`, ...).
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::S => "s",
            GateKind::T => "t",
            GateKind::CNOT => "cx",
        }
    }

    /// Name used in structural circuit descriptions (`H`, `CNOT`, ...).
    #[inline]
    pub fn type_name(self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::S => "S",
            GateKind::T => "T",
            GateKind::CNOT => "CNOT",
        }
    }

    /// Look up a gate by name, case-insensitively.
    ///
    /// Both the structural name and the mnemonic are accepted, so `"CNOT"`,
    /// `"cnot"`, `"CX"` and `"cx"` all resolve to [`GateKind::CNOT`].
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("cnot") {
            return Some(GateKind::CNOT);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
