//! qplay Circuit Intermediate Representation
//!
//! This crate holds the closed gate-set IR shared by every other qplay crate:
//! the gate catalog, validated circuits, and the builder that turns an untrusted
//! structural description into a circuit.
//!
//! # Overview
//!
//! A [`Circuit`] is built once from a [`CircuitData`] payload and is immutable
//! afterwards. Every [`GateOp`] it contains satisfies the catalog arity, stays
//! within the qubit range, and (for `CNOT`) has distinct control and target.
//! Terminal measurements are never stored; [`Circuit::instructions`] appends one
//! per qubit when a consumer needs the measured form.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qplay_ir::{Circuit, CircuitData, GateData};
//!
//! let data = CircuitData {
//!     qubits: 2,
//!     gates: vec![GateData::new("H", [0]), GateData::new("CNOT", [0, 1])],
//! };
//!
//! let circuit = Circuit::from_data(&data).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! assert_eq!(circuit.gate_count(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Mnemonic |
//! |------|--------|----------|
//! | `H` | 1 | `h` |
//! | `X`, `Y`, `Z` | 1 | `x`, `y`, `z` |
//! | `S` | 1 | `s` |
//! | `T` | 1 | `t` |
//! | `CNOT` | 2 | `cx` |

pub mod builder;
pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use builder::{CircuitData, GateData};
pub use circuit::Circuit;
pub use dag::DependencyDag;
pub use error::{IrError, IrResult};
pub use gate::GateKind;
pub use instruction::{GateOp, Instruction};
pub use qubit::{ClbitId, QubitId};
