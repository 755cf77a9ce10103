//! OpenQASM 2.0 interchange for qplay
//!
//! This crate converts [`qplay_ir::Circuit`]s to and from text:
//!
//! - [`emit`] writes deterministic OpenQASM 2.0 with terminal measurements.
//! - [`parse`] reads assembly text line by line back into a circuit;
//!   [`parse_with_limit`] also caps the declared qubit count.
//! - [`generate_code`] writes an equivalent Qiskit program.
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use qplay_ir::{Circuit, CircuitData, GateData};
//! use qplay_qasm::{emit, parse};
//!
//! let circuit = Circuit::from_data(&CircuitData {
//!     qubits: 3,
//!     gates: vec![
//!         GateData::new("H", [0]),
//!         GateData::new("CNOT", [0, 2]),
//!         GateData::new("T", [1]),
//!     ],
//! })
//! .unwrap();
//!
//! let qasm = emit(&circuit);
//! assert!(qasm.starts_with("OPENQASM 2.0;\n"));
//! assert_eq!(parse(&qasm).unwrap(), circuit);
//! ```
//!
//! # What the parser skips
//!
//! | Statement | Example |
//! |-----------|---------|
//! | Header / include | `OPENQASM 2.0;` |
//! | Classical registers | `creg c[2];`, `bit[2] c;` |
//! | Measurements | `measure q[0] -> c[0];` |
//! | Barriers | `barrier q;` |
//! | Parameterized gates | `rz(pi/4) q[0];` |
//! | Gates outside the catalog | `ccx q[0], q[1], q[2];` |
//! | Whole-register operands | `h q;`, `cx a,b;` in a `gate` body |

pub mod codegen;
pub mod emitter;
pub mod error;
pub mod lexer;
pub mod parser;

pub use codegen::generate_code;
pub use emitter::emit;
pub use error::{ParseError, ParseResult};
pub use parser::{parse, parse_with_limit};
