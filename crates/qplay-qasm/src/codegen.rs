//! Qiskit-style Python source generation.
//!
//! The program is derived from the emitter's assembly text rather than from
//! the circuit directly, so the generated source always agrees with what
//! [`emit`] produces. Changing the emitter's statement format changes the
//! input this module reads.

use qplay_ir::{Circuit, GateKind};

use crate::emitter::emit;
use crate::error::ParseResult;
use crate::parser::statement::{Statement, read_line};

/// Generate a Python program that rebuilds `circuit` with Qiskit.
///
/// ```rust
/// use qplay_ir::{Circuit, CircuitData, GateData};
///
/// let circuit = Circuit::from_data(&CircuitData {
///     qubits: 1,
///     gates: vec![GateData::new("X", [0])],
/// })
/// .unwrap();
///
/// let code = qplay_qasm::generate_code(&circuit).unwrap();
/// assert!(code.contains("circuit.x(0)\n"));
/// ```
pub fn generate_code(circuit: &Circuit) -> ParseResult<String> {
    let qasm = emit(circuit);
    let mut generator = SourceGenerator::new();

    for (idx, line) in qasm.lines().enumerate() {
        match read_line(idx + 1, line)? {
            Some(Statement::QuantumRegister { size, .. }) => generator.declare(size),
            Some(Statement::Gate { kind, operands }) => {
                let indices: Vec<u64> = operands.iter().map(|o| o.index).collect();
                generator.gate(kind, &indices);
            }
            Some(Statement::Measure { qubit, clbit }) => generator.measure(qubit.index, clbit.index),
            None => {}
        }
    }

    Ok(generator.output)
}

/// Qiskit `QuantumCircuit` method for a gate.
fn method_name(kind: GateKind) -> &'static str {
    match kind {
        GateKind::H => "h",
        GateKind::X => "x",
        GateKind::Y => "y",
        GateKind::Z => "z",
        GateKind::S => "s",
        GateKind::T => "t",
        GateKind::CNOT => "cx",
    }
}

struct SourceGenerator {
    output: String,
}

impl SourceGenerator {
    fn new() -> Self {
        let mut generator = Self {
            output: String::new(),
        };
        generator.writeln("from qiskit import QuantumCircuit");
        generator.writeln("");
        generator
    }

    fn declare(&mut self, size: u64) {
        self.writeln(&format!("circuit = QuantumCircuit({size}, {size})"));
    }

    fn gate(&mut self, kind: GateKind, qubits: &[u64]) {
        let args = qubits
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.writeln(&format!("circuit.{}({args})", method_name(kind)));
    }

    fn measure(&mut self, qubit: u64, clbit: u64) {
        self.writeln(&format!("circuit.measure({qubit}, {clbit})"));
    }

    fn writeln(&mut self, s: &str) {
        self.output.push_str(s);
        self.output.push('\n');
    }
}
