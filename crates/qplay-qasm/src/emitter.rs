//! OpenQASM 2.0 emitter.

use qplay_ir::{Circuit, Instruction};

/// Emit a circuit as OpenQASM 2.0 source.
///
/// The output is a pure function of the circuit: a fixed header, one
/// `qreg`/`creg` pair sized to the circuit, one statement per gate op in
/// order, then `measure q[i] -> c[i];` for every qubit in ascending order.
/// Every line, including the last, ends with `\n`.
pub fn emit(circuit: &Circuit) -> String {
    let mut emitter = Qasm2Emitter::new();
    emitter.emit_circuit(circuit);
    emitter.output
}

struct Qasm2Emitter {
    output: String,
}

impl Qasm2Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) {
        let n = circuit.num_qubits();

        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");
        self.writeln(&format!("qreg q[{n}];"));
        self.writeln(&format!("creg c[{n}];"));

        for instruction in circuit.instructions() {
            self.emit_instruction(&instruction);
        }
    }

    fn emit_instruction(&mut self, instruction: &Instruction<'_>) {
        match instruction {
            Instruction::Gate(op) => {
                let operands = op
                    .qubits
                    .iter()
                    .map(|q| format!("q[{}]", q.0))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.writeln(&format!("{} {operands};", op.kind.name()));
            }
            Instruction::Measure { qubit, clbit } => {
                self.writeln(&format!("measure q[{}] -> c[{}];", qubit.0, clbit.0));
            }
        }
    }

    fn writeln(&mut self, s: &str) {
        self.output.push_str(s);
        self.output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qplay_ir::{CircuitData, GateData};

    fn bell() -> Circuit {
        Circuit::from_data(&CircuitData {
            qubits: 2,
            gates: vec![GateData::new("H", [0]), GateData::new("CNOT", [0, 1])],
        })
        .unwrap()
    }

    #[test]
    fn test_emit_bell() {
        let expected = "\
OPENQASM 2.0;
include \"qelib1.inc\";
qreg q[2];
creg c[2];
h q[0];
cx q[0], q[1];
measure q[0] -> c[0];
measure q[1] -> c[1];
";
        assert_eq!(emit(&bell()), expected);
    }

    #[test]
    fn test_emit_is_deterministic() {
        let circuit = bell();
        assert_eq!(emit(&circuit), emit(&circuit.clone()));
    }

    #[test]
    fn test_emit_empty_circuit_still_measures() {
        let circuit = Circuit::from_data(&CircuitData::default()).unwrap();
        let qasm = emit(&circuit);
        assert!(qasm.ends_with("creg c[1];\nmeasure q[0] -> c[0];\n"));
    }

    #[test]
    fn test_every_gate_has_a_statement() {
        for kind in qplay_ir::GateKind::ALL {
            let qubits: Vec<i64> = (0..kind.num_qubits() as i64).collect();
            let circuit = Circuit::from_data(&CircuitData {
                qubits: 2,
                gates: vec![GateData::new(kind.type_name(), qubits)],
            })
            .unwrap();
            let qasm = emit(&circuit);
            assert!(
                qasm.lines().any(|l| l.starts_with(&format!("{} q[0]", kind.name()))),
                "{kind} missing from\n{qasm}"
            );
        }
    }
}
