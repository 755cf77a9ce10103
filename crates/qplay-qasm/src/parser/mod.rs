//! Line-pattern parser for OpenQASM text.
//!
//! The parser reads human- or emitter-authored text one line at a time. It
//! recognizes register declarations and applications of catalog gates; the
//! header, `include`, `creg`, `measure`, `barrier`, comments and any other
//! mnemonic are skipped. Parameterized gates and multi-statement lines are not
//! handled, so `parse(emit(c)) == c` holds only for circuits whose gates the
//! parser recognizes.

pub(crate) mod statement;

use qplay_ir::{Circuit, GateOp, QubitId};
use rustc_hash::FxHashMap;

use crate::error::{ParseError, ParseResult};
use statement::{Operand, Statement, read_line};

/// Parse assembly text into a circuit.
///
/// Multiple quantum registers are flattened into one qubit index space in
/// declaration order.
pub fn parse(source: &str) -> ParseResult<Circuit> {
    Parser::new(u32::MAX).parse(source)
}

/// Like [`parse`], rejecting declarations that push the total past `max_qubits`.
///
/// The check happens at the declaration, before any gate is read.
pub fn parse_with_limit(source: &str, max_qubits: u32) -> ParseResult<Circuit> {
    Parser::new(max_qubits).parse(source)
}

#[derive(Debug, Clone, Copy)]
struct Register {
    offset: u32,
    size: u32,
}

struct Parser<'a> {
    registers: FxHashMap<&'a str, Register>,
    num_qubits: u32,
    max_qubits: u32,
    ops: Vec<GateOp>,
}

impl<'a> Parser<'a> {
    fn new(max_qubits: u32) -> Self {
        Self {
            registers: FxHashMap::default(),
            num_qubits: 0,
            max_qubits,
            ops: Vec::new(),
        }
    }

    fn parse(mut self, source: &'a str) -> ParseResult<Circuit> {
        for (idx, line) in source.lines().enumerate() {
            let line_no = idx + 1;
            match read_line(line_no, line)? {
                Some(Statement::QuantumRegister { name, size }) => {
                    self.declare(line_no, name, size)?;
                }
                Some(Statement::Gate { kind, operands }) => {
                    let qubits = operands
                        .iter()
                        .map(|operand| self.resolve(line_no, operand))
                        .collect::<ParseResult<Vec<_>>>()?;
                    self.ops.push(GateOp::new(kind, qubits));
                }
                Some(Statement::Measure { .. }) | None => {}
            }
        }

        if self.registers.is_empty() {
            return Err(ParseError::MissingRegister);
        }

        Ok(Circuit::new(self.num_qubits, self.ops)?)
    }

    fn declare(&mut self, line: usize, name: &'a str, size: u64) -> ParseResult<()> {
        if self.registers.contains_key(name) {
            return Err(ParseError::syntax(
                line,
                format!("register `{name}` is declared twice"),
            ));
        }
        let offset = self.num_qubits;
        let (size, total) = u32::try_from(size)
            .ok()
            .and_then(|size| Some((size, offset.checked_add(size)?)))
            .ok_or_else(|| ParseError::syntax(line, format!("register `{name}` is too large")))?;
        if total > self.max_qubits {
            return Err(ParseError::syntax(
                line,
                format!(
                    "register `{name}` brings the total to {total} qubits, limit is {}",
                    self.max_qubits
                ),
            ));
        }
        self.num_qubits = total;
        self.registers.insert(name, Register { offset, size });
        Ok(())
    }

    fn resolve(&self, line: usize, operand: &Operand<'_>) -> ParseResult<QubitId> {
        let Some(register) = self.registers.get(operand.register) else {
            let detail = if self.registers.is_empty() {
                "gate applied before any quantum register is declared".to_string()
            } else {
                format!("undeclared register `{}`", operand.register)
            };
            return Err(ParseError::syntax(line, detail));
        };
        let index = u32::try_from(operand.index)
            .ok()
            .filter(|&index| index < register.size)
            .ok_or_else(|| {
                ParseError::syntax(
                    line,
                    format!(
                        "index {} out of range for register `{}` of size {}",
                        operand.index, operand.register, register.size
                    ),
                )
            })?;
        Ok(QubitId(register.offset + index))
    }
}
