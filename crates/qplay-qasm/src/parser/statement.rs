//! Reading one statement per line.
//!
//! Only register declarations, catalog gate applications and single-qubit
//! measurements are recognized. Every other line yields `None`.

use qplay_ir::GateKind;
use tracing::debug;

use crate::error::{ParseError, ParseResult};
use crate::lexer::{Token, leading_token, tokenize};

/// A bracketed register reference such as `q[3]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Operand<'a> {
    pub register: &'a str,
    /// As written; the parser checks it against the register size.
    pub index: u64,
}

/// A recognized statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Statement<'a> {
    /// `qreg q[n];` or `qubit[n] q;`
    QuantumRegister { name: &'a str, size: u64 },
    /// `h q[0];`, `cx q[0], q[1];`
    Gate {
        kind: GateKind,
        operands: Vec<Operand<'a>>,
    },
    /// `measure q[i] -> c[j];`
    Measure { qubit: Operand<'a>, clbit: Operand<'a> },
}

/// Read the statement on `line`, if it is one the parser handles.
///
/// Only the first statement on a line is read.
pub(crate) fn read_line(line_no: usize, line: &str) -> ParseResult<Option<Statement<'_>>> {
    let Some(first) = leading_token(line) else {
        return Ok(None);
    };

    match first {
        Token::Qreg => Cursor::new(line_no, line)?.qreg().map(Some),
        Token::Qubit => Cursor::new(line_no, line)?.qubit_declaration().map(Some),
        Token::Measure => Ok(Cursor::new(line_no, line)
            .and_then(|mut cursor| cursor.measure())
            .ok()),
        Token::Identifier(name) => match GateKind::from_name(name) {
            Some(kind) => Cursor::new(line_no, line)?.gate(kind),
            None => {
                debug!(line = line_no, mnemonic = name, "skipping unrecognized statement");
                Ok(None)
            }
        },
        _ => Ok(None),
    }
}

struct Cursor<'a> {
    line: usize,
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: usize, text: &'a str) -> ParseResult<Self> {
        let tokens = tokenize(text)
            .map_err(|bad| ParseError::syntax(line, format!("unexpected character `{bad}`")))?;
        Ok(Self {
            line,
            tokens,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, expected: &str, found: Option<Token<'a>>) -> ParseError {
        let detail = match found {
            Some(token) => format!("expected {expected}, found {token}"),
            None => format!("expected {expected}, found end of line"),
        };
        ParseError::syntax(self.line, detail)
    }

    fn expect(&mut self, want: Token<'static>) -> ParseResult<()> {
        match self.bump() {
            Some(token) if token == want => Ok(()),
            found => Err(self.error(&want.to_string(), found)),
        }
    }

    fn identifier(&mut self, what: &str) -> ParseResult<&'a str> {
        match self.bump() {
            Some(Token::Identifier(name)) => Ok(name),
            found => Err(self.error(what, found)),
        }
    }

    fn integer(&mut self, what: &str) -> ParseResult<u64> {
        match self.bump() {
            Some(Token::Integer(n)) => Ok(n),
            found => Err(self.error(what, found)),
        }
    }

    /// `name[index]`
    fn operand(&mut self) -> ParseResult<Operand<'a>> {
        let register = self.identifier("register name")?;
        self.expect(Token::LBracket)?;
        let index = self.integer("register index")?;
        self.expect(Token::RBracket)?;
        Ok(Operand { register, index })
    }

    /// Accept an optional `;`. Anything after it belongs to another statement.
    fn finish(&mut self) -> ParseResult<()> {
        match self.bump() {
            None | Some(Token::Semicolon) => Ok(()),
            found => Err(self.error("`;`", found)),
        }
    }

    fn qreg(&mut self) -> ParseResult<Statement<'a>> {
        self.expect(Token::Qreg)?;
        let name = self.identifier("register name")?;
        self.expect(Token::LBracket)?;
        let size = self.integer("register size")?;
        self.expect(Token::RBracket)?;
        self.finish()?;
        Ok(Statement::QuantumRegister { name, size })
    }

    fn qubit_declaration(&mut self) -> ParseResult<Statement<'a>> {
        self.expect(Token::Qubit)?;
        let size = if self.peek() == Some(Token::LBracket) {
            self.bump();
            let size = self.integer("register size")?;
            self.expect(Token::RBracket)?;
            size
        } else {
            1
        };
        let name = self.identifier("register name")?;
        self.finish()?;
        Ok(Statement::QuantumRegister { name, size })
    }

    fn measure(&mut self) -> ParseResult<Statement<'a>> {
        self.expect(Token::Measure)?;
        let qubit = self.operand()?;
        self.expect(Token::Arrow)?;
        let clbit = self.operand()?;
        self.finish()?;
        Ok(Statement::Measure { qubit, clbit })
    }

    /// A whole-register operand such as the `q` in `h q;`.
    ///
    /// Broadcast applications and the bodies of `gate` definitions use this
    /// form.
    fn has_bare_register(&self) -> bool {
        self.tokens[self.pos..].iter().enumerate().any(|(i, token)| {
            matches!(token, Token::Identifier(_))
                && matches!(
                    self.tokens.get(self.pos + i + 1),
                    None | Some(Token::Comma | Token::Semicolon)
                )
        })
    }

    fn gate(&mut self, kind: GateKind) -> ParseResult<Option<Statement<'a>>> {
        self.bump();
        if self.peek() == Some(Token::LParen) {
            debug!(line = self.line, gate = %kind, "skipping parameterized gate");
            return Ok(None);
        }
        if self.has_bare_register() {
            debug!(line = self.line, gate = %kind, "skipping whole-register operands");
            return Ok(None);
        }

        let mut operands = vec![self.operand()?];
        while self.peek() == Some(Token::Comma) {
            self.bump();
            operands.push(self.operand()?);
        }
        self.finish()?;

        Ok(Some(Statement::Gate { kind, operands }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(line: &str) -> ParseResult<Option<Statement<'_>>> {
        read_line(1, line)
    }

    #[test]
    fn test_register_forms() {
        assert_eq!(
            read("qreg q[3];").unwrap(),
            Some(Statement::QuantumRegister { name: "q", size: 3 })
        );
        assert_eq!(
            read("qubit[2] anc;").unwrap(),
            Some(Statement::QuantumRegister {
                name: "anc",
                size: 2
            })
        );
        assert_eq!(
            read("qubit a;").unwrap(),
            Some(Statement::QuantumRegister { name: "a", size: 1 })
        );
    }

    #[test]
    fn test_gate_line() {
        let statement = read("cx q[0], q[1];").unwrap().unwrap();
        assert_eq!(
            statement,
            Statement::Gate {
                kind: GateKind::CNOT,
                operands: vec![
                    Operand {
                        register: "q",
                        index: 0
                    },
                    Operand {
                        register: "q",
                        index: 1
                    },
                ],
            }
        );
    }

    #[test]
    fn test_skipped_lines() {
        for line in [
            "",
            "   ",
            "OPENQASM 2.0;",
            "include \"qelib1.inc\";",
            "creg c[2];",
            "bit[2] c;",
            "barrier q[0], q[1];",
            "// comment",
            "rz(pi/4) q[0];",
            "ccx q[0], q[1], q[2];",
            "c = measure q;",
            "measure q -> c;",
            "h(0.5) q[0];",
            "h q;",
            "cx q, r;",
            "  cx c,b;",
            "cx q[0], r;",
            "x a",
        ] {
            assert_eq!(read(line).unwrap(), None, "line {line:?}");
        }
    }

    #[test]
    fn test_measure_read() {
        assert!(matches!(
            read("measure q[1] -> c[1];").unwrap(),
            Some(Statement::Measure { .. })
        ));
    }

    #[test]
    fn test_malformed_brackets() {
        for line in ["h q[0;", "h q[];", "h q0];", "cx q[0] q[1];", "h q[a];", "qreg q[;", "h q[;"] {
            assert!(
                matches!(read(line), Err(ParseError::Syntax { line: 1, .. })),
                "line {line:?}"
            );
        }
    }

    #[test]
    fn test_error_detail() {
        let err = read_line(7, "x q[1;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error at line 7: expected `]`, found `;`"
        );
    }
}
