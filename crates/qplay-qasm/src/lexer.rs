//! Line-level lexer for OpenQASM 2.0 (and the QASM 3 register form).

use logos::Logos;
use std::fmt;

/// Tokens of a single assembly line.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
pub enum Token<'src> {
    #[token("OPENQASM")]
    OpenQasm,

    #[token("include")]
    Include,

    #[token("qreg")]
    Qreg,

    #[token("creg")]
    Creg,

    #[token("qubit")]
    Qubit,

    #[token("bit")]
    Bit,

    #[token("measure")]
    Measure,

    #[token("barrier")]
    Barrier,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice())]
    Identifier(&'src str),

    /// Saturates at `u64::MAX`; range checks belong to the parser.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().unwrap_or(u64::MAX), priority = 3)]
    Integer(u64),

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r#""[^"\n]*""#)]
    StringLiteral,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token("->")]
    Arrow,

    #[token("=")]
    Equals,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::OpenQasm => f.write_str("`OPENQASM`"),
            Token::Include => f.write_str("`include`"),
            Token::Qreg => f.write_str("`qreg`"),
            Token::Creg => f.write_str("`creg`"),
            Token::Qubit => f.write_str("`qubit`"),
            Token::Bit => f.write_str("`bit`"),
            Token::Measure => f.write_str("`measure`"),
            Token::Barrier => f.write_str("`barrier`"),
            Token::Identifier(name) => write!(f, "identifier `{name}`"),
            Token::Integer(n) => write!(f, "integer `{n}`"),
            Token::Float => f.write_str("float literal"),
            Token::StringLiteral => f.write_str("string literal"),
            Token::LBracket => f.write_str("`[`"),
            Token::RBracket => f.write_str("`]`"),
            Token::LParen => f.write_str("`(`"),
            Token::RParen => f.write_str("`)`"),
            Token::Comma => f.write_str("`,`"),
            Token::Semicolon => f.write_str("`;`"),
            Token::Arrow => f.write_str("`->`"),
            Token::Equals => f.write_str("`=`"),
        }
    }
}

/// Tokenize one line.
///
/// On failure returns the offending slice, so callers can report it
/// against the line number they track.
pub fn tokenize(line: &str) -> Result<Vec<Token<'_>>, &str> {
    let mut lexer = Token::lexer(line);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => return Err(lexer.slice()),
        }
    }
    Ok(tokens)
}

/// First token of a line, or `None` for blank, comment-only or unlexable lines.
pub fn leading_token(line: &str) -> Option<Token<'_>> {
    Token::lexer(line).next().and_then(Result::ok)
}
