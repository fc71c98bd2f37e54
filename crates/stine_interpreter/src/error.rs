use std::io;
use std::num::ParseIntError;

use stine_lexer::Token;
use thiserror::Error;

/// A structural grammar violation.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ParseError {
    #[error("expected variable name after 'let'")]
    ExpectedVariableName,
    #[error("expected '=' after variable name")]
    ExpectedAssign,
    #[error("expected ';' after assignment")]
    ExpectedSemicolon,
    /// `console` must be followed by `log`
    #[error("expected 'log' after 'console'")]
    ExpectedLog,
    #[error("expected '(' after console.log")]
    ExpectedLeftParen,
    #[error("expected ')' to close console.log()")]
    ExpectedRightParen,
    /// The token at an expression position cannot start one (operators, keywords, punctuation)
    #[error("unexpected token in primary expression")]
    UnexpectedToken(Token),
    #[error("unexpected end of tokens in primary expression")]
    UnexpectedEnd,
}

/// A semantic failure while evaluating an expression.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum EvalError {
    /// When referencing a name that was never bound with `let`
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),
    /// When a number literal does not fit in an integer
    #[error("invalid integer literal: {text}")]
    InvalidInteger {
        text: String,
        #[source]
        source: ParseIntError,
    },
}

/// Anything that aborts a run.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("failed to write output")]
    Output(#[from] io::Error),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
