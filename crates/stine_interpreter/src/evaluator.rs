use std::io::{self, Stdout, Write};

use log::trace;
use stine_lexer::{Token, TokenKind};

use crate::{
    cursor::Cursor,
    environment::Environment,
    error::{EvalError, ParseError, RuntimeResult},
};

/// Executes statements straight off the token sequence; there is no AST.
///
/// The environment lives as long as the evaluator, so calling [`Evaluator::run`]
/// again (as the REPL does) sees earlier bindings.
pub struct Evaluator<W = Stdout> {
    env: Environment,
    out: W,
}

impl Evaluator<Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Evaluator<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Evaluator<W>
where
    W: Write,
{
    /// Create an evaluator whose `console.log` output goes to `out`.
    pub fn with_output(out: W) -> Self {
        Evaluator {
            env: Environment::new(),
            out,
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Execute every statement until the End marker. The first error aborts the run.
    pub fn run(&mut self, tokens: &[Token]) -> RuntimeResult<()> {
        let mut cursor = Cursor::new(tokens);

        while !cursor.is_at_end() {
            self.eval_statement(&mut cursor)?;
        }

        Ok(())
    }

    /// Execute the single statement starting at the cursor.
    pub fn eval_statement(&mut self, cursor: &mut Cursor) -> RuntimeResult<()> {
        match cursor.peek() {
            Some(token) if token.is_keyword("let") => self.eval_let_statement(cursor),
            Some(token) if token.is_keyword("console") => self.eval_console_log_statement(cursor),
            // Empty statement
            Some(token) if token.is(TokenKind::Semicolon) => {
                cursor.advance();
                Ok(())
            }
            // Bare expression, result discarded and no semicolon consumed
            _ => self.eval_expression(cursor).map(|_| ()),
        }
    }

    /// `let <identifier> = <expression> ;`
    fn eval_let_statement(&mut self, cursor: &mut Cursor) -> RuntimeResult<()> {
        // Consume the `let` token
        cursor.advance();

        let name = cursor
            .eat(TokenKind::Identifier)
            .ok_or(ParseError::ExpectedVariableName)?
            .text
            .clone();

        cursor
            .eat(TokenKind::Assign)
            .ok_or(ParseError::ExpectedAssign)?;

        let value = self.eval_expression(cursor)?;
        trace!("let {} = {}", name, value);
        self.env.define(name, value);

        cursor
            .eat(TokenKind::Semicolon)
            .ok_or(ParseError::ExpectedSemicolon)?;

        Ok(())
    }

    /// `console log ( <expression> )`, where the lexer has already split `console.log`
    fn eval_console_log_statement(&mut self, cursor: &mut Cursor) -> RuntimeResult<()> {
        // Consume the `console` token
        cursor.advance();

        match cursor.peek() {
            Some(token) if token.is_identifier("log") => {
                cursor.advance();
            }
            _ => return Err(ParseError::ExpectedLog.into()),
        }

        cursor
            .eat(TokenKind::LParen)
            .ok_or(ParseError::ExpectedLeftParen)?;

        // The value is printed before the closing paren is checked
        let value = self.eval_expression(cursor)?;
        trace!("console.log({})", value);
        writeln!(self.out, "{}", value)?;

        cursor
            .eat(TokenKind::RParen)
            .ok_or(ParseError::ExpectedRightParen)?;

        Ok(())
    }

    /// Evaluate the expression starting at the cursor.
    ///
    /// Expressions are only ever primaries: operator tokens are never consumed here.
    pub fn eval_expression(&self, cursor: &mut Cursor) -> RuntimeResult<i64> {
        self.eval_primary(cursor)
    }

    fn eval_primary(&self, cursor: &mut Cursor) -> RuntimeResult<i64> {
        let token = cursor.peek().ok_or(ParseError::UnexpectedEnd)?;

        let value = match token.kind {
            TokenKind::Number => parse_integer(&token.text)?,
            // Strings only exist as their length for now
            TokenKind::String => token.text.chars().count() as i64,
            TokenKind::Identifier => self
                .env
                .get(&token.text)
                .ok_or_else(|| EvalError::UndefinedVariable(token.text.clone()))?,
            TokenKind::End => return Err(ParseError::UnexpectedEnd.into()),
            _ => return Err(ParseError::UnexpectedToken(token.clone()).into()),
        };

        cursor.advance();

        Ok(value)
    }
}

fn parse_integer(text: &str) -> Result<i64, EvalError> {
    text.parse().map_err(|source| EvalError::InvalidInteger {
        text: text.to_owned(),
        source,
    })
}
