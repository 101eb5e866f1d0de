#![allow(clippy::len_without_is_empty)]
#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Integer Arithmetic Expression Parser
//!
//! A small grammar built on seekparse: natural numbers, the four binary
//! operators with the usual precedence, and parentheses.
//!
//! # Example
//!
//! ```ignore
//! let expr = expr_parser::parse_str("1 + 2*6 / (10-7)")?;
//! assert_eq!(expr.to_string(), "(+ 1 (/ (* 2 6) (- 10 7)))");
//! assert_eq!(expr.eval()?, 5);
//! ```

use seekparse::{CharStream, Parser, Rec, Stream, next, whitespace};
use thiserror::Error;

pub mod ast;
pub mod parse;

pub use ast::{Expr, Op};
pub use parse::grammar;

#[derive(Error, Debug)]
pub enum ExprError {
    #[error(transparent)]
    Parse(#[from] seekparse::Error),

    #[error("expected an expression")]
    NoExpression,

    #[error("unexpected input at byte offset {offset}")]
    TrailingInput { offset: u64 },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow evaluating {lhs} {op} {rhs}")]
    Overflow { op: Op, lhs: i64, rhs: i64 },
}

/// A built grammar that can be reused across inputs.
///
/// Each pair of parentheses is one level of recursion, so input nested more
/// than [`ParseConfig::max_recursion_depth`](seekparse::ParseConfig::max_recursion_depth)
/// deep (128 by default) fails with
/// [`Error::RecursionLimitExceeded`](seekparse::Error::RecursionLimitExceeded).
/// To accept deeper input, parse from a stream built with
/// [`ParseConfig::disable_recursion_limit`](seekparse::ParseConfig::disable_recursion_limit)
/// or a larger limit.
#[derive(Debug)]
pub struct ExprParser {
    grammar: Rec<Expr>,
}

impl Default for ExprParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprParser {
    pub fn new() -> Self {
        Self { grammar: grammar() }
    }

    /// Parses one expression that must span the rest of the stream.
    ///
    /// Leading whitespace is skipped.
    pub fn parse(&self, stream: &mut dyn CharStream) -> Result<Expr, ExprError> {
        let parsed = next(whitespace(), &self.grammar).parse(stream).into_result()?;
        let Some((expr, _)) = parsed else {
            return Err(ExprError::NoExpression);
        };
        if !stream.at_end()? {
            return Err(ExprError::TrailingInput {
                offset: stream.position(),
            });
        }
        Ok(expr)
    }

    pub fn parse_str(&self, input: &str) -> Result<Expr, ExprError> {
        self.parse(&mut Stream::from(input))
    }
}

/// Parses `input` as a single expression.
pub fn parse_str(input: &str) -> Result<Expr, ExprError> {
    ExprParser::new().parse_str(input)
}

/// Parses and evaluates `input`.
pub fn eval_str(input: &str) -> Result<i64, ExprError> {
    parse_str(input)?.eval()
}
