//! Expression Errors
//! Parse failures are fatal for a render cycle; point failures are not.

use thiserror::Error;

/// Failure to turn the input string into an expression tree.
///
/// Every variant carries the byte offset in the source where the problem was
/// found, so the UI can point at it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("Expression is empty")]
    Empty,
    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("Invalid number '{text}' at position {pos}")]
    InvalidNumber { text: String, pos: usize },
    #[error("Unexpected '{found}' at position {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("Unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("Unknown identifier '{name}' at position {pos}")]
    UnknownIdentifier { name: String, pos: usize },
    #[error("Unknown function '{name}' at position {pos}")]
    UnknownFunction { name: String, pos: usize },
    #[error("Function '{name}' takes {expected} argument(s), got {found} (position {pos})")]
    WrongArity {
        name: &'static str,
        expected: usize,
        found: usize,
        pos: usize,
    },
    #[error("Expression is nested too deeply (position {pos})")]
    TooDeep { pos: usize },
}

/// Why a single sample is undefined. Swallowed by the sampler.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointError {
    #[error("Result is not a number")]
    NotANumber,
    #[error("Result is infinite")]
    Infinite,
}
