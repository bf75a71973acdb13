//! Expression module - parsing and evaluating f(x)
//!
//! Input goes through a lexer and a recursive-descent parser into a small
//! tree over a closed grammar, which is then walked once per sample.

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Constant, Function, Node, UnaryOp};
pub use error::{ExprError, PointError};

use std::fmt;

/// A parsed function of `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
}

impl Expression {
    /// Parse user input. Fails on any syntax error or unknown name.
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let root = parser::parse(source)?;
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    /// Raw IEEE result at `x`; may be NaN or infinite.
    pub fn eval(&self, x: f64) -> f64 {
        self.root.eval(x)
    }

    /// Finite result at `x`, or why the function is undefined there.
    pub fn evaluate(&self, x: f64) -> Result<f64, PointError> {
        let y = self.eval(x);
        if y.is_nan() {
            Err(PointError::NotANumber)
        } else if y.is_infinite() {
            Err(PointError::Infinite)
        } else {
            Ok(y)
        }
    }

    /// The text the expression was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }
}

/// Pretty form: `^` for powers, `√`, `ln`, no `Math.` prefix.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
