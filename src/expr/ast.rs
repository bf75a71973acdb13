//! Expression Tree
//! Node types, the closed function allow-list and the tree-walking evaluator.

use std::f64::consts::{E, PI};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => PI,
            Constant::E => E,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl BinaryOp {
    /// Binding strength, higher binds tighter. Matches the parser levels.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 2,
            BinaryOp::And => 3,
            BinaryOp::Eq | BinaryOp::Ne => 4,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 5,
            BinaryOp::Add | BinaryOp::Sub => 6,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 7,
            BinaryOp::Pow => 9,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => " + ",
            BinaryOp::Sub => " - ",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => " % ",
            BinaryOp::Pow => "^",
            BinaryOp::Lt => " < ",
            BinaryOp::Le => " <= ",
            BinaryOp::Gt => " > ",
            BinaryOp::Ge => " >= ",
            BinaryOp::Eq => " == ",
            BinaryOp::Ne => " != ",
            BinaryOp::And => " && ",
            BinaryOp::Or => " || ",
        }
    }
}

/// Named functions accepted by the parser. Anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Abs,
    Floor,
    Ceil,
    Round,
    Sign,
    Pow,
    Min,
    Max,
    Atan2,
    Hypot,
}

impl Function {
    pub const ALL: [Function; 25] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Exp,
        Function::Ln,
        Function::Log10,
        Function::Log2,
        Function::Sqrt,
        Function::Cbrt,
        Function::Abs,
        Function::Floor,
        Function::Ceil,
        Function::Round,
        Function::Sign,
        Function::Pow,
        Function::Min,
        Function::Max,
        Function::Atan2,
        Function::Hypot,
    ];

    /// Name as typed by the user. `log` is the natural logarithm.
    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Exp => "exp",
            Function::Ln => "log",
            Function::Log10 => "log10",
            Function::Log2 => "log2",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Abs => "abs",
            Function::Floor => "floor",
            Function::Ceil => "ceil",
            Function::Round => "round",
            Function::Sign => "sign",
            Function::Pow => "pow",
            Function::Min => "min",
            Function::Max => "max",
            Function::Atan2 => "atan2",
            Function::Hypot => "hypot",
        }
    }

    /// Name used when pretty-printing.
    fn display_name(self) -> &'static str {
        match self {
            Function::Ln => "ln",
            Function::Sqrt => "√",
            other => other.name(),
        }
    }

    pub fn from_name(name: &str) -> Option<Function> {
        // `ln` is accepted as an alias of `log`.
        if name == "ln" {
            return Some(Function::Ln);
        }
        Function::ALL.iter().copied().find(|f| f.name() == name)
    }

    pub fn arity(self) -> usize {
        match self {
            Function::Pow | Function::Min | Function::Max | Function::Atan2 | Function::Hypot => 2,
            _ => 1,
        }
    }

    /// Apply to already evaluated arguments. `args.len()` equals `arity()`.
    fn apply(self, args: &[f64]) -> f64 {
        let a = args[0];
        match self {
            Function::Sin => a.sin(),
            Function::Cos => a.cos(),
            Function::Tan => a.tan(),
            Function::Asin => a.asin(),
            Function::Acos => a.acos(),
            Function::Atan => a.atan(),
            Function::Sinh => a.sinh(),
            Function::Cosh => a.cosh(),
            Function::Tanh => a.tanh(),
            Function::Exp => a.exp(),
            Function::Ln => a.ln(),
            Function::Log10 => a.log10(),
            Function::Log2 => a.log2(),
            Function::Sqrt => a.sqrt(),
            Function::Cbrt => a.cbrt(),
            Function::Abs => a.abs(),
            Function::Floor => a.floor(),
            Function::Ceil => a.ceil(),
            // Halves round toward +infinity. `a - floor` is exact; `a + 0.5` is not.
            Function::Round => {
                let floor = a.floor();
                if a - floor >= 0.5 {
                    floor + 1.0
                } else {
                    floor
                }
            }
            Function::Sign => {
                if a > 0.0 {
                    1.0
                } else if a < 0.0 {
                    -1.0
                } else {
                    a
                }
            }
            Function::Pow => a.powf(args[1]),
            Function::Min => {
                if a.is_nan() || args[1].is_nan() {
                    f64::NAN
                } else {
                    a.min(args[1])
                }
            }
            Function::Max => {
                if a.is_nan() || args[1].is_nan() {
                    f64::NAN
                } else {
                    a.max(args[1])
                }
            }
            Function::Atan2 => a.atan2(args[1]),
            Function::Hypot => a.hypot(args[1]),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(f64),
    Constant(Constant),
    Variable,
    Unary(UnaryOp, Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Call(Function, Vec<Node>),
    Conditional(Box<Node>, Box<Node>, Box<Node>),
}

/// Zero and NaN are false, everything else is true.
fn truthy(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

fn from_bool(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

impl Node {
    /// Evaluate with `x` bound to the given value. Returns the raw IEEE result.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Node::Number(n) => *n,
            Node::Constant(c) => c.value(),
            Node::Variable => x,
            Node::Unary(op, operand) => {
                let v = operand.eval(x);
                match op {
                    UnaryOp::Neg => -v,
                    UnaryOp::Plus => v,
                    UnaryOp::Not => from_bool(!truthy(v)),
                }
            }
            Node::Binary(BinaryOp::And, lhs, rhs) => {
                let l = lhs.eval(x);
                if truthy(l) {
                    rhs.eval(x)
                } else {
                    l
                }
            }
            Node::Binary(BinaryOp::Or, lhs, rhs) => {
                let l = lhs.eval(x);
                if truthy(l) {
                    l
                } else {
                    rhs.eval(x)
                }
            }
            Node::Binary(op, lhs, rhs) => {
                let l = lhs.eval(x);
                let r = rhs.eval(x);
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    BinaryOp::Rem => l % r,
                    BinaryOp::Pow => l.powf(r),
                    BinaryOp::Lt => from_bool(l < r),
                    BinaryOp::Le => from_bool(l <= r),
                    BinaryOp::Gt => from_bool(l > r),
                    BinaryOp::Ge => from_bool(l >= r),
                    BinaryOp::Eq => from_bool(l == r),
                    BinaryOp::Ne => from_bool(l != r),
                    BinaryOp::And | BinaryOp::Or => unreachable!("short-circuit ops handled above"),
                }
            }
            Node::Call(func, args) => {
                let values: Vec<f64> = args.iter().map(|a| a.eval(x)).collect();
                func.apply(&values)
            }
            Node::Conditional(cond, then, otherwise) => {
                if truthy(cond.eval(x)) {
                    then.eval(x)
                } else {
                    otherwise.eval(x)
                }
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Node::Conditional(..) => 1,
            Node::Binary(op, ..) => op.precedence(),
            Node::Unary(..) => 8,
            _ => 10,
        }
    }

    /// Write `self`, parenthesized if it binds looser than `min`.
    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        let wrap = self.precedence() < min;
        if wrap {
            write!(f, "(")?;
        }
        match self {
            Node::Number(n) => write!(f, "{}", n)?,
            Node::Constant(Constant::Pi) => write!(f, "π")?,
            Node::Constant(Constant::E) => write!(f, "e")?,
            Node::Variable => write!(f, "x")?,
            Node::Unary(op, operand) => {
                let sym = match op {
                    UnaryOp::Neg => "-",
                    UnaryOp::Plus => "+",
                    UnaryOp::Not => "!",
                };
                write!(f, "{}", sym)?;
                operand.fmt_prec(f, 8)?;
            }
            Node::Binary(BinaryOp::Pow, base, exponent) => {
                base.fmt_prec(f, 10)?;
                write!(f, "^")?;
                exponent.fmt_prec(f, 8)?;
            }
            Node::Binary(op, lhs, rhs) => {
                let p = op.precedence();
                lhs.fmt_prec(f, p)?;
                write!(f, "{}", op.symbol())?;
                rhs.fmt_prec(f, p + 1)?;
            }
            Node::Call(func, args) => {
                write!(f, "{}(", func.display_name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_prec(f, 1)?;
                }
                write!(f, ")")?;
            }
            Node::Conditional(cond, then, otherwise) => {
                cond.fmt_prec(f, 2)?;
                write!(f, " ? ")?;
                then.fmt_prec(f, 1)?;
                write!(f, " : ")?;
                otherwise.fmt_prec(f, 1)?;
            }
        }
        if wrap {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}
