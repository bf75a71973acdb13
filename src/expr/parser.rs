//! Expression Parser
//! Recursive descent over the token stream, one function per precedence level.

use super::ast::{BinaryOp, Constant, Function, Node, UnaryOp};
use super::error::ExprError;
use super::lexer::{tokenize, Spanned, Token};

/// Deepest nesting of groups, calls, prefixes, ternaries and operator
/// chains the parser accepts.
const MAX_DEPTH: usize = 128;

/// Parse a full expression string into a tree.
pub fn parse(input: &str) -> Result<Node, ExprError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let node = parser.conditional()?;
    match parser.peek() {
        None => Ok(node),
        Some(spanned) => Err(unexpected(spanned)),
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

fn unexpected(spanned: &Spanned) -> ExprError {
    ExprError::UnexpectedToken {
        found: spanned.token.to_string(),
        pos: spanned.pos,
    }
}

/// Strip the optional `Math.` prefix used by the presets.
fn bare_name(name: &str) -> &str {
    name.strip_prefix("Math.").unwrap_or(name)
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.peek().map(|s| &s.token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.pos).cloned();
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<(), ExprError> {
        match self.advance() {
            Some(spanned) if spanned.token == token => Ok(()),
            Some(spanned) => Err(unexpected(&spanned)),
            None => Err(ExprError::UnexpectedEnd { expected }),
        }
    }

    /// One level deeper; fails once `MAX_DEPTH` is passed.
    fn descend(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            let pos = self
                .peek()
                .or_else(|| self.tokens.last())
                .map_or(0, |s| s.pos);
            return Err(ExprError::TooDeep { pos });
        }
        Ok(())
    }

    fn conditional(&mut self) -> Result<Node, ExprError> {
        self.descend()?;
        let node = self.ternary();
        self.depth -= 1;
        node
    }

    /// `or ( '?' conditional ':' conditional )?`
    fn ternary(&mut self) -> Result<Node, ExprError> {
        let cond = self.or()?;
        if self.peek_token() != Some(&Token::Question) {
            return Ok(cond);
        }
        self.advance();
        let then = self.conditional()?;
        self.expect(Token::Colon, "':'")?;
        let otherwise = self.conditional()?;
        Ok(Node::Conditional(
            Box::new(cond),
            Box::new(then),
            Box::new(otherwise),
        ))
    }

    fn or(&mut self) -> Result<Node, ExprError> {
        self.left_assoc(Self::and, |t| match t {
            Token::Or => Some(BinaryOp::Or),
            _ => None,
        })
    }

    fn and(&mut self) -> Result<Node, ExprError> {
        self.left_assoc(Self::equality, |t| match t {
            Token::And => Some(BinaryOp::And),
            _ => None,
        })
    }

    fn equality(&mut self) -> Result<Node, ExprError> {
        self.left_assoc(Self::comparison, |t| match t {
            Token::Eq => Some(BinaryOp::Eq),
            Token::Ne => Some(BinaryOp::Ne),
            _ => None,
        })
    }

    fn comparison(&mut self) -> Result<Node, ExprError> {
        self.left_assoc(Self::additive, |t| match t {
            Token::Lt => Some(BinaryOp::Lt),
            Token::Le => Some(BinaryOp::Le),
            Token::Gt => Some(BinaryOp::Gt),
            Token::Ge => Some(BinaryOp::Ge),
            _ => None,
        })
    }

    fn additive(&mut self) -> Result<Node, ExprError> {
        self.left_assoc(Self::multiplicative, |t| match t {
            Token::Plus => Some(BinaryOp::Add),
            Token::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn multiplicative(&mut self) -> Result<Node, ExprError> {
        self.left_assoc(Self::unary, |t| match t {
            Token::Star => Some(BinaryOp::Mul),
            Token::Slash => Some(BinaryOp::Div),
            Token::Percent => Some(BinaryOp::Rem),
            _ => None,
        })
    }

    /// Shared loop for every left-associative binary level.
    fn left_assoc(
        &mut self,
        operand: fn(&mut Self) -> Result<Node, ExprError>,
        op_for: fn(&Token) -> Option<BinaryOp>,
    ) -> Result<Node, ExprError> {
        let start = self.depth;
        let mut lhs = operand(self)?;
        while let Some(op) = self.peek_token().and_then(op_for) {
            self.advance();
            // Each link nests the chain built so far one level deeper
            self.descend()?;
            let rhs = operand(self)?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.depth = start;
        Ok(lhs)
    }

    /// Prefix `-`, `+`, `!`. Binds looser than `^`, so `-x^2` is `-(x^2)`.
    fn unary(&mut self) -> Result<Node, ExprError> {
        let op = match self.peek_token() {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Not) => UnaryOp::Not,
            _ => return self.power(),
        };
        self.advance();
        self.descend()?;
        let operand = self.unary()?;
        self.depth -= 1;
        Ok(Node::Unary(op, Box::new(operand)))
    }

    /// Right-associative; the exponent may carry its own sign (`x^-2`).
    fn power(&mut self) -> Result<Node, ExprError> {
        let base = self.primary()?;
        if self.peek_token() != Some(&Token::Power) {
            return Ok(base);
        }
        self.advance();
        self.descend()?;
        let exponent = self.unary()?;
        self.depth -= 1;
        Ok(Node::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)))
    }

    fn primary(&mut self) -> Result<Node, ExprError> {
        let Some(spanned) = self.advance() else {
            return Err(ExprError::UnexpectedEnd {
                expected: "a value",
            });
        };

        match spanned.token {
            Token::Number(n) => Ok(Node::Number(n)),
            Token::LParen => {
                let inner = self.conditional()?;
                self.expect(Token::RParen, "')'")?;
                Ok(inner)
            }
            Token::Ident(ref name) => {
                if self.peek_token() == Some(&Token::LParen) {
                    self.call(name, spanned.pos)
                } else {
                    Self::identifier(name, spanned.pos)
                }
            }
            _ => Err(unexpected(&spanned)),
        }
    }

    fn identifier(name: &str, pos: usize) -> Result<Node, ExprError> {
        match bare_name(name) {
            "x" if name == "x" => Ok(Node::Variable),
            "pi" | "PI" => Ok(Node::Constant(Constant::Pi)),
            "e" | "E" => Ok(Node::Constant(Constant::E)),
            _ => Err(ExprError::UnknownIdentifier {
                name: name.to_string(),
                pos,
            }),
        }
    }

    fn call(&mut self, name: &str, pos: usize) -> Result<Node, ExprError> {
        let func = Function::from_name(bare_name(name)).ok_or_else(|| {
            ExprError::UnknownFunction {
                name: name.to_string(),
                pos,
            }
        })?;
        self.expect(Token::LParen, "'('")?;

        let mut args = Vec::new();
        if self.peek_token() == Some(&Token::RParen) {
            self.advance();
        } else {
            loop {
                args.push(self.conditional()?);
                match self.advance() {
                    Some(Spanned {
                        token: Token::Comma,
                        ..
                    }) => continue,
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => break,
                    Some(other) => return Err(unexpected(&other)),
                    None => return Err(ExprError::UnexpectedEnd { expected: "')'" }),
                }
            }
        }

        if args.len() != func.arity() {
            return Err(ExprError::WrongArity {
                name: func.name(),
                expected: func.arity(),
                found: args.len(),
                pos,
            });
        }
        Ok(Node::Call(func, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str, x: f64) -> f64 {
        parse(input).unwrap().eval(x)
    }

    #[test]
    fn standard_precedence() {
        assert_eq!(eval("1 + 2 * 3", 0.0), 7.0);
        assert_eq!(eval("(1 + 2) * 3", 0.0), 9.0);
        assert_eq!(eval("10 - 4 - 3", 0.0), 3.0);
        assert_eq!(eval("12 / 3 / 2", 0.0), 2.0);
        assert_eq!(eval("7 % 4", 0.0), 3.0);
    }

    #[test]
    fn power_is_right_associative_and_binds_tighter_than_minus() {
        assert_eq!(eval("2^3^2", 0.0), 512.0);
        assert_eq!(eval("2**3**2", 0.0), 512.0);
        assert_eq!(eval("-x^2", 3.0), -9.0);
        assert_eq!(eval("(-x)^2", 3.0), 9.0);
        assert_eq!(eval("x^-1", 4.0), 0.25);
    }

    #[test]
    fn constants_and_math_prefix() {
        assert_eq!(eval("pi", 0.0), std::f64::consts::PI);
        assert_eq!(eval("Math.PI", 0.0), std::f64::consts::PI);
        assert_eq!(eval("Math.E", 0.0), std::f64::consts::E);
        assert_eq!(eval("Math.sin(Math.pi / 2)", 0.0), 1.0);
        assert_eq!(eval("log(e)", 0.0), 1.0);
    }

    #[test]
    fn ternary_and_comparisons() {
        assert_eq!(eval("x >= 0 ? 1 : 0", 2.0), 1.0);
        assert_eq!(eval("x >= 0 ? 1 : 0", -2.0), 0.0);
        assert_eq!(eval("x < 0 ? -1 : x == 0 ? 0 : 1", 0.0), 0.0);
        assert_eq!(eval("x > 1 && x < 3", 2.0), 1.0);
        assert_eq!(eval("x === 2", 2.0), 1.0);
    }

    #[test]
    fn two_argument_functions() {
        assert_eq!(eval("pow(x, 3)", 2.0), 8.0);
        assert_eq!(eval("max(x, 1)", -5.0), 1.0);
        assert_eq!(eval("hypot(3, 4)", 0.0), 5.0);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(matches!(
            parse("x +++ * 2"),
            Err(ExprError::UnexpectedToken { ref found, pos: 6 }) if found == "*"
        ));
        assert_eq!(
            parse("(x + 1"),
            Err(ExprError::UnexpectedEnd { expected: "')'" })
        );
        assert_eq!(
            parse("x 2"),
            Err(ExprError::UnexpectedToken {
                found: "2".into(),
                pos: 2
            })
        );
        assert_eq!(parse("   "), Err(ExprError::Empty));
    }

    #[test]
    fn unknown_names_are_rejected_at_parse_time() {
        assert_eq!(
            parse("y + 1"),
            Err(ExprError::UnknownIdentifier {
                name: "y".into(),
                pos: 0
            })
        );
        assert_eq!(
            parse("alert(1)"),
            Err(ExprError::UnknownFunction {
                name: "alert".into(),
                pos: 0
            })
        );
        assert_eq!(
            parse("Math.x"),
            Err(ExprError::UnknownIdentifier {
                name: "Math.x".into(),
                pos: 0
            })
        );
    }

    #[test]
    fn deep_nesting_is_an_error_not_a_crash() {
        let open_parens = "(".repeat(10_000);
        assert!(matches!(parse(&open_parens), Err(ExprError::TooDeep { .. })));

        let balanced = format!("{}x{}", "(".repeat(5_000), ")".repeat(5_000));
        assert!(matches!(parse(&balanced), Err(ExprError::TooDeep { .. })));

        let negations = format!("{}x", "-".repeat(100_000));
        assert!(matches!(parse(&negations), Err(ExprError::TooDeep { .. })));

        let chain = format!("{}x", "x+".repeat(50_000));
        assert!(matches!(parse(&chain), Err(ExprError::TooDeep { .. })));

        let powers = format!("{}2", "2^".repeat(50_000));
        assert!(matches!(parse(&powers), Err(ExprError::TooDeep { .. })));
    }

    #[test]
    fn moderate_nesting_still_parses() {
        let nested = format!("{}x{}", "(".repeat(40), ")".repeat(40));
        assert_eq!(eval(&nested, 3.0), 3.0);
        assert_eq!(eval(&format!("{}x", "-".repeat(100)), 2.0), 2.0);
        let sum = format!("{}x", "x+".repeat(100));
        assert_eq!(eval(&sum, 1.0), 101.0);
    }

    #[test]
    fn arity_is_checked() {
        assert_eq!(
            parse("sin(x, 2)"),
            Err(ExprError::WrongArity {
                name: "sin",
                expected: 1,
                found: 2,
                pos: 0
            })
        );
        assert!(matches!(
            parse("pow(x)"),
            Err(ExprError::WrongArity { found: 1, .. })
        ));
    }
}
