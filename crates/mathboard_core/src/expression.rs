use crate::autodiff::Dual;
use crate::traits::Scalar;
use std::cell::RefCell;
use thiserror::Error;

/// Errors from parsing or compiling a formula string.
///
/// Evaluation itself never errors: domain violations (log of a non-positive
/// number, 0/0, ...) surface as NaN and callers treat non-finite samples as
/// "point not plotted".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    #[error("Unknown identifier: {0} (only the variable x is available)")]
    UnknownIdentifier(String),
    #[error("Expected ')'")]
    MissingParen,
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    #[error("Unexpected input after expression")]
    TrailingInput,
}

/// OpCodes for the stack-based expression VM.
/// The VM operates on a stack of `Scalar` values (f64 or Dual).
#[derive(Debug, Clone, Copy)]
pub enum OpCode {
    /// Pushes a constant `f64` value onto the stack.
    LoadConst(f64),
    /// Pushes the current value of the variable `x` onto the stack.
    LoadX,
    /// Pops top two values (b, a), pushes (a + b).
    Add,
    /// Pops top two values (b, a), pushes (a - b).
    Sub,
    /// Pops top two values (b, a), pushes (a * b).
    Mul,
    /// Pops top two values (b, a), pushes (a / b).
    Div,
    /// Pops top two values (b, a), pushes (a ^ b).
    Pow,
    /// Pops top value (a), pushes -a.
    Neg,
    Sin,
    Cos,
    /// Natural logarithm.
    Ln,
    /// Base-10 logarithm.
    Log,
    Sqrt,
    Exp,
}

/// A compiled sequence of operations.
#[derive(Debug, Clone, Default)]
pub struct Bytecode {
    pub ops: Vec<OpCode>,
}

/// Stack-based VM for evaluating compiled formulas.
///
/// The VM is stateless; `execute` takes all necessary context:
/// - `bytecode`: instructions to run.
/// - `x`: current value of the variable.
/// - `stack`: a mutable buffer for intermediate computations.
pub struct VM;

impl VM {
    pub fn execute<T: Scalar>(bytecode: &Bytecode, x: T, stack: &mut Vec<T>) -> T {
        stack.clear();

        for op in &bytecode.ops {
            match op {
                OpCode::LoadConst(val) => {
                    stack.push(T::from_f64(*val).unwrap());
                }
                OpCode::LoadX => {
                    stack.push(x);
                }
                OpCode::Add => {
                    let b = stack.pop().unwrap();
                    let a = stack.pop().unwrap();
                    stack.push(a + b);
                }
                OpCode::Sub => {
                    let b = stack.pop().unwrap();
                    let a = stack.pop().unwrap();
                    stack.push(a - b);
                }
                OpCode::Mul => {
                    let b = stack.pop().unwrap();
                    let a = stack.pop().unwrap();
                    stack.push(a * b);
                }
                OpCode::Div => {
                    let b = stack.pop().unwrap();
                    let a = stack.pop().unwrap();
                    stack.push(a / b);
                }
                OpCode::Pow => {
                    let b = stack.pop().unwrap();
                    let a = stack.pop().unwrap();
                    stack.push(a.powf(b));
                }
                OpCode::Neg => {
                    let a = stack.pop().unwrap();
                    stack.push(-a);
                }
                OpCode::Sin => {
                    let a = stack.pop().unwrap();
                    stack.push(a.sin());
                }
                OpCode::Cos => {
                    let a = stack.pop().unwrap();
                    stack.push(a.cos());
                }
                OpCode::Ln => {
                    let a = stack.pop().unwrap();
                    stack.push(a.ln());
                }
                OpCode::Log => {
                    let a = stack.pop().unwrap();
                    stack.push(a.log10());
                }
                OpCode::Sqrt => {
                    let a = stack.pop().unwrap();
                    stack.push(a.sqrt());
                }
                OpCode::Exp => {
                    let a = stack.pop().unwrap();
                    stack.push(a.exp());
                }
            }
        }

        // The result is the last item on the stack. NaN if the program was empty.
        stack.pop().unwrap_or_else(T::nan)
    }
}

// --- AST & Compiler ---

/// Abstract Syntax Tree nodes for expressions.
#[derive(Debug)]
pub enum Expr {
    Number(f64),
    /// The single variable `x`.
    Variable,
    Binary(Box<Expr>, char, Box<Expr>),
    Unary(char, Box<Expr>),
    Call(String, Box<Expr>),
}

/// Compiles an AST (`Expr`) into `Bytecode`.
pub fn compile(expr: &Expr) -> Result<Bytecode, ExprError> {
    let mut ops = Vec::new();
    compile_recursive(expr, &mut ops)?;
    Ok(Bytecode { ops })
}

fn compile_recursive(expr: &Expr, ops: &mut Vec<OpCode>) -> Result<(), ExprError> {
    match expr {
        Expr::Number(n) => ops.push(OpCode::LoadConst(*n)),
        Expr::Variable => ops.push(OpCode::LoadX),
        Expr::Binary(left, op, right) => {
            compile_recursive(left, ops)?;
            compile_recursive(right, ops)?;
            match op {
                '+' => ops.push(OpCode::Add),
                '-' => ops.push(OpCode::Sub),
                '*' => ops.push(OpCode::Mul),
                '/' => ops.push(OpCode::Div),
                '^' => ops.push(OpCode::Pow),
                other => return Err(ExprError::UnknownFunction(other.to_string())),
            }
        }
        Expr::Unary(_, operand) => {
            compile_recursive(operand, ops)?;
            ops.push(OpCode::Neg);
        }
        Expr::Call(func, arg) => {
            compile_recursive(arg, ops)?;
            match func.as_str() {
                "sin" => ops.push(OpCode::Sin),
                "cos" => ops.push(OpCode::Cos),
                "ln" => ops.push(OpCode::Ln),
                "log" => ops.push(OpCode::Log),
                "sqrt" => ops.push(OpCode::Sqrt),
                "exp" => ops.push(OpCode::Exp),
                other => return Err(ExprError::UnknownFunction(other.to_string())),
            }
        }
    }
    Ok(())
}

// --- Parser ---

/// Parses a string expression into an AST. The whole input must form one
/// expression: leftover tokens (as in `3x`, which has no implicit
/// multiplication) are an error, not a shorter parse.
pub fn parse(input: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(input);
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expression()?;
    if parser.pos != parser.tokens.len() {
        return Err(ExprError::TrailingInput);
    }
    Ok(expr)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let mut num_str = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    num_str.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Number(num_str.parse().unwrap_or(0.0)));
        } else if c.is_alphabetic() {
            let mut ident = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_alphanumeric() || d == '_' {
                    ident.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Identifier(ident));
        } else {
            match c {
                '+' => tokens.push(Token::Plus),
                '-' => tokens.push(Token::Minus),
                '*' => tokens.push(Token::Star),
                '/' => tokens.push(Token::Slash),
                '^' => tokens.push(Token::Caret),
                '(' => tokens.push(Token::LParen),
                ')' => tokens.push(Token::RParen),
                _ => {} // Ignore unknown
            }
            chars.next();
        }
    }
    tokens
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).cloned()
    }

    fn consume(&mut self) -> Option<Token> {
        if self.pos < self.tokens.len() {
            let t = self.tokens[self.pos].clone();
            self.pos += 1;
            Some(t)
        } else {
            None
        }
    }

    fn parse_expression(&mut self) -> Result<Expr, ExprError> {
        self.parse_term()
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_factor()?;

        while let Some(token) = self.peek() {
            match token {
                Token::Plus => {
                    self.consume();
                    let right = self.parse_factor()?;
                    left = Expr::Binary(Box::new(left), '+', Box::new(right));
                }
                Token::Minus => {
                    self.consume();
                    let right = self.parse_factor()?;
                    left = Expr::Binary(Box::new(left), '-', Box::new(right));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_power()?;

        while let Some(token) = self.peek() {
            match token {
                Token::Star => {
                    self.consume();
                    let right = self.parse_power()?;
                    left = Expr::Binary(Box::new(left), '*', Box::new(right));
                }
                Token::Slash => {
                    self.consume();
                    let right = self.parse_power()?;
                    left = Expr::Binary(Box::new(left), '/', Box::new(right));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_power(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_unary()?;

        while let Some(token) = self.peek() {
            match token {
                Token::Caret => {
                    self.consume();
                    let right = self.parse_unary()?;
                    left = Expr::Binary(Box::new(left), '^', Box::new(right));
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        if let Some(Token::Minus) = self.peek() {
            self.consume();
            let expr = self.parse_unary()?;
            return Ok(Expr::Unary('-', Box::new(expr)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Identifier(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    self.consume(); // eat '('
                    let arg = self.parse_expression()?;
                    if let Some(Token::RParen) = self.consume() {
                        Ok(Expr::Call(name, Box::new(arg)))
                    } else {
                        Err(ExprError::MissingParen)
                    }
                } else if name == "x" {
                    Ok(Expr::Variable)
                } else {
                    Err(ExprError::UnknownIdentifier(name))
                }
            }
            Some(Token::LParen) => {
                let expr = self.parse_expression()?;
                if let Some(Token::RParen) = self.consume() {
                    Ok(expr)
                } else {
                    Err(ExprError::MissingParen)
                }
            }
            _ => Err(ExprError::UnexpectedEnd),
        }
    }
}

// --- Function ---

/// A compiled single-variable function of `x`.
///
/// Interior mutability for the VM stack to avoid allocation per sample.
/// Note: this makes the function !Sync, which is fine on the single-threaded
/// UI callback model the widgets run under.
pub struct Function {
    code: Bytecode,
    source: String,
    stack: RefCell<Vec<f64>>,
}

impl Function {
    /// Parses and compiles a formula like `x^2 - 3*x + sin(x)`.
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let expr = parse(source)?;
        let code = compile(&expr)?;
        Ok(Self {
            code,
            source: source.to_string(),
            stack: RefCell::new(Vec::with_capacity(32)),
        })
    }

    /// Evaluates f(x). Domain violations yield NaN, never a panic.
    pub fn eval(&self, x: f64) -> f64 {
        let mut stack = self.stack.borrow_mut();
        VM::execute(&self.code, x, &mut stack)
    }

    /// Exact derivative f'(x) via forward-mode dual numbers.
    pub fn derivative(&self, x: f64) -> f64 {
        let mut stack: Vec<Dual> = Vec::with_capacity(32);
        VM::execute(&self.code, Dual::variable(x), &mut stack).eps
    }

    /// Central-difference approximation of f'(x), the quantity the
    /// limit-definition widget is teaching about.
    pub fn approximate_derivative(&self, x: f64, h: f64) -> f64 {
        (self.eval(x + h) - self.eval(x - h)) / (2.0 * h)
    }

    /// Difference quotient (f(a + h) - f(a)) / h for the secant-line display.
    pub fn difference_quotient(&self, a: f64, h: f64) -> f64 {
        (self.eval(a + h) - self.eval(a)) / h
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_polynomial() {
        let f = Function::parse("x^2 - 3*x + 1").expect("parse");
        assert!((f.eval(2.0) - (-1.0)).abs() < 1e-12);
        assert!((f.eval(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn evaluates_named_functions() {
        let f = Function::parse("sin(x) + cos(x)").expect("parse");
        assert!((f.eval(0.0) - 1.0).abs() < 1e-12);

        let g = Function::parse("sqrt(x) * exp(x)").expect("parse");
        assert!((g.eval(1.0) - 1.0f64.exp()).abs() < 1e-12);

        let h = Function::parse("log(x)").expect("parse");
        assert!((h.eval(100.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn domain_violation_yields_nan() {
        let f = Function::parse("ln(x)").expect("parse");
        assert!(f.eval(-1.0).is_nan());

        let g = Function::parse("sqrt(x)").expect("parse");
        assert!(g.eval(-4.0).is_nan());
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        assert_eq!(
            Function::parse("y + 1").err(),
            Some(ExprError::UnknownIdentifier("y".to_string()))
        );
    }

    #[test]
    fn unknown_function_is_rejected() {
        assert!(matches!(
            Function::parse("tanh(x)").err(),
            Some(ExprError::UnknownFunction(_))
        ));
    }

    #[test]
    fn truncated_input_is_rejected() {
        assert_eq!(Function::parse("1 +").err(), Some(ExprError::UnexpectedEnd));
        assert_eq!(
            Function::parse("sin(x").err(),
            Some(ExprError::MissingParen)
        );
    }

    #[test]
    fn trailing_tokens_are_rejected() {
        // No implicit multiplication: `3x` must not parse as the constant 3.
        assert_eq!(Function::parse("3x").err(), Some(ExprError::TrailingInput));
        assert_eq!(
            Function::parse("(x + 1)(x + 2)").err(),
            Some(ExprError::TrailingInput)
        );
        assert_eq!(Function::parse("1 2").err(), Some(ExprError::TrailingInput));
    }

    #[test]
    fn unary_minus_binds_tighter_than_caret() {
        // The grammar parses -x^2 as (-x)^2.
        let f = Function::parse("-x^2").expect("parse");
        assert!((f.eval(3.0) - 9.0).abs() < 1e-12);

        let g = Function::parse("0 - x^2").expect("parse");
        assert!((g.eval(3.0) + 9.0).abs() < 1e-12);
    }

    #[test]
    fn derivative_via_dual_matches_closed_form() {
        let f = Function::parse("x^3 - 3*x^2").expect("parse");
        assert!(f.derivative(0.0).abs() < 1e-9);
        assert!(f.derivative(2.0).abs() < 1e-9);
        assert!((f.derivative(3.0) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn approximate_derivative_close_to_exact() {
        let f = Function::parse("sin(x)").expect("parse");
        let exact = 1.5f64.cos();
        assert!((f.approximate_derivative(1.5, 1e-4) - exact).abs() < 1e-7);
    }
}
