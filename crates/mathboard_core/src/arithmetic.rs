use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("operands must be finite numbers")]
    NonFinite,
}

/// The four calculator keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Applies one calculator operation with the widget's user-visible
/// validation: non-finite inputs and division by zero are errors, never NaN
/// on the display.
pub fn apply(op: BasicOp, a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(ArithmeticError::NonFinite);
    }
    match op {
        BasicOp::Add => Ok(a + b),
        BasicOp::Sub => Ok(a - b),
        BasicOp::Mul => Ok(a * b),
        BasicOp::Div => {
            if b == 0.0 {
                Err(ArithmeticError::DivisionByZero)
            } else {
                Ok(a / b)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_operations() {
        assert_eq!(apply(BasicOp::Add, 2.0, 3.0), Ok(5.0));
        assert_eq!(apply(BasicOp::Sub, 2.0, 3.0), Ok(-1.0));
        assert_eq!(apply(BasicOp::Mul, 2.0, 3.0), Ok(6.0));
        assert_eq!(apply(BasicOp::Div, 3.0, 2.0), Ok(1.5));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(
            apply(BasicOp::Div, 1.0, 0.0),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn non_finite_operands_are_rejected() {
        assert_eq!(
            apply(BasicOp::Add, f64::NAN, 1.0),
            Err(ArithmeticError::NonFinite)
        );
        assert_eq!(
            apply(BasicOp::Mul, f64::INFINITY, 2.0),
            Err(ArithmeticError::NonFinite)
        );
    }
}
