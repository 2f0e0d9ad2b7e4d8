use crate::polynomial::{Polynomial, PolynomialError};
use serde::{Deserialize, Serialize};
use std::fmt;

const EPS_ZERO: f64 = 1e-10;

/// What f(x) approaches as x → ±∞, by degree comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EndBehavior {
    /// Numerator degree exceeds denominator degree by two or more.
    None,
    Horizontal { y: f64 },
    Slant { slope: f64, intercept: f64 },
}

/// Denominator zeros split by whether the numerator vanishes there too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Discontinuities {
    /// Removable: numerator and denominator share the zero.
    pub holes: Vec<f64>,
    pub vertical_asymptotes: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RationalReport {
    pub function: String,
    pub numerator_degree: usize,
    pub denominator_degree: usize,
    pub numerator_roots: Vec<f64>,
    pub discontinuities: Discontinuities,
    pub end_behavior: EndBehavior,
}

/// f(x) = p(x) / q(x) for the rational-function explorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationalFunction {
    pub numerator: Polynomial,
    pub denominator: Polynomial,
}

impl RationalFunction {
    pub fn new(numerator: Polynomial, denominator: Polynomial) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn parse(numerator: &str, denominator: &str) -> Result<Self, PolynomialError> {
        Ok(Self {
            numerator: Polynomial::parse(numerator)?,
            denominator: Polynomial::parse(denominator)?,
        })
    }

    /// NaN at discontinuities rather than an error; plotting callers skip
    /// the sample.
    pub fn eval(&self, x: f64) -> f64 {
        let den = self.denominator.eval(x);
        if den.abs() <= EPS_ZERO {
            f64::NAN
        } else {
            self.numerator.eval(x) / den
        }
    }

    pub fn end_behavior(&self) -> EndBehavior {
        let n = self.numerator.degree();
        let m = self.denominator.degree();
        if n < m {
            EndBehavior::Horizontal { y: 0.0 }
        } else if n == m {
            EndBehavior::Horizontal {
                y: self.numerator.leading_coefficient() / self.denominator.leading_coefficient(),
            }
        } else if n == m + 1 {
            match self.numerator.slant_quotient(&self.denominator) {
                Some((slope, intercept)) => EndBehavior::Slant { slope, intercept },
                None => EndBehavior::None,
            }
        } else {
            EndBehavior::None
        }
    }

    /// Classifies each denominator zero found by the integer scan: a shared
    /// zero is a hole, otherwise a vertical asymptote.
    pub fn holes_and_asymptotes(&self) -> Discontinuities {
        let mut out = Discontinuities::default();
        for x in self.denominator.integer_roots() {
            if self.numerator.eval(x).abs() < EPS_ZERO {
                out.holes.push(x);
            } else {
                out.vertical_asymptotes.push(x);
            }
        }
        out
    }

    pub fn analyze(&self) -> RationalReport {
        RationalReport {
            function: self.to_string(),
            numerator_degree: self.numerator.degree(),
            denominator_degree: self.denominator.degree(),
            numerator_roots: self.numerator.integer_roots(),
            discontinuities: self.holes_and_asymptotes(),
            end_behavior: self.end_behavior(),
        }
    }
}

impl fmt::Display for RationalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) / ({})", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hole_versus_vertical_asymptote() {
        // (x - 1) / ((x - 1)(x - 2)): hole at 1, asymptote at 2.
        let f = RationalFunction::parse("x - 1", "x^2 - 3x + 2").unwrap();
        let d = f.holes_and_asymptotes();
        assert_eq!(d.holes, vec![1.0]);
        assert_eq!(d.vertical_asymptotes, vec![2.0]);
    }

    #[test]
    fn star_notation_inputs_classify_discontinuities() {
        // Denominator roots 1 and 2; the numerator vanishes at 1 only.
        let f = RationalFunction::parse("x^3-3*x^2+6*x-4", "x^2-3*x+2").unwrap();
        let d = f.holes_and_asymptotes();
        assert_eq!(d.holes, vec![1.0]);
        assert_eq!(d.vertical_asymptotes, vec![2.0]);
    }

    #[test]
    fn eval_is_nan_at_discontinuities() {
        let f = RationalFunction::parse("x - 1", "x^2 - 3x + 2").unwrap();
        assert!(f.eval(1.0).is_nan());
        assert!(f.eval(2.0).is_nan());
        assert!((f.eval(3.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn equal_degrees_give_leading_ratio() {
        let f = RationalFunction::parse("2x^2 + 1", "x^2 - 4").unwrap();
        assert_eq!(f.end_behavior(), EndBehavior::Horizontal { y: 2.0 });
    }

    #[test]
    fn smaller_numerator_approaches_zero() {
        let f = RationalFunction::parse("x + 1", "x^2 - 4").unwrap();
        assert_eq!(f.end_behavior(), EndBehavior::Horizontal { y: 0.0 });
    }

    #[test]
    fn slant_asymptote_from_two_term_division() {
        let f = RationalFunction::parse("x^3 - 3x^2 + 6x - 4", "x^2 - 3x + 2").unwrap();
        match f.end_behavior() {
            EndBehavior::Slant { slope, intercept } => {
                assert!((slope - 1.0).abs() < 1e-12);
                assert!(intercept.abs() < 1e-12);
            }
            other => panic!("expected slant asymptote, got {:?}", other),
        }
    }

    #[test]
    fn large_degree_gap_has_no_end_asymptote() {
        let f = RationalFunction::parse("x^4 + 1", "x + 1").unwrap();
        assert_eq!(f.end_behavior(), EndBehavior::None);
    }

    #[test]
    fn report_collects_everything() {
        let f = RationalFunction::parse("x - 1", "x^2 - 3x + 2").unwrap();
        let report = f.analyze();
        assert_eq!(report.numerator_degree, 1);
        assert_eq!(report.denominator_degree, 2);
        assert_eq!(report.numerator_roots, vec![1.0]);
        assert_eq!(report.function, "(x - 1) / (x^2 - 3x + 2)");
        assert_eq!(report.end_behavior, EndBehavior::Horizontal { y: 0.0 });
    }
}
