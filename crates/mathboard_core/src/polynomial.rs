use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const EPS_ZERO: f64 = 1e-10;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolynomialError {
    #[error("empty polynomial")]
    Empty,
    #[error("malformed term: '{0}'")]
    BadTerm(String),
    #[error("malformed exponent in term: '{0}'")]
    BadExponent(String),
}

/// A polynomial in x stored as coefficients indexed by exponent.
///
/// Parsed once from the widget's text form; all analysis afterwards works on
/// the coefficient array, never on the string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial(Vec<f64>);

impl Polynomial {
    pub fn from_coefficients(mut coeffs: Vec<f64>) -> Self {
        while coeffs.len() > 1 && coeffs.last() == Some(&0.0) {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(0.0);
        }
        Self(coeffs)
    }

    /// Parses forms like `x^3 - 3x^2 + 6x - 4`, `-x`, `2.5x^2 + 1`, with or
    /// without an explicit `*` between coefficient and variable.
    /// A bare sign in front of x means a coefficient of ±1.
    pub fn parse(input: &str) -> Result<Self, PolynomialError> {
        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Err(PolynomialError::Empty);
        }

        // Split into signed terms.
        let mut terms: Vec<String> = Vec::new();
        let mut current = String::new();
        for (i, ch) in compact.chars().enumerate() {
            if (ch == '+' || ch == '-') && i > 0 {
                terms.push(std::mem::take(&mut current));
                if ch == '-' {
                    current.push('-');
                }
            } else {
                current.push(ch);
            }
        }
        terms.push(current);

        let mut coeffs = vec![0.0];
        for term in &terms {
            let (coeff, exp) = parse_term(term)?;
            if coeffs.len() <= exp {
                coeffs.resize(exp + 1, 0.0);
            }
            coeffs[exp] += coeff;
        }
        Ok(Self::from_coefficients(coeffs))
    }

    pub fn degree(&self) -> usize {
        self.0.len() - 1
    }

    pub fn leading_coefficient(&self) -> f64 {
        *self.0.last().unwrap_or(&0.0)
    }

    pub fn coefficient(&self, exp: usize) -> f64 {
        self.0.get(exp).copied().unwrap_or(0.0)
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.0.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Integer roots in −10..=10 by brute substitution.
    ///
    /// This is deliberately the narrow root finder the explorer uses; it will
    /// not find non-integer or out-of-window roots.
    pub fn integer_roots(&self) -> Vec<f64> {
        (-10..=10)
            .map(|k| k as f64)
            .filter(|&x| self.eval(x).abs() < EPS_ZERO)
            .collect()
    }

    /// First two terms of the long division self / den, as (slope, intercept).
    ///
    /// Only meaningful when the numerator degree exceeds the denominator
    /// degree by exactly one, where the quotient is the slant asymptote.
    pub fn slant_quotient(&self, den: &Polynomial) -> Option<(f64, f64)> {
        if self.degree() != den.degree() + 1 || den.leading_coefficient().abs() < EPS_ZERO {
            return None;
        }
        let n = self.degree();
        let m = den.degree();
        let slope = self.coefficient(n) / den.leading_coefficient();
        let intercept = if m == 0 {
            self.coefficient(n - 1) / den.leading_coefficient()
        } else {
            (self.coefficient(n - 1) - slope * den.coefficient(m - 1))
                / den.leading_coefficient()
        };
        Some((slope, intercept))
    }
}

/// One signed term: coefficient and exponent.
fn parse_term(term: &str) -> Result<(f64, usize), PolynomialError> {
    if term.is_empty() || term == "-" || term == "+" {
        return Err(PolynomialError::BadTerm(term.to_string()));
    }

    match term.find('x') {
        None => {
            let coeff: f64 = term
                .parse()
                .map_err(|_| PolynomialError::BadTerm(term.to_string()))?;
            Ok((coeff, 0))
        }
        Some(pos) => {
            // `3x` and `3*x` are both accepted.
            let coeff_str = term[..pos].strip_suffix('*').unwrap_or(&term[..pos]);
            let coeff = match coeff_str {
                "" => 1.0,
                "-" => -1.0,
                "+" => 1.0,
                s => s
                    .parse()
                    .map_err(|_| PolynomialError::BadTerm(term.to_string()))?,
            };
            let rest = &term[pos + 1..];
            let exp = if rest.is_empty() {
                1
            } else if let Some(exp_str) = rest.strip_prefix('^') {
                exp_str
                    .parse()
                    .map_err(|_| PolynomialError::BadExponent(term.to_string()))?
            } else {
                return Err(PolynomialError::BadTerm(term.to_string()));
            };
            Ok((coeff, exp))
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for (exp, &coeff) in self.0.iter().enumerate().rev() {
            if coeff == 0.0 && self.degree() > 0 {
                continue;
            }
            if out.is_empty() {
                if coeff < 0.0 {
                    out.push('-');
                }
            } else {
                out.push_str(if coeff > 0.0 { " + " } else { " - " });
            }
            let mag = coeff.abs();
            if mag != 1.0 || exp == 0 {
                out.push_str(&format!("{}", mag));
            }
            match exp {
                0 => {}
                1 => out.push('x'),
                _ => out.push_str(&format!("x^{}", exp)),
            }
        }
        if out.is_empty() {
            out.push('0');
        }
        write!(f, "{}", out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_form() {
        let p = Polynomial::parse("x^3 - 3x^2 + 6x - 4").unwrap();
        assert_eq!(p.degree(), 3);
        assert_eq!(p.leading_coefficient(), 1.0);
        assert_eq!(p.coefficient(2), -3.0);
        assert_eq!(p.coefficient(1), 6.0);
        assert_eq!(p.coefficient(0), -4.0);
    }

    #[test]
    fn bare_sign_means_unit_coefficient() {
        let p = Polynomial::parse("-x").unwrap();
        assert_eq!(p.degree(), 1);
        assert_eq!(p.leading_coefficient(), -1.0);

        let q = Polynomial::parse("x^2").unwrap();
        assert_eq!(q.leading_coefficient(), 1.0);
    }

    #[test]
    fn star_multiplication_notation() {
        let p = Polynomial::parse("x^3-3*x^2+6*x-4").unwrap();
        let q = Polynomial::parse("x^3 - 3x^2 + 6x - 4").unwrap();
        assert_eq!(p, q);
        assert_eq!(Polynomial::parse("-2*x").unwrap().coefficient(1), -2.0);
    }

    #[test]
    fn fractional_and_multidigit_coefficients() {
        let p = Polynomial::parse("2.5x^2 + 12x - 0.25").unwrap();
        assert!((p.eval(2.0) - (10.0 + 24.0 - 0.25)).abs() < 1e-12);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Polynomial::parse("").is_err());
        assert!(Polynomial::parse("x^").is_err());
        assert!(Polynomial::parse("3 + -").is_err());
        assert!(Polynomial::parse("3y").is_err());
    }

    #[test]
    fn repeated_exponents_accumulate() {
        let p = Polynomial::parse("x + x").unwrap();
        assert_eq!(p.coefficient(1), 2.0);
    }

    #[test]
    fn integer_root_scan_window() {
        // (x - 1)(x - 2) has both roots in the window.
        let p = Polynomial::parse("x^2 - 3x + 2").unwrap();
        assert_eq!(p.integer_roots(), vec![1.0, 2.0]);

        // Root at 100 is outside the scan.
        let q = Polynomial::parse("x - 100").unwrap();
        assert!(q.integer_roots().is_empty());
    }

    #[test]
    fn slant_quotient_of_degree_gap_one() {
        let num = Polynomial::parse("x^3 - 3x^2 + 6x - 4").unwrap();
        let den = Polynomial::parse("x^2 - 3x + 2").unwrap();
        let (slope, intercept) = num.slant_quotient(&den).unwrap();
        assert!((slope - 1.0).abs() < 1e-12);
        assert!(intercept.abs() < 1e-12);
    }

    #[test]
    fn slant_quotient_requires_degree_gap_of_one() {
        let num = Polynomial::parse("x^4 + 1").unwrap();
        let den = Polynomial::parse("x^2 + 1").unwrap();
        assert!(num.slant_quotient(&den).is_none());
        assert!(den.slant_quotient(&num).is_none());
    }

    #[test]
    fn display_round_trips_standard_form() {
        let p = Polynomial::parse("x^3-3x^2+6x-4").unwrap();
        assert_eq!(p.to_string(), "x^3 - 3x^2 + 6x - 4");
        assert_eq!(Polynomial::parse("0").unwrap().to_string(), "0");
    }
}
