use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

const EPS_ZERO: f64 = 1e-10;

/// f(x) = ax² + bx + c.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// Roots of a quadratic, split by the sign of the discriminant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "roots")]
pub enum QuadraticRoots {
    /// Two distinct real roots, ascending.
    Real(f64, f64),
    /// A repeated real root.
    Repeated(f64),
    /// Conjugate pair; only the root with positive imaginary part is stored.
    Complex(Complex64),
}

/// The range of a parabola, bounded on one side by the vertex value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "bound", content = "y")]
pub enum RangeBound {
    AtLeast(f64),
    AtMost(f64),
}

/// Summary for the parabola explorer panel. A vanishing leading coefficient
/// degrades to a line description instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum QuadraticReport {
    Parabola {
        function: String,
        vertex: (f64, f64),
        axis_of_symmetry: f64,
        discriminant: f64,
        opens_upward: bool,
        y_intercept: f64,
        range: RangeBound,
        roots: QuadraticRoots,
    },
    Line {
        function: String,
        slope: f64,
        y_intercept: f64,
        root: Option<f64>,
    },
}

impl Quadratic {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn eval(&self, x: f64) -> f64 {
        (self.a * x + self.b) * x + self.c
    }

    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }

    pub fn is_degenerate(&self) -> bool {
        self.a.abs() < EPS_ZERO
    }

    /// Vertex at x = -b/(2a). Meaningless for a degenerate quadratic.
    pub fn vertex(&self) -> (f64, f64) {
        let x = -self.b / (2.0 * self.a);
        (x, self.eval(x))
    }

    pub fn roots(&self) -> QuadraticRoots {
        let disc = self.discriminant();
        let two_a = 2.0 * self.a;
        if disc.abs() < EPS_ZERO {
            QuadraticRoots::Repeated(-self.b / two_a)
        } else if disc > 0.0 {
            let sqrt_disc = disc.sqrt();
            let mut r1 = (-self.b + sqrt_disc) / two_a;
            let mut r2 = (-self.b - sqrt_disc) / two_a;
            if r1 > r2 {
                std::mem::swap(&mut r1, &mut r2);
            }
            QuadraticRoots::Real(r1, r2)
        } else {
            QuadraticRoots::Complex(Complex64::new(
                -self.b / two_a,
                (-disc).sqrt() / two_a.abs(),
            ))
        }
    }

    pub fn analyze(&self) -> QuadraticReport {
        if self.is_degenerate() {
            let root = if self.b.abs() < EPS_ZERO {
                None
            } else {
                Some(-self.c / self.b)
            };
            return QuadraticReport::Line {
                function: self.to_string(),
                slope: self.b,
                y_intercept: self.c,
                root,
            };
        }

        let vertex = self.vertex();
        let range = if self.a > 0.0 {
            RangeBound::AtLeast(vertex.1)
        } else {
            RangeBound::AtMost(vertex.1)
        };
        QuadraticReport::Parabola {
            function: self.to_string(),
            vertex,
            axis_of_symmetry: vertex.0,
            discriminant: self.discriminant(),
            opens_upward: self.a > 0.0,
            y_intercept: self.c,
            range,
            roots: self.roots(),
        }
    }
}

impl fmt::Display for Quadratic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for (coeff, exp) in [(self.a, 2u32), (self.b, 1), (self.c, 0)] {
            if coeff == 0.0 {
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
    fn distinct_real_roots_sorted() {
        // x² - x - 6 = (x-3)(x+2)
        let q = Quadratic::new(1.0, -1.0, -6.0);
        assert_eq!(q.roots(), QuadraticRoots::Real(-2.0, 3.0));
    }

    #[test]
    fn repeated_root_at_vertex() {
        let q = Quadratic::new(1.0, -4.0, 4.0);
        assert_eq!(q.roots(), QuadraticRoots::Repeated(2.0));
        let (vx, vy) = q.vertex();
        assert!((vx - 2.0).abs() < 1e-12);
        assert!(vy.abs() < 1e-12);
    }

    #[test]
    fn complex_conjugate_roots() {
        // x² + 1 = 0 has roots ±i.
        let q = Quadratic::new(1.0, 0.0, 1.0);
        match q.roots() {
            QuadraticRoots::Complex(z) => {
                assert!(z.re.abs() < 1e-12);
                assert!((z.im - 1.0).abs() < 1e-12);
            }
            other => panic!("expected complex roots, got {:?}", other),
        }
    }

    #[test]
    fn downward_parabola_is_bounded_above() {
        let q = Quadratic::new(-2.0, 4.0, 1.0);
        match q.analyze() {
            QuadraticReport::Parabola {
                opens_upward,
                axis_of_symmetry,
                range,
                function,
                ..
            } => {
                assert!(!opens_upward);
                assert!((axis_of_symmetry - 1.0).abs() < 1e-12);
                assert_eq!(range, RangeBound::AtMost(3.0));
                assert_eq!(function, "-2x^2 + 4x + 1");
            }
            other => panic!("expected parabola, got {:?}", other),
        }
    }

    #[test]
    fn zero_leading_coefficient_reports_a_line() {
        let q = Quadratic::new(0.0, 2.0, -4.0);
        assert_eq!(
            q.analyze(),
            QuadraticReport::Line {
                function: "2x - 4".to_string(),
                slope: 2.0,
                y_intercept: -4.0,
                root: Some(2.0),
            }
        );
    }
}
