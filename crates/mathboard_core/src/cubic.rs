use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance used when deciding a coefficient or residual is zero.
const EPS_ZERO: f64 = 1e-10;
/// Second-derivative magnitude below which the test is inconclusive.
const EPS_CLASSIFY: f64 = 1e-3;
/// Effective infinity for interval sign sampling.
const SAMPLE_BOUND: f64 = 1000.0;

/// f(x) = ax³ + bx² + cx + d.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cubic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

/// Second Derivative Test outcome at a critical point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extremum {
    Minimum,
    Maximum,
    /// |f''| within tolerance of zero: possible inflection point.
    Inconclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtremumPoint {
    pub x: f64,
    pub y: f64,
    pub kind: Extremum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConcavityChange {
    UpToDown,
    DownToUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflectionPoint {
    pub x: f64,
    pub y: f64,
    pub concavity_change: ConcavityChange,
}

/// An open interval of the real line; endpoints may be ±∞.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = |v: f64, fm: &mut fmt::Formatter<'_>| -> fmt::Result {
            if v == f64::NEG_INFINITY {
                write!(fm, "-∞")
            } else if v == f64::INFINITY {
                write!(fm, "∞")
            } else {
                write!(fm, "{:.3}", v)
            }
        };
        write!(f, "(")?;
        end(self.lo, f)?;
        write!(f, ", ")?;
        end(self.hi, f)?;
        write!(f, ")")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Monotonicity {
    pub increasing: Vec<Interval>,
    pub decreasing: Vec<Interval>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Concavity {
    pub concave_up: Vec<Interval>,
    pub concave_down: Vec<Interval>,
}

/// Complete analysis record for the function-analysis panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubicReport {
    pub function: String,
    pub first_derivative: String,
    pub second_derivative: String,
    pub critical_points: Vec<f64>,
    pub extrema: Vec<ExtremumPoint>,
    pub rational_zeros: Vec<f64>,
    pub inflection_points: Vec<InflectionPoint>,
    pub monotonicity: Monotonicity,
    pub concavity: Concavity,
}

impl Cubic {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    pub fn eval(&self, x: f64) -> f64 {
        ((self.a * x + self.b) * x + self.c) * x + self.d
    }

    /// f'(x) = 3ax² + 2bx + c.
    pub fn deriv(&self, x: f64) -> f64 {
        (3.0 * self.a * x + 2.0 * self.b) * x + self.c
    }

    /// f''(x) = 6ax + 2b.
    pub fn second_deriv(&self, x: f64) -> f64 {
        6.0 * self.a * x + 2.0 * self.b
    }

    /// Real roots of f'(x) = 0, ascending.
    ///
    /// A vanishing leading coefficient degrades to the linear solve of
    /// 2bx + c = 0 rather than failing.
    pub fn critical_points(&self) -> Vec<f64> {
        let qa = 3.0 * self.a;
        let qb = 2.0 * self.b;
        let qc = self.c;

        if qa.abs() < EPS_ZERO {
            if qb.abs() < EPS_ZERO {
                return Vec::new();
            }
            return vec![-qc / qb];
        }

        let discriminant = qb * qb - 4.0 * qa * qc;
        if discriminant < -EPS_ZERO {
            Vec::new()
        } else if discriminant.abs() < EPS_ZERO {
            vec![-qb / (2.0 * qa)]
        } else {
            let sqrt_disc = discriminant.sqrt();
            let mut roots = vec![(-qb + sqrt_disc) / (2.0 * qa), (-qb - sqrt_disc) / (2.0 * qa)];
            roots.sort_by(|p, q| p.partial_cmp(q).unwrap());
            roots
        }
    }

    /// Second Derivative Test at `x`.
    pub fn classify(&self, x: f64) -> Extremum {
        let dd = self.second_deriv(x);
        if dd.abs() < EPS_CLASSIFY {
            Extremum::Inconclusive
        } else if dd > 0.0 {
            Extremum::Minimum
        } else {
            Extremum::Maximum
        }
    }

    /// Critical points paired with their value and classification,
    /// inconclusive points excluded.
    pub fn extrema(&self) -> Vec<ExtremumPoint> {
        self.critical_points()
            .into_iter()
            .filter_map(|x| {
                let kind = self.classify(x);
                if kind == Extremum::Inconclusive {
                    None
                } else {
                    Some(ExtremumPoint {
                        x,
                        y: self.eval(x),
                        kind,
                    })
                }
            })
            .collect()
    }

    /// Verified rational zeros via the Rational Root Theorem: candidates
    /// ±p/q with p | |d| and q | |a|, tested by substitution. Sorted
    /// ascending; identical inputs always produce identical output.
    pub fn rational_zeros(&self) -> Vec<f64> {
        let mut candidates = Vec::new();
        if self.d == 0.0 {
            candidates.push(0.0);
        }
        for p in factors(self.d.abs()) {
            for q in factors(self.a.abs()) {
                candidates.push(p as f64 / q as f64);
                candidates.push(-(p as f64) / q as f64);
            }
        }

        candidates.sort_by(|p, q| p.partial_cmp(q).unwrap());
        candidates.dedup_by(|p, q| (*p - *q).abs() < EPS_ZERO);

        candidates
            .into_iter()
            .filter(|&x| self.eval(x).abs() < EPS_ZERO)
            .collect()
    }

    /// Candidate x where f''(x) = 0. Undefined for a degenerate cubic.
    pub fn inflection_candidate(&self) -> Option<f64> {
        if self.a.abs() < EPS_ZERO {
            None
        } else {
            Some(-self.b / (3.0 * self.a))
        }
    }

    /// Inflection points confirmed by a concavity sign change across the
    /// candidate (sampled at x ± 0.1).
    pub fn inflection_points(&self) -> Vec<InflectionPoint> {
        let Some(x) = self.inflection_candidate() else {
            return Vec::new();
        };
        let left = self.second_deriv(x - 0.1);
        let right = self.second_deriv(x + 0.1);
        if left * right < 0.0 {
            let concavity_change = if left > 0.0 {
                ConcavityChange::UpToDown
            } else {
                ConcavityChange::DownToUp
            };
            vec![InflectionPoint {
                x,
                y: self.eval(x),
                concavity_change,
            }]
        } else {
            Vec::new()
        }
    }

    /// Partitions the line at the critical points and labels each interval
    /// by the sign of f' at its midpoint (±1000 as effective infinity).
    pub fn monotonicity(&self) -> Monotonicity {
        let mut result = Monotonicity::default();
        for (interval, mid) in partition(&self.critical_points()) {
            let slope = self.deriv(mid);
            if slope > 0.0 {
                result.increasing.push(interval);
            } else if slope < 0.0 {
                result.decreasing.push(interval);
            }
        }
        result
    }

    /// Same partition scheme as `monotonicity`, over f'' and the inflection
    /// candidate.
    pub fn concavity(&self) -> Concavity {
        let candidates: Vec<f64> = self.inflection_candidate().into_iter().collect();
        let mut result = Concavity::default();
        for (interval, mid) in partition(&candidates) {
            let bend = self.second_deriv(mid);
            if bend > 0.0 {
                result.concave_up.push(interval);
            } else if bend < 0.0 {
                result.concave_down.push(interval);
            }
        }
        result
    }

    /// Everything the analysis panel displays, in one serializable record.
    pub fn analyze(&self) -> CubicReport {
        CubicReport {
            function: self.to_string(),
            first_derivative: format_poly(&[3.0 * self.a, 2.0 * self.b, self.c]),
            second_derivative: format_poly(&[6.0 * self.a, 2.0 * self.b]),
            critical_points: self.critical_points(),
            extrema: self.extrema(),
            rational_zeros: self.rational_zeros(),
            inflection_points: self.inflection_points(),
            monotonicity: self.monotonicity(),
            concavity: self.concavity(),
        }
    }
}

impl fmt::Display for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_poly(&[self.a, self.b, self.c, self.d]))
    }
}

/// Positive divisors of |n| for the Rational Root Theorem. Non-integer or
/// zero input yields just 1, matching the widget's candidate set.
fn factors(n: f64) -> Vec<u32> {
    let n = n.abs();
    if n == 0.0 || n.fract() != 0.0 || n > u32::MAX as f64 {
        return vec![1];
    }
    let n = n as u32;
    (1..=n).filter(|i| n % i == 0).collect()
}

/// Splits the real line at the given ascending points, yielding each open
/// interval together with a representative sample point.
fn partition(points: &[f64]) -> Vec<(Interval, f64)> {
    let mut bounds = Vec::with_capacity(points.len() + 2);
    bounds.push(-SAMPLE_BOUND);
    bounds.extend_from_slice(points);
    bounds.push(SAMPLE_BOUND);

    let mut out = Vec::with_capacity(bounds.len() - 1);
    for i in 0..bounds.len() - 1 {
        let lo = if i == 0 {
            f64::NEG_INFINITY
        } else {
            bounds[i]
        };
        let hi = if i == bounds.len() - 2 {
            f64::INFINITY
        } else {
            bounds[i + 1]
        };
        let mid = (bounds[i] + bounds[i + 1]) / 2.0;
        out.push((Interval { lo, hi }, mid));
    }
    out
}

/// Formats a polynomial from coefficients in descending-degree order,
/// omitting zero terms and unit coefficients the way the display panel does.
fn format_poly(coeffs: &[f64]) -> String {
    let degree = coeffs.len() - 1;
    let mut out = String::new();
    for (i, &coeff) in coeffs.iter().enumerate() {
        if coeff == 0.0 {
            continue;
        }
        let exp = degree - i;
        if out.is_empty() {
            if coeff < 0.0 {
                out.push('-');
            }
        } else {
            out.push_str(if coeff > 0.0 { " + " } else { " - " });
        }
        let mag = coeff.abs();
        if mag != 1.0 || exp == 0 {
            if mag.fract() == 0.0 {
                out.push_str(&format!("{}", mag));
            } else {
                out.push_str(&format!("{:.3}", mag));
            }
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
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_points_of_x3_minus_3x2() {
        // f(x) = x³ - 3x², f'(x) = 3x² - 6x, roots 0 and 2.
        let f = Cubic::new(1.0, -3.0, 0.0, 0.0);
        let cps = f.critical_points();
        assert_eq!(cps.len(), 2);
        assert!((cps[0] - 0.0).abs() < 1e-9);
        assert!((cps[1] - 2.0).abs() < 1e-9);
        assert_eq!(f.classify(0.0), Extremum::Maximum);
        assert_eq!(f.classify(2.0), Extremum::Minimum);
    }

    #[test]
    fn critical_points_satisfy_derivative_equation() {
        let cases = [
            (1.0, -3.0, 0.0),
            (2.0, 1.0, -4.0),
            (-0.5, 2.0, 3.0),
            (1.0, 0.0, -12.0),
        ];
        for (a, b, c) in cases {
            let f = Cubic::new(a, b, c, 7.0);
            for x in f.critical_points() {
                assert!(
                    (3.0 * a * x * x + 2.0 * b * x + c).abs() < 1e-6,
                    "root {x} of derivative for a={a}, b={b}, c={c}"
                );
            }
        }
    }

    #[test]
    fn degenerate_leading_coefficient_falls_back_to_linear() {
        // a = 0: f' = 2bx + c.
        let f = Cubic::new(0.0, 1.0, -4.0, 0.0);
        assert_eq!(f.critical_points(), vec![2.0]);
    }

    #[test]
    fn doubly_degenerate_has_no_critical_points() {
        let f = Cubic::new(0.0, 0.0, 5.0, 1.0);
        assert!(f.critical_points().is_empty());
        let g = Cubic::new(0.0, 0.0, 0.0, 3.0);
        assert!(g.critical_points().is_empty());
    }

    #[test]
    fn rational_zeros_are_verified_and_sorted() {
        // x³ - 6x² + 11x - 6 = (x-1)(x-2)(x-3).
        let g = Cubic::new(1.0, -6.0, 11.0, -6.0);
        assert_eq!(g.rational_zeros(), vec![1.0, 2.0, 3.0]);

        // 2x³ - 3x² - 11x + 6 has the fractional zero 1/2.
        let h = Cubic::new(2.0, -3.0, -11.0, 6.0);
        assert_eq!(h.rational_zeros(), vec![-2.0, 0.5, 3.0]);
    }

    #[test]
    fn zero_constant_term_keeps_only_the_origin_candidate() {
        // x³ - 3x² = x²(x - 3): with d = 0 the candidate set is {0, ±1},
        // so the zero at x = 3 is outside it.
        let f = Cubic::new(1.0, -3.0, 0.0, 0.0);
        assert_eq!(f.rational_zeros(), vec![0.0]);
    }

    #[test]
    fn rational_zeros_is_idempotent() {
        let f = Cubic::new(2.0, -3.0, -11.0, 6.0);
        assert_eq!(f.rational_zeros(), f.rational_zeros());
    }

    #[test]
    fn inflection_point_confirmed_by_sign_change() {
        let f = Cubic::new(1.0, -3.0, 0.0, 0.0);
        let points = f.inflection_points();
        assert_eq!(points.len(), 1);
        assert!((points[0].x - 1.0).abs() < 1e-9);
        assert!((points[0].y + 2.0).abs() < 1e-9);
        assert_eq!(points[0].concavity_change, ConcavityChange::DownToUp);
    }

    #[test]
    fn no_inflection_for_quadratic() {
        let f = Cubic::new(0.0, 1.0, 0.0, 0.0);
        assert!(f.inflection_points().is_empty());
    }

    #[test]
    fn monotonicity_partitions_at_critical_points() {
        let f = Cubic::new(1.0, -3.0, 0.0, 0.0);
        let m = f.monotonicity();
        assert_eq!(m.increasing.len(), 2);
        assert_eq!(m.decreasing.len(), 1);
        assert_eq!(m.increasing[0].lo, f64::NEG_INFINITY);
        assert!((m.increasing[0].hi - 0.0).abs() < 1e-9);
        assert!((m.decreasing[0].lo - 0.0).abs() < 1e-9);
        assert!((m.decreasing[0].hi - 2.0).abs() < 1e-9);
        assert_eq!(m.increasing[1].hi, f64::INFINITY);
    }

    #[test]
    fn concavity_splits_at_inflection_candidate() {
        let f = Cubic::new(1.0, -3.0, 0.0, 0.0);
        let c = f.concavity();
        assert_eq!(c.concave_down.len(), 1);
        assert_eq!(c.concave_up.len(), 1);
        assert_eq!(c.concave_down[0].lo, f64::NEG_INFINITY);
        assert!((c.concave_down[0].hi - 1.0).abs() < 1e-9);
        assert_eq!(c.concave_up[0].hi, f64::INFINITY);
    }

    #[test]
    fn monotone_cubic_covers_the_whole_line() {
        // f(x) = x³ + x is strictly increasing, no critical points.
        let f = Cubic::new(1.0, 0.0, 1.0, 0.0);
        let m = f.monotonicity();
        assert_eq!(
            m.increasing,
            vec![Interval {
                lo: f64::NEG_INFINITY,
                hi: f64::INFINITY
            }]
        );
        assert!(m.decreasing.is_empty());
    }

    #[test]
    fn display_formatting() {
        assert_eq!(Cubic::new(1.0, -3.0, 0.0, 0.0).to_string(), "x^3 - 3x^2");
        assert_eq!(Cubic::new(-1.0, 0.0, 1.0, -2.0).to_string(), "-x^3 + x - 2");
        assert_eq!(Cubic::new(0.0, 0.0, 0.0, 0.0).to_string(), "0");
        assert_eq!(interval_str(f64::NEG_INFINITY, 2.0), "(-∞, 2.000)");
    }

    fn interval_str(lo: f64, hi: f64) -> String {
        Interval { lo, hi }.to_string()
    }

    #[test]
    fn full_report_is_consistent() {
        let f = Cubic::new(1.0, -6.0, 9.0, -4.0);
        let report = f.analyze();
        // (x-1)²(x-4): zeros at 1 and 4, critical points at 1 and 3.
        assert_eq!(report.rational_zeros, vec![1.0, 4.0]);
        assert_eq!(report.critical_points.len(), 2);
        assert_eq!(report.extrema.len(), 2);
        assert_eq!(report.extrema[0].kind, Extremum::Maximum);
        assert_eq!(report.extrema[1].kind, Extremum::Minimum);
        assert_eq!(report.inflection_points.len(), 1);
        assert!((report.inflection_points[0].x - 2.0).abs() < 1e-9);
        assert_eq!(report.function, "x^3 - 6x^2 + 9x - 4");
        assert_eq!(report.first_derivative, "3x^2 - 12x + 9");
        assert_eq!(report.second_derivative, "6x - 12");
    }
}
