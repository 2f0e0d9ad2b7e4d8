use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// All four Riemann approximations over the series' full x-range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiemannSums {
    pub left: f64,
    pub right: f64,
    pub midpoint: f64,
    pub trapezoidal: f64,
    pub delta_x: f64,
    pub n: usize,
}

/// Tabulated (x, y) samples kept sorted ascending by x.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    points: Vec<(f64, f64)>,
}

impl DataSeries {
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let mut points: Vec<(f64, f64)> = points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        points.sort_by(|p, q| p.0.partial_cmp(&q.0).unwrap());
        Self { points }
    }

    /// Parses the widget's data table: one `x y` pair per line, whitespace
    /// separated. Malformed lines are skipped, not errors.
    pub fn parse_table(text: &str) -> Self {
        let mut points = Vec::new();
        for line in text.lines() {
            let mut fields = line.split_whitespace();
            let (Some(xs), Some(ys)) = (fields.next(), fields.next()) else {
                continue;
            };
            let (Ok(x), Ok(y)) = (xs.parse::<f64>(), ys.parse::<f64>()) else {
                continue;
            };
            points.push((x, y));
        }
        Self::from_points(&points)
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Piecewise-linear interpolation; x outside the table holds the nearest
    /// endpoint value.
    pub fn interpolate(&self, x: f64) -> f64 {
        match self.points.as_slice() {
            [] => f64::NAN,
            [(_, y)] => *y,
            points => {
                if x <= points[0].0 {
                    return points[0].1;
                }
                if x >= points[points.len() - 1].0 {
                    return points[points.len() - 1].1;
                }
                for pair in points.windows(2) {
                    let (x0, y0) = pair[0];
                    let (x1, y1) = pair[1];
                    if x <= x1 {
                        if x1 == x0 {
                            return y1;
                        }
                        let t = (x - x0) / (x1 - x0);
                        return y0 + t * (y1 - y0);
                    }
                }
                points[points.len() - 1].1
            }
        }
    }

    /// Left, right, midpoint, and trapezoidal sums with n equal subintervals
    /// over [x_min, x_max], sampling the interpolated curve.
    pub fn riemann_sums(&self, n: usize) -> Result<RiemannSums> {
        if self.points.len() < 2 || n < 1 {
            bail!("insufficient data: need at least 2 points and 1 subinterval");
        }

        let a = self.points[0].0;
        let b = self.points[self.points.len() - 1].0;
        let delta_x = (b - a) / n as f64;

        let mut left = 0.0;
        let mut right = 0.0;
        let mut midpoint = 0.0;
        for i in 0..n {
            let x_left = a + i as f64 * delta_x;
            left += self.interpolate(x_left);
            right += self.interpolate(x_left + delta_x);
            midpoint += self.interpolate(x_left + delta_x / 2.0);
        }
        left *= delta_x;
        right *= delta_x;
        midpoint *= delta_x;

        Ok(RiemannSums {
            left,
            right,
            midpoint,
            trapezoidal: (left + right) / 2.0,
            delta_x,
            n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares() -> DataSeries {
        DataSeries::from_points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 4.0), (3.0, 9.0)])
    }

    #[test]
    fn trapezoidal_sum_of_squares_table() {
        let sums = squares().riemann_sums(3).unwrap();
        assert!((sums.left - 5.0).abs() < 1e-12);
        assert!((sums.right - 14.0).abs() < 1e-12);
        assert!((sums.trapezoidal - 9.5).abs() < 1e-12);
        assert!((sums.delta_x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn trapezoidal_is_mean_of_left_and_right() {
        let series = DataSeries::from_points(&[(0.0, 2.0), (1.5, -1.0), (4.0, 3.0), (5.0, 0.5)]);
        for n in [1, 2, 3, 7, 20] {
            let sums = series.riemann_sums(n).unwrap();
            assert!(
                (sums.trapezoidal - (sums.left + sums.right) / 2.0).abs() < 1e-9,
                "n = {n}"
            );
        }
    }

    #[test]
    fn insufficient_data_is_an_error() {
        let one = DataSeries::from_points(&[(0.0, 1.0)]);
        assert!(one.riemann_sums(4).is_err());
        assert!(squares().riemann_sums(0).is_err());
    }

    #[test]
    fn parse_table_skips_malformed_lines_and_sorts() {
        let series = DataSeries::parse_table("2 4\nbogus\n0 0\n1\n1 1\n3 nine\n");
        assert_eq!(series.points(), &[(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
    }

    #[test]
    fn interpolation_holds_endpoints() {
        let series = squares();
        assert_eq!(series.interpolate(-5.0), 0.0);
        assert_eq!(series.interpolate(10.0), 9.0);
        assert!((series.interpolate(1.5) - 2.5).abs() < 1e-12);
    }
}
