use crate::expression::Function;
use serde::{Deserialize, Serialize};

/// Drawable primitives handed to the rendering adapter. The adapter owns
/// pixels; this layer owns only coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Polyline { points: Vec<(f64, f64)> },
    Points { points: Vec<(f64, f64)> },
    Segment {
        from: (f64, f64),
        to: (f64, f64),
        dashed: bool,
    },
}

/// Samples f across [x_min, x_max] into polylines for plotting.
///
/// A non-finite sample, or one outside ±y_clip, ends the current polyline;
/// the curve resumes at the next good sample. Discontinuities skip the
/// point, not the whole curve.
pub fn sample_function(
    f: &Function,
    x_min: f64,
    x_max: f64,
    step: f64,
    y_clip: f64,
) -> Vec<Primitive> {
    let mut primitives = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    let mut x = x_min;
    while x <= x_max {
        let y = f.eval(x);
        if y.is_finite() && y.abs() <= y_clip {
            current.push((x, y));
        } else if current.len() > 1 {
            primitives.push(Primitive::Polyline {
                points: std::mem::take(&mut current),
            });
        } else {
            current.clear();
        }
        x += step;
    }
    if current.len() > 1 {
        primitives.push(Primitive::Polyline { points: current });
    }
    primitives
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuous_function_is_one_polyline() {
        let f = Function::parse("x^2").unwrap();
        let prims = sample_function(&f, -2.0, 2.0, 0.1, 100.0);
        assert_eq!(prims.len(), 1);
        match &prims[0] {
            Primitive::Polyline { points } => {
                assert!(points.len() > 30);
                assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
            }
            other => panic!("expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn domain_gap_splits_the_curve() {
        // ln x is NaN for x <= 0: everything left of zero is skipped.
        let f = Function::parse("ln(x)").unwrap();
        let prims = sample_function(&f, -1.0, 2.0, 0.05, 100.0);
        assert_eq!(prims.len(), 1);
        match &prims[0] {
            Primitive::Polyline { points } => {
                assert!(points.iter().all(|&(x, _)| x > 0.0));
            }
            other => panic!("expected polyline, got {:?}", other),
        }
    }

    #[test]
    fn clipped_samples_break_the_polyline() {
        // 1/x blows past the clip near zero from both sides.
        let f = Function::parse("1/x").unwrap();
        let prims = sample_function(&f, -2.0, 2.0, 0.01, 10.0);
        assert_eq!(prims.len(), 2);
    }
}
