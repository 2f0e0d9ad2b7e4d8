use serde::Serialize;
use std::f64::consts::PI;

const SNAP_TOLERANCE: f64 = 0.01;

/// One of the special angles on the unit circle, with the exact-value
/// strings the reference table shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpecialAngle {
    pub radians: f64,
    pub degrees: f64,
    pub label: &'static str,
    pub sin_exact: &'static str,
    pub cos_exact: &'static str,
}

impl SpecialAngle {
    pub fn sin(&self) -> f64 {
        self.radians.sin()
    }

    pub fn cos(&self) -> f64 {
        self.radians.cos()
    }
}

/// The sixteen labelled angles from 0 to 2π, ascending. 0 and 2π coincide on
/// the circle, so only 0 is listed.
pub const SPECIAL_ANGLES: [SpecialAngle; 16] = [
    special(0.0, 0.0, "0", "0", "1"),
    special(PI / 6.0, 30.0, "π/6", "1/2", "√3/2"),
    special(PI / 4.0, 45.0, "π/4", "√2/2", "√2/2"),
    special(PI / 3.0, 60.0, "π/3", "√3/2", "1/2"),
    special(PI / 2.0, 90.0, "π/2", "1", "0"),
    special(2.0 * PI / 3.0, 120.0, "2π/3", "√3/2", "-1/2"),
    special(3.0 * PI / 4.0, 135.0, "3π/4", "√2/2", "-√2/2"),
    special(5.0 * PI / 6.0, 150.0, "5π/6", "1/2", "-√3/2"),
    special(PI, 180.0, "π", "0", "-1"),
    special(7.0 * PI / 6.0, 210.0, "7π/6", "-1/2", "-√3/2"),
    special(5.0 * PI / 4.0, 225.0, "5π/4", "-√2/2", "-√2/2"),
    special(4.0 * PI / 3.0, 240.0, "4π/3", "-√3/2", "-1/2"),
    special(3.0 * PI / 2.0, 270.0, "3π/2", "-1", "0"),
    special(5.0 * PI / 3.0, 300.0, "5π/3", "-√3/2", "1/2"),
    special(7.0 * PI / 4.0, 315.0, "7π/4", "-√2/2", "√2/2"),
    special(11.0 * PI / 6.0, 330.0, "11π/6", "-1/2", "√3/2"),
];

const fn special(
    radians: f64,
    degrees: f64,
    label: &'static str,
    sin_exact: &'static str,
    cos_exact: &'static str,
) -> SpecialAngle {
    SpecialAngle {
        radians,
        degrees,
        label,
        sin_exact,
        cos_exact,
    }
}

/// Wraps any angle into [0, 2π).
pub fn normalize_angle(radians: f64) -> f64 {
    radians.rem_euclid(2.0 * PI)
}

/// The special angle matching `radians` (after normalization), if any.
pub fn exact_value(radians: f64) -> Option<SpecialAngle> {
    let normalized = normalize_angle(radians);
    SPECIAL_ANGLES
        .iter()
        .find(|angle| {
            (normalized - angle.radians).abs() < SNAP_TOLERANCE
                || (normalized - 2.0 * PI).abs() < SNAP_TOLERANCE && angle.radians == 0.0
        })
        .copied()
}

/// The special angle closest to `radians` on the circle, for the snap
/// control.
pub fn nearest_special_angle(radians: f64) -> SpecialAngle {
    let normalized = normalize_angle(radians);
    let mut best = SPECIAL_ANGLES[0];
    let mut best_dist = f64::INFINITY;
    for angle in SPECIAL_ANGLES {
        let direct = (normalized - angle.radians).abs();
        let wrapped = 2.0 * PI - direct;
        let dist = direct.min(wrapped);
        if dist < best_dist {
            best_dist = dist;
            best = angle;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_values_match_their_labels() {
        for angle in SPECIAL_ANGLES {
            assert!(
                (angle.radians.to_degrees() - angle.degrees).abs() < 1e-9,
                "{}",
                angle.label
            );
        }
        let sixth = exact_value(PI / 6.0).unwrap();
        assert_eq!(sixth.sin_exact, "1/2");
        assert!((sixth.sin() - 0.5).abs() < 1e-12);
        assert_eq!(sixth.cos_exact, "√3/2");
        assert!((sixth.cos() - 3.0f64.sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn lookup_normalizes_the_angle() {
        // 13π/6 wraps to π/6; -π/2 wraps to 3π/2.
        assert_eq!(exact_value(13.0 * PI / 6.0).unwrap().label, "π/6");
        assert_eq!(exact_value(-PI / 2.0).unwrap().label, "3π/2");
        assert_eq!(exact_value(2.0 * PI).unwrap().label, "0");
    }

    #[test]
    fn non_special_angles_have_no_exact_value() {
        assert!(exact_value(0.7).is_none());
        assert!(exact_value(1.0).is_none());
    }

    #[test]
    fn snap_picks_the_closest_angle_across_the_wrap() {
        assert_eq!(nearest_special_angle(0.5).label, "π/6");
        assert_eq!(nearest_special_angle(6.2).label, "0");
        assert_eq!(nearest_special_angle(PI + 0.05).label, "π");
    }
}
