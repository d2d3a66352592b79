//! Closest approach of two infinite lines in 3D.

use nalgebra::Point3;

/// Determinants at or below this magnitude are treated as parallel lines.
pub const PARALLEL_EPSILON: f64 = 1e-7;

/// Find where two infinite lines come closest.
///
/// Line 1 runs through `p0` and `p1`, line 2 through `q0` and `q1`. Returns
/// `(r0, r1)` such that `p0 + r0 * (p1 - p0)` is the point on line 1 closest to
/// line 2 and `q0 + r1 * (q1 - q0)` is the point on line 2 closest to line 1.
///
/// Returns `None` when the lines are parallel or nearly so, in which case no
/// unique closest pair exists.
///
/// # Example
///
/// ```
/// use highpole::algo::highpole::closest_line_params;
/// use nalgebra::Point3;
///
/// // The two diagonals of the unit square cross at their midpoints.
/// let (r0, r1) = closest_line_params(
///     &Point3::new(0.0, 0.0, 0.0),
///     &Point3::new(1.0, 1.0, 0.0),
///     &Point3::new(1.0, 0.0, 0.0),
///     &Point3::new(0.0, 1.0, 0.0),
/// )
/// .unwrap();
/// assert!((r0 - 0.5).abs() < 1e-12);
/// assert!((r1 - 0.5).abs() < 1e-12);
/// ```
pub fn closest_line_params(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    q0: &Point3<f64>,
    q1: &Point3<f64>,
) -> Option<(f64, f64)> {
    let u = p1 - p0;
    let v = q1 - q0;
    let w = p0 - q0;

    let uu = u.dot(&u);
    let vv = v.dot(&v);
    let uv = u.dot(&v);
    let uw = u.dot(&w);
    let vw = v.dot(&w);

    let denom = uu * vv - uv * uv;
    if denom.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let r0 = (uv * vw - vv * uw) / denom;
    let r1 = (uu * vw - uv * uw) / denom;
    Some((r0, r1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_crossing_lines() {
        let (r0, r1) = closest_line_params(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(4.0, 0.0, 0.0),
            &Point3::new(1.0, -1.0, 0.0),
            &Point3::new(1.0, 1.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(r0, 0.25, epsilon = 1e-12);
        assert_relative_eq!(r1, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_skew_lines() {
        // x-axis and a line parallel to y at height z = 1 through x = 3.
        let (r0, r1) = closest_line_params(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(2.0, 0.0, 0.0),
            &Point3::new(3.0, -2.0, 1.0),
            &Point3::new(3.0, 2.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(r0, 1.5, epsilon = 1e-12);
        assert_relative_eq!(r1, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_closest_points_are_mutually_perpendicular() {
        let p0 = Point3::new(0.1, 0.2, 0.3);
        let p1 = Point3::new(1.0, -0.5, 2.0);
        let q0 = Point3::new(-1.0, 1.0, 0.0);
        let q1 = Point3::new(0.5, 0.7, -1.2);

        let (r0, r1) = closest_line_params(&p0, &p1, &q0, &q1).unwrap();
        let a = p0 + (p1 - p0) * r0;
        let b = q0 + (q1 - q0) * r1;
        let d = b - a;
        assert_relative_eq!(d.dot(&(p1 - p0)), 0.0, epsilon = 1e-10);
        assert_relative_eq!(d.dot(&(q1 - q0)), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_parallel_lines_are_degenerate() {
        let result = closest_line_params(
            &Point3::new(0.0, 0.0, 0.0),
            &Point3::new(1.0, 0.0, 0.0),
            &Point3::new(0.0, 1.0, 0.0),
            &Point3::new(3.0, 1.0, 0.0),
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_zero_length_segment_is_degenerate() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let result = closest_line_params(&p, &p, &Point3::origin(), &Point3::new(0.0, 1.0, 0.0));
        assert_eq!(result, None);
    }
}
