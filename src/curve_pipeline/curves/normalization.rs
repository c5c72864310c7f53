use tracing::{instrument, warn};

use crate::curve_pipeline::curves::types::{CurveFamily, PeakBrightness, Point};

/// Maps a raw `(exposure / f-number, brightness)` point onto the log2 plane:
///
/// ```text
/// half = peak / 2
/// x'   = log2(x * half)
/// y'   = log2(y / half)
/// ```
///
/// A zero `peak` yields non-finite coordinates; they are passed through.
pub fn normalize_point(point: Point, peak: u64) -> Point {
    let half = peak as f64 / 2.0;
    Point {
        x: (point.x * half).log2(),
        y: (point.y / half).log2(),
    }
}

/// Normalizes every point of every group in place against its ISO's peak.
#[instrument(skip_all, fields(groups = family.len()))]
pub fn normalize(family: &mut CurveFamily, peaks: &PeakBrightness) {
    for group in family.groups_mut() {
        let peak = peaks.get(group.key.iso);
        if peak == 0 {
            warn!("{} has zero peak brightness, its points will not be finite", group.key);
        }
        for point in group.points.iter_mut() {
            *point = normalize_point(*point, peak);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_pipeline::curves::aggregate;
    use crate::curve_pipeline::curves::test_support::measurement;
    use crate::curve_pipeline::curves::types::GroupKey;

    #[test]
    fn test_reference_series() {
        let input = vec![
            measurement(100, "2.8", 2.8, 0.01, 1000),
            measurement(100, "2.8", 2.8, 0.02, 2000),
            measurement(100, "2.8", 2.8, 0.04, 4000),
        ];
        let (mut family, peaks) = aggregate(&input);
        assert_eq!(peaks.get(100), 4000);

        normalize(&mut family, &peaks);

        let points = &family.get(&GroupKey::new(100, "2.8")).unwrap().points;
        assert!((points[0].x - (0.01 / 2.8 * 2000.0f64).log2()).abs() < 1e-12);
        assert!((points[0].x - 2.836).abs() < 1e-3);
        assert_eq!(points[0].y, -1.0);
        assert_eq!(points[1].y, 0.0);
        assert_eq!(points[2].y, 1.0);
        // one stop more exposure moves x by exactly 1
        assert!((points[1].x - points[0].x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_point_depends_only_on_inputs() {
        let p = Point::new(0.5, 300.0);
        assert_eq!(normalize_point(p, 600), normalize_point(p, 600));
        assert_eq!(normalize_point(p, 600), Point::new((150.0f64).log2(), 0.0));
    }

    #[test]
    fn test_zero_peak_is_not_finite() {
        let p = normalize_point(Point::new(0.01, 0.0), 0);
        // log2(0.01 * 0) = -inf, log2(0 / 0) = NaN
        assert_eq!(p.x, f64::NEG_INFINITY);
        assert!(p.y.is_nan());

        let q = normalize_point(Point::new(0.01, 5.0), 0);
        assert_eq!(q.y, f64::INFINITY);
    }

    #[test]
    fn test_each_iso_uses_its_own_peak() {
        let input = vec![
            measurement(100, "4", 4.0, 0.01, 100),
            measurement(800, "4", 4.0, 0.01, 100),
            measurement(800, "4", 4.0, 0.02, 400),
        ];
        let (mut family, peaks) = aggregate(&input);
        normalize(&mut family, &peaks);

        let iso100 = &family.get(&GroupKey::new(100, "4")).unwrap().points;
        let iso800 = &family.get(&GroupKey::new(800, "4")).unwrap().points;
        assert_eq!(iso100[0].y, 1.0);
        assert_eq!(iso800[0].y, -1.0);
    }
}
