use tracing::{debug, instrument};

use crate::curve_pipeline::curves::types::{CurveFamily, GroupKey, PeakBrightness, Point};
use crate::curve_pipeline::measurement::Measurement;

/// Groups measurements into curves keyed by (ISO, aperture label) and records
/// the peak brightness of every ISO in the same pass.
///
/// Each measurement contributes `x = exposure / f-number`, `y = brightness`.
/// Points keep input order.
#[instrument(skip_all, fields(measurements = measurements.len()))]
pub fn aggregate(measurements: &[Measurement]) -> (CurveFamily, PeakBrightness) {
    let mut family = CurveFamily::new();
    let mut peaks = PeakBrightness::new();

    for m in measurements {
        peaks.observe(m.iso, m.brightness);
        family.push(
            GroupKey::new(m.iso, m.aperture_label.as_str()),
            Point::new(m.relative_exposure(), m.brightness as f64),
        );
    }

    debug!(groups = family.len(), isos = peaks.len(), "Aggregated curves");
    (family, peaks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve_pipeline::curves::test_support::measurement;

    #[test]
    fn test_groups_by_iso_and_label() {
        let input = vec![
            measurement(100, "2.8", 2.8, 0.01, 1000),
            measurement(200, "2.8", 2.8, 0.01, 1500),
            measurement(100, "2.8", 2.8, 0.02, 2000),
            measurement(100, "4", 4.0, 0.02, 900),
        ];

        let (family, peaks) = aggregate(&input);

        assert_eq!(family.len(), 3);
        let group = family.get(&GroupKey::new(100, "2.8")).unwrap();
        assert_eq!(group.points.len(), 2);
        assert!((group.points[0].x - 0.01 / 2.8).abs() < 1e-15);
        assert_eq!(group.points[0].y, 1000.0);
        assert_eq!(group.points[1].y, 2000.0);

        assert_eq!(peaks.get(100), 2000);
        assert_eq!(peaks.get(200), 1500);
    }

    #[test]
    fn test_same_float_different_label_never_merge() {
        let input = vec![
            measurement(100, "2.8", 2.8, 0.01, 10),
            measurement(100, "2.80", 2.8, 0.01, 20),
        ];

        let (family, _) = aggregate(&input);

        assert_eq!(family.len(), 2);
    }

    #[test]
    fn test_grouping_ignores_input_order() {
        let a = measurement(100, "5.6", 5.6, 0.01, 10);
        let b = measurement(400, "8", 8.0, 0.01, 20);
        let c = measurement(100, "5.6", 5.6, 0.04, 30);

        let (forward, _) = aggregate(&[a.clone(), b.clone(), c.clone()]);
        let (reverse, _) = aggregate(&[c, b, a]);

        let key = GroupKey::new(100, "5.6");
        let mut fwd: Vec<f64> = forward.get(&key).unwrap().points.iter().map(|p| p.y).collect();
        let mut rev: Vec<f64> = reverse.get(&key).unwrap().points.iter().map(|p| p.y).collect();
        fwd.sort_by(f64::total_cmp);
        rev.sort_by(f64::total_cmp);
        assert_eq!(fwd, rev);
    }

    #[test]
    fn test_x_is_positive() {
        let input = vec![
            measurement(100, "1.4", 1.4, 1.0 / 8000.0, 1),
            measurement(100, "22", 22.0, 30.0, 1),
        ];
        let (family, _) = aggregate(&input);
        assert!(family.groups().iter().flat_map(|g| &g.points).all(|p| p.x > 0.0));
    }

    #[test]
    fn test_empty_input() {
        let (family, peaks) = aggregate(&[]);
        assert!(family.is_empty());
        assert!(peaks.is_empty());
    }
}
