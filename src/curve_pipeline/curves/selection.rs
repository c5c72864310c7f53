use tracing::{debug, instrument};

use crate::curve_pipeline::curves::types::{CurveFamily, PlotSeries};

/// Curves with fewer points are left out of the plot.
pub const MIN_CURVE_POINTS: usize = 3;

/// Labels every group with at least [`MIN_CURVE_POINTS`] points as
/// `"ISO: <iso> Iris: <aperture>"`, in family order. Points are passed
/// through untouched, non-finite ones included.
#[instrument(skip_all, fields(groups = family.len()))]
pub fn select_series(family: &CurveFamily) -> Vec<PlotSeries> {
    family
        .groups()
        .iter()
        .filter(|group| {
            let keep = group.points.len() >= MIN_CURVE_POINTS;
            if !keep {
                debug!("Skipping {}: {} point(s)", group.key, group.points.len());
            }
            keep
        })
        .map(|group| PlotSeries {
            label: group.key.to_string(),
            points: group.points.clone(),
        })
        .collect()
}
