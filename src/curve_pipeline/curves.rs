//! Characteristic curve construction
//!
//! Measurements are grouped by (ISO, aperture label), normalized against the
//! per-ISO peak brightness onto a log2 scale, and the groups with enough
//! samples are labeled for plotting.

mod aggregation;
mod normalization;
mod selection;
pub mod types;

pub use aggregation::aggregate;
pub use normalization::{normalize, normalize_point};
pub use selection::{MIN_CURVE_POINTS, select_series};
pub use types::{CurveFamily, CurveGroup, GroupKey, PeakBrightness, PlotSeries, Point};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::curve_pipeline::measurement::Measurement;

    pub(crate) fn measurement(
        iso: i32,
        aperture_label: &str,
        aperture_value: f64,
        exposure_seconds: f64,
        brightness: u64,
    ) -> Measurement {
        Measurement {
            file_name: format!("ISO{}_F{}_{}.CR2", iso, aperture_label, exposure_seconds),
            brightness,
            x_resolution: 6000,
            y_resolution: 4000,
            exposure_label: exposure_seconds.to_string(),
            exposure_seconds,
            aperture_label: aperture_label.to_string(),
            aperture_value,
            iso,
            camera_model: String::new(),
        }
    }
}
