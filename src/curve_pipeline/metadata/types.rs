//! Exposure metadata types

use crate::curve_pipeline::metadata::format::format_significant;

/// Significant digits kept in an aperture label.
pub const APERTURE_LABEL_DIGITS: usize = 2;

/// An unsigned rational tag value as stored in the metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RationalTag {
    pub num: u32,
    pub denom: u32,
}

impl RationalTag {
    pub fn new(num: u32, denom: u32) -> Self {
        Self { num, denom }
    }

    /// Floating point value. A zero denominator yields a non-finite or NaN value,
    /// which measurement validation rejects.
    pub fn value(&self) -> f64 {
        self.num as f64 / self.denom as f64
    }

    /// Textual form as written in the file, e.g. `1/100`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.num, self.denom)
    }

    /// Short decimal form used to name aperture groups, e.g. `28/10` -> `2.8`.
    pub fn significant_label(&self) -> String {
        format_significant(self.value(), APERTURE_LABEL_DIGITS)
    }
}

/// Exposure related tags read from one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureTags {
    /// Sensitivity rating
    pub iso: Option<i32>,
    /// F-number
    pub f_number: Option<RationalTag>,
    /// Shutter time in seconds
    pub exposure_time: Option<RationalTag>,
    /// Camera model string
    pub camera_model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rational_value_and_labels() {
        let f = RationalTag::new(28, 10);
        assert!((f.value() - 2.8).abs() < 1e-12);
        assert_eq!(f.label(), "28/10");
        assert_eq!(f.significant_label(), "2.8");

        let t = RationalTag::new(1, 100);
        assert_eq!(t.label(), "1/100");
        assert!((t.value() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_zero_denominator_is_not_finite() {
        assert!(!RationalTag::new(1, 0).value().is_finite());
        assert!(RationalTag::new(0, 0).value().is_nan());
    }
}
