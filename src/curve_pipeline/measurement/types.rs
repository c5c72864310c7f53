//! Per-image measurement record

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::curve_pipeline::brightness::estimate_brightness;
use crate::curve_pipeline::common::error::{CurveError, Result};
use crate::curve_pipeline::metadata::types::RationalTag;
use crate::curve_pipeline::raw::DecodedImage;

pub const ISO_TAG: &str = "ISO";
pub const APERTURE_TAG: &str = "FNumber";
pub const EXPOSURE_TAG: &str = "ExposureTime";

/// Facts extracted from one image.
///
/// Serialized with PascalCase field names (`FileName`, `ExposureF64`, `Iris`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(rename = "FileName")]
    pub file_name: String,
    /// Sum over all pixels of the mean RGB value, see [`estimate_brightness`]
    #[serde(rename = "Brightness")]
    pub brightness: u64,
    #[serde(rename = "XResolution")]
    pub x_resolution: u64,
    #[serde(rename = "YResolution")]
    pub y_resolution: u64,
    /// Exposure time as written in the file, e.g. `1/100`
    #[serde(rename = "Exposure", default)]
    pub exposure_label: String,
    #[serde(rename = "ExposureF64")]
    pub exposure_seconds: f64,
    /// F-number rounded to two significant digits; curves are grouped by this string
    #[serde(rename = "Iris")]
    pub aperture_label: String,
    #[serde(rename = "IrisF64")]
    pub aperture_value: f64,
    #[serde(rename = "ISO")]
    pub iso: i32,
    #[serde(rename = "CameraModel", default)]
    pub camera_model: String,
}

impl Measurement {
    /// Builds a validated measurement from explicit exposure parameters.
    pub fn new(
        file_name: impl Into<String>,
        brightness: u64,
        resolution: (u64, u64),
        exposure_time: RationalTag,
        f_number: RationalTag,
        iso: i32,
        camera_model: impl Into<String>,
    ) -> Result<Self> {
        let measurement = Self {
            file_name: file_name.into(),
            brightness,
            x_resolution: resolution.0,
            y_resolution: resolution.1,
            exposure_label: exposure_time.label(),
            exposure_seconds: exposure_time.value(),
            aperture_label: f_number.significant_label(),
            aperture_value: f_number.value(),
            iso,
            camera_model: camera_model.into(),
        };
        measurement.validate()?;
        Ok(measurement)
    }

    /// Builds a measurement from a decoded image. Tags are checked in the order
    /// ISO, f-number, exposure time; the first missing one is reported.
    pub fn from_decoded(file_name: impl Into<String>, image: &DecodedImage) -> Result<Self> {
        let file_name = file_name.into();
        let missing = |tag: &'static str| CurveError::MetadataMissing {
            file: file_name.clone(),
            tag,
        };

        let tags = &image.tags;
        let iso = tags.iso.ok_or_else(|| missing(ISO_TAG))?;
        let f_number = tags.f_number.ok_or_else(|| missing(APERTURE_TAG))?;
        let exposure_time = tags.exposure_time.ok_or_else(|| missing(EXPOSURE_TAG))?;

        let brightness = estimate_brightness(&image.pixels);

        Self::new(
            file_name.clone(),
            brightness,
            (image.pixels.width as u64, image.pixels.height as u64),
            exposure_time,
            f_number,
            iso,
            tags.camera_model.clone().unwrap_or_default(),
        )
    }

    /// A measurement is usable only with a positive exposure, a positive
    /// f-number and a non-zero ISO.
    pub fn validate(&self) -> Result<()> {
        let missing = |tag: &'static str| CurveError::MetadataMissing {
            file: self.file_name.clone(),
            tag,
        };

        if self.iso == 0 {
            return Err(missing(ISO_TAG));
        }
        if !(self.aperture_value.is_finite() && self.aperture_value > 0.0) {
            return Err(missing(APERTURE_TAG));
        }
        if !(self.exposure_seconds.is_finite() && self.exposure_seconds > 0.0) {
            return Err(missing(EXPOSURE_TAG));
        }
        Ok(())
    }

    /// Exposure time divided by f-number; the curve's x coordinate before normalization.
    pub fn relative_exposure(&self) -> f64 {
        self.exposure_seconds / self.aperture_value
    }

    pub fn megapixels(&self) -> f64 {
        1e-6 * self.x_resolution as f64 * self.y_resolution as f64
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Exposure: {}({}) ISO: {} Iris: {}/{} {}x{} {:.3} Megapixel Brightness: {}",
            self.file_name,
            self.exposure_label,
            self.exposure_seconds,
            self.iso,
            self.aperture_value,
            self.aperture_label,
            self.x_resolution,
            self.y_resolution,
            self.megapixels(),
            self.brightness,
        )
    }
}
