use std::path::Path;

use crate::curve_pipeline::common::error::Result;
use crate::curve_pipeline::metadata::types::ExposureTags;
use crate::curve_pipeline::raw::types::RgbImageData;

/// Everything the decode boundary hands downstream for one file.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: RgbImageData,
    pub tags: ExposureTags,
}

pub trait ImageReader: Send + Sync {
    fn read_image(&self, path: &Path) -> Result<DecodedImage>;
}
