//! Exposure metadata module
//!
//! Reads the tags a measurement needs (sensitivity, f-number, exposure time)
//! from an image's embedded metadata block. The reader is an explicit
//! capability handed to the decode boundary.

mod reader;
mod exif_reader;
pub mod format;
pub mod types;

pub use reader::MetadataReader;
pub use exif_reader::ExifMetadataReader;
pub use types::{ExposureTags, RationalTag};
