//! RAW image decoding module
//!
//! This module turns a RAW file into an RGB pixel grid plus its exposure tags.

mod reader;
mod rawloader_reader;
pub mod types;

pub use reader::{DecodedImage, ImageReader};
pub use rawloader_reader::RawLoaderReader;
pub use types::{PixelGrid, RgbImageData};
