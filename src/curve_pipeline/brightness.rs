//! Brightness estimation
//!
//! Reduces a pixel grid to one scalar: the sum over all pixels of the integer
//! mean of the red, green and blue channels. The total is not divided by the
//! pixel count and grows with image area; curves are normalized later against
//! the brightest image of the same ISO.

use tracing::instrument;

use crate::curve_pipeline::raw::types::PixelGrid;

#[instrument(skip_all)]
pub fn estimate_brightness<G: PixelGrid + ?Sized>(grid: &G) -> u64 {
    let (width, height) = grid.dimensions();
    let mut brightness = 0u64;
    for y in 0..height {
        for x in 0..width {
            let [r, g, b] = grid.rgb_at(x, y);
            brightness += (r as u64 + g as u64 + b as u64) / 3;
        }
    }
    brightness
}
