//! Decoded image types

/// Read access to a rectangular RGB pixel grid.
pub trait PixelGrid {
    /// `(width, height)` in pixels
    fn dimensions(&self) -> (usize, usize);

    /// Red, green and blue intensities of the pixel at `(x, y)`.
    fn rgb_at(&self, x: usize, y: usize) -> [u32; 3];
}

/// RGB image data after decoding and demosaicing
#[derive(Debug, Clone)]
pub struct RgbImageData {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...], black level
    /// already subtracted
    pub data: Vec<u16>,
}

impl RgbImageData {
    /// Builds a grid where every pixel has the same color.
    pub fn filled(width: usize, height: usize, rgb: [u16; 3]) -> Self {
        let data = rgb.iter().copied().cycle().take(width * height * 3).collect();
        Self {
            width,
            height,
            data,
        }
    }
}

impl PixelGrid for RgbImageData {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn rgb_at(&self, x: usize, y: usize) -> [u32; 3] {
        let i = (y * self.width + x) * 3;
        [
            self.data[i] as u32,
            self.data[i + 1] as u32,
            self.data[i + 2] as u32,
        ]
    }
}
