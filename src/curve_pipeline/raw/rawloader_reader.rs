//! RAW image reader implementation using the rawloader library.
//!
//! rawloader handles the container and sensor data of CR2, NEF, ARW, DNG and
//! friends. Samples are cropped to the active area and shifted down by the
//! black level, then Bayer data is demosaiced with the `bayer` crate so the
//! result is a plain RGB grid. Exposure tags come from the injected
//! [`MetadataReader`].

use std::io::Cursor;
use std::path::Path;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use rawloader::RawImageData as RawloaderImageData;
use tracing::debug;

use crate::curve_pipeline::common::error::{CurveError, Result};
use crate::curve_pipeline::metadata::{ExifMetadataReader, MetadataReader};
use crate::curve_pipeline::raw::reader::{DecodedImage, ImageReader};
use crate::curve_pipeline::raw::types::RgbImageData;

/// Black level, white level and active area of one decoded frame
#[derive(Debug, Clone, Copy)]
struct SensorLevels {
    width: usize,
    height: usize,
    cpp: usize,
    /// Masked border to drop: top, right, bottom, left
    crops: [usize; 4],
    /// Per colour index (R, G, B, E) for CFA data, per channel otherwise
    blacklevels: [u16; 4],
    whitelevels: [u16; 4],
}

impl SensorLevels {
    fn of(decoded: &rawloader::RawImage) -> Self {
        Self {
            width: decoded.width,
            height: decoded.height,
            cpp: decoded.cpp,
            crops: decoded.crops,
            blacklevels: decoded.blacklevels,
            whitelevels: decoded.whitelevels,
        }
    }

    /// `(width, height)` left after cropping, `None` when nothing is left.
    fn active_area(&self) -> Option<(usize, usize)> {
        let [top, right, bottom, left] = self.crops;
        let width = self.width.checked_sub(left + right).filter(|&w| w > 0)?;
        let height = self.height.checked_sub(top + bottom).filter(|&h| h > 0)?;
        Some((width, height))
    }

    /// Crops `samples` to the active area and maps every value to
    /// `min(v, white) - black`, saturating at 0. `color_at(row, col)` gives the
    /// CFA colour of a sample in uncropped coordinates.
    fn level_and_crop(
        &self,
        samples: &[u16],
        color_at: impl Fn(usize, usize) -> usize,
    ) -> std::result::Result<(Vec<u16>, usize, usize), String> {
        let (width, height) = self.active_area().ok_or_else(|| {
            format!(
                "crops {:?} leave nothing of {}x{}",
                self.crops, self.width, self.height
            )
        })?;
        let expected = self.width * self.height * self.cpp;
        if samples.len() != expected {
            return Err(format!("expected {} samples, got {}", expected, samples.len()));
        }

        let [top, _, _, left] = self.crops;
        let mut out = Vec::with_capacity(width * height * self.cpp);
        for row in top..top + height {
            for col in left..left + width {
                let base = (row * self.width + col) * self.cpp;
                for ch in 0..self.cpp {
                    let color = (if self.cpp == 1 { color_at(row, col) } else { ch }).min(3);
                    let v = samples[base + ch].min(self.whitelevels[color]);
                    out.push(v.saturating_sub(self.blacklevels[color]));
                }
            }
        }
        Ok((out, width, height))
    }
}

/// RAW image reader that uses rawloader for pixels and `M` for metadata.
pub struct RawLoaderReader<M: MetadataReader = ExifMetadataReader> {
    metadata: M,
}

impl RawLoaderReader<ExifMetadataReader> {
    pub fn new() -> Self {
        Self::with_metadata(ExifMetadataReader)
    }
}

impl Default for RawLoaderReader<ExifMetadataReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MetadataReader> RawLoaderReader<M> {
    pub fn with_metadata(metadata: M) -> Self {
        Self { metadata }
    }

    /// Decodes RAW bytes into an RGB grid.
    pub fn decode(&self, path: &Path, data: &[u8]) -> Result<RgbImageData> {
        debug!("Decoding RAW image {}, {} bytes", path.display(), data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| CurveError::unreadable(path, e))?;

        let mut levels = SensorLevels::of(&decoded);
        let pattern_name = (decoded.cpp == 1).then(|| {
            let cfa = decoded.cropped_cfa();
            Self::cfa_name(|row, col| cfa.color_at(row, col))
        });
        let samples: Vec<u16> = match decoded.data {
            RawloaderImageData::Integer(values) => values,
            // Float data is normalized to 0.0-1.0 with the black level removed
            RawloaderImageData::Float(values) => {
                levels.blacklevels = [0; 4];
                levels.whitelevels = [u16::MAX; 4];
                values.iter().map(|&v| (v * u16::MAX as f32) as u16).collect()
            }
        };

        let (leveled, width, height) = levels
            .level_and_crop(&samples, |row, col| decoded.cfa.color_at(row, col))
            .map_err(|e| CurveError::unreadable(path, e))?;

        debug!(
            "Decoded {}x{} active area of {}x{}, {} component(s), CFA {}, black {:?}, white {:?}",
            width,
            height,
            decoded.width,
            decoded.height,
            decoded.cpp,
            decoded.cfa.name,
            decoded.blacklevels,
            decoded.whitelevels
        );

        let data = match decoded.cpp {
            1 => {
                let pattern = pattern_name.as_deref().and_then(Self::bayer_pattern);
                let pattern = pattern.ok_or_else(|| {
                    CurveError::UnsupportedFormat(format!(
                        "{}: CFA pattern {}",
                        path.display(),
                        decoded.cfa.name
                    ))
                })?;
                Self::demosaic(&leveled, width, height, pattern)
                    .map_err(|e| CurveError::unreadable(path, e))?
            }
            3 => leveled,
            cpp => {
                return Err(CurveError::UnsupportedFormat(format!(
                    "{}: {} components per pixel",
                    path.display(),
                    cpp
                )));
            }
        };

        Ok(RgbImageData {
            width,
            height,
            data,
        })
    }

    /// Name of the 2x2 pattern at the top left corner, e.g. `RGGB`.
    fn cfa_name(color_at: impl Fn(usize, usize) -> usize) -> String {
        [(0, 0), (0, 1), (1, 0), (1, 1)]
            .iter()
            .map(|&(row, col)| match color_at(row, col) {
                0 => 'R',
                1 => 'G',
                2 => 'B',
                _ => '?',
            })
            .collect()
    }

    fn bayer_pattern(name: &str) -> Option<CFA> {
        match name {
            "RGGB" => Some(CFA::RGGB),
            "BGGR" => Some(CFA::BGGR),
            "GRBG" => Some(CFA::GRBG),
            "GBRG" => Some(CFA::GBRG),
            _ => None,
        }
    }

    fn demosaic(samples: &[u16], width: usize, height: usize, cfa: CFA) -> std::result::Result<Vec<u16>, String> {
        let bayer_bytes: Vec<u8> = samples.iter().flat_map(|&v| v.to_le_bytes()).collect();
        let mut output_buf = vec![0u8; width * height * 3 * 2];
        let mut cursor = Cursor::new(&bayer_bytes[..]);

        {
            let mut raster = RasterMut::new(width, height, RasterDepth::Depth16, &mut output_buf);
            bayer::run_demosaic(
                &mut cursor,
                BayerDepth::Depth16LE,
                cfa,
                Demosaic::Linear,
                &mut raster,
            )
            .map_err(|e| format!("demosaic failed: {:?}", e))?;
        }

        Ok(output_buf
            .chunks_exact(2)
            .map(|b| u16::from_le_bytes([b[0], b[1]]))
            .collect())
    }
}

impl<M: MetadataReader> ImageReader for RawLoaderReader<M> {
    fn read_image(&self, path: &Path) -> Result<DecodedImage> {
        let data = std::fs::read(path).map_err(|e| CurveError::unreadable(path, e))?;

        let pixels = self.decode(path, &data)?;
        let tags = self.metadata.read_tags(path, &data)?;

        Ok(DecodedImage { pixels, tags })
    }
}
