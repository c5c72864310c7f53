//! Metadata reader backed by kamadak-exif.
//!
//! Works on any TIFF based container (CR2, NEF, ARW, DNG) as well as JPEG,
//! since the EXIF block lives in a TIFF IFD chain in all of them.

use std::io::Cursor;
use std::path::Path;

use exif::{Exif, In, Tag, Value};
use tracing::debug;

use crate::curve_pipeline::common::error::{CurveError, Result};
use crate::curve_pipeline::metadata::reader::MetadataReader;
use crate::curve_pipeline::metadata::types::{ExposureTags, RationalTag};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExifMetadataReader;

impl ExifMetadataReader {
    pub fn new() -> Self {
        Self
    }

    fn rational(exif: &Exif, tag: Tag) -> Option<RationalTag> {
        let field = exif.get_field(tag, In::PRIMARY)?;
        match field.value {
            Value::Rational(ref values) => values.first().map(|r| RationalTag::new(r.num, r.denom)),
            _ => None,
        }
    }

    fn ascii(exif: &Exif, tag: Tag) -> Option<String> {
        let field = exif.get_field(tag, In::PRIMARY)?;
        match field.value {
            Value::Ascii(ref values) => values.first().map(|bytes| {
                String::from_utf8_lossy(bytes)
                    .trim_end_matches('\0')
                    .trim()
                    .to_string()
            }),
            _ => None,
        }
    }
}

impl MetadataReader for ExifMetadataReader {
    fn read_tags(&self, path: &Path, data: &[u8]) -> Result<ExposureTags> {
        let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
            Ok(exif) => exif,
            Err(exif::Error::NotFound(_)) => {
                debug!("No EXIF block in {}", path.display());
                return Ok(ExposureTags::default());
            }
            Err(e) => return Err(CurveError::unreadable(path, format!("EXIF: {}", e))),
        };

        let iso = exif
            .get_field(Tag::PhotographicSensitivity, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(|v| v as i32);

        let tags = ExposureTags {
            iso,
            f_number: Self::rational(&exif, Tag::FNumber),
            exposure_time: Self::rational(&exif, Tag::ExposureTime),
            camera_model: Self::ascii(&exif, Tag::Model),
        };
        debug!("EXIF tags for {}: {:?}", path.display(), tags);
        Ok(tags)
    }
}
