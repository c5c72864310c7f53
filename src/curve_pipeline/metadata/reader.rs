use std::path::Path;

use crate::curve_pipeline::common::error::Result;
use crate::curve_pipeline::metadata::types::ExposureTags;

pub trait MetadataReader: Send + Sync {
    /// Extracts exposure tags from the raw bytes of the file at `path`.
    /// Absent tags are reported as `None`; only an unparseable block is an error.
    fn read_tags(&self, path: &Path, data: &[u8]) -> Result<ExposureTags>;
}
