//! Directory scan
//!
//! Finds the images of a directory and turns each into a [`Measurement`],
//! optionally on the rayon pool. Results are always handled in file name
//! order, so both paths fail on, or skip, the same images.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::curve_pipeline::common::error::{CurveError, Result};
use crate::curve_pipeline::config::{FailurePolicy, PipelineConfig};
use crate::curve_pipeline::measurement::Measurement;
use crate::curve_pipeline::raw::ImageReader;

#[instrument(skip(reader, config), fields(dir = %dir.display()))]
pub fn scan_directory<R: ImageReader + ?Sized>(
    reader: &R,
    dir: &Path,
    config: &PipelineConfig,
) -> Result<Vec<Measurement>> {
    let files = list_images(dir, config)?;
    info!(
        "Scanning {}: {} image(s), parallel={}",
        dir.display(),
        files.len(),
        config.parallel
    );

    let results: Vec<Result<Measurement>> = if config.parallel {
        files.par_iter().map(|path| read_measurement(reader, path)).collect()
    } else {
        files.iter().map(|path| read_measurement(reader, path)).collect()
    };

    let mut measurements = Vec::with_capacity(results.len());
    for result in results {
        match (result, config.failure_policy) {
            (Ok(measurement), _) => measurements.push(measurement),
            (Err(e), FailurePolicy::FailFast) => return Err(e),
            (Err(e), FailurePolicy::SkipAndContinue) => warn!("Skipping image: {}", e),
        }
    }

    info!("Scan of {} complete: {} measurement(s)", dir.display(), measurements.len());
    Ok(measurements)
}

/// Regular files in `dir` with a wanted extension, sorted by file name.
pub fn list_images(dir: &Path, config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(dir).map_err(|e| CurveError::unreadable(dir, e))?;
    if !metadata.is_dir() {
        return Err(CurveError::unreadable(dir, "not a directory"));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| CurveError::unreadable(dir, e))? {
        let path = entry.map_err(|e| CurveError::unreadable(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        let wanted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| config.matches_extension(ext));
        if wanted {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn read_measurement<R: ImageReader + ?Sized>(reader: &R, path: &Path) -> Result<Measurement> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let image = reader.read_image(path)?;
    let measurement = Measurement::from_decoded(file_name, &image).map_err(|e| match e {
        CurveError::MetadataMissing { tag, .. } => CurveError::MetadataMissing {
            file: path.display().to_string(),
            tag,
        },
        other => other,
    })?;

    debug!("{}", measurement);
    Ok(measurement)
}
