//! JSON flat-file persistence for measurement lists.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use tracing::{info, instrument};

use crate::curve_pipeline::common::error::{CurveError, Result};
use crate::curve_pipeline::measurement::types::Measurement;

/// Loads a measurement list. Every record must pass [`Measurement::validate`].
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_measurements(path: &Path) -> Result<Vec<Measurement>> {
    info!("Reading measurements from {}", path.display());

    let file = File::open(path).map_err(|e| CurveError::unreadable(path, e))?;
    let measurements: Vec<Measurement> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| CurveError::MalformedData {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    for (index, measurement) in measurements.iter().enumerate() {
        measurement.validate().map_err(|e| CurveError::MalformedData {
            path: path.to_path_buf(),
            message: format!("record {}: {}", index, e),
        })?;
    }

    info!("Loaded {} measurements", measurements.len());
    Ok(measurements)
}

/// Writes a measurement list. Fails with [`CurveError::OutputConflict`] when
/// `path` exists and `overwrite` is false.
#[instrument(skip_all, fields(path = %path.display(), count = measurements.len()))]
pub fn save_measurements(path: &Path, measurements: &[Measurement], overwrite: bool) -> Result<()> {
    info!("Saving {} measurements to {}", measurements.len(), path.display());

    let file = if overwrite {
        File::create(path)
    } else {
        OpenOptions::new().write(true).create_new(true).open(path)
    }
    .map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => CurveError::OutputConflict(path.to_path_buf()),
        _ => CurveError::OutputWriteError(format!("{}: {}", path.display(), e)),
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, measurements)
        .map_err(|e| CurveError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
    writer
        .flush()
        .map_err(|e| CurveError::OutputWriteError(format!("{}: {}", path.display(), e)))?;

    Ok(())
}
