use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurveError {
    #[error("Failed to read {}: {message}", .path.display())]
    SourceUnreadable { path: PathBuf, message: String },

    #[error("Missing or invalid {tag} metadata in {file}")]
    MetadataMissing { file: String, tag: &'static str },

    #[error("Malformed measurement data in {}: {message}", .path.display())]
    MalformedData { path: PathBuf, message: String },

    #[error("Refusing to overwrite existing file: {}", .0.display())]
    OutputConflict(PathBuf),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to render plot: {0}")]
    RenderError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CurveError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        CurveError::SourceUnreadable {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CurveError>;
