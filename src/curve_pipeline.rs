//! Characteristic curve pipeline
//!
//! Turns a set of per-image measurements (ISO, aperture, exposure time,
//! brightness) into normalized, log-scaled curve series grouped by
//! (ISO, aperture), and hands them to a plot renderer.

pub mod common;
pub mod measurement;
pub mod raw;
pub mod metadata;
pub mod brightness;
pub mod curves;
pub mod plot;
pub mod scan;
pub mod config;
pub mod timing;
mod pipeline;


pub use common::{
    CurveError,
    Result,
};

pub use measurement::{
    Measurement,
    load_measurements,
    save_measurements,
};

pub use raw::{
    DecodedImage,
    ImageReader,
    PixelGrid,
    RawLoaderReader,
    RgbImageData,
};

pub use metadata::{
    ExifMetadataReader,
    ExposureTags,
    MetadataReader,
    RationalTag,
};

pub use brightness::estimate_brightness;

pub use curves::{
    CurveFamily,
    CurveGroup,
    GroupKey,
    PeakBrightness,
    PlotSeries,
    Point,
    aggregate,
    normalize,
    select_series,
};

pub use plot::{
    ChartSpec,
    PlotRenderer,
    PngPlotRenderer,
};

pub use scan::scan_directory;

pub use config::{
    FailurePolicy,
    PipelineConfig,
    PipelineConfigBuilder,
};

pub use timing::{PipelineTimings, StepTiming, Timer};

pub use pipeline::{CurvePipeline, PipelineReport};
