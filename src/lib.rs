pub mod curve_pipeline;
pub mod logger;
