//! Measurement module
//!
//! One [`Measurement`] per source image, plus the JSON flat-file store used to
//! cache a scanned set between runs.

mod store;
pub mod types;

pub use store::{load_measurements, save_measurements};
pub use types::Measurement;
