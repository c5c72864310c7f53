//! Common utilities module
//!
//! This module contains shared utilities used across the curve pipeline.

pub mod error;

pub use error::{CurveError, Result};
