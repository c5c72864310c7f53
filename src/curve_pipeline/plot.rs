//! Plot rendering module
//!
//! The renderer receives labeled point series plus a chart description and
//! produces a raster image file.

mod renderer;
mod png_renderer;
pub mod colors;

pub use renderer::{ChartSpec, PlotRenderer};
pub use png_renderer::PngPlotRenderer;
