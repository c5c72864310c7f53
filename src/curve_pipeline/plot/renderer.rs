use std::path::Path;

use crate::curve_pipeline::common::error::Result;
use crate::curve_pipeline::curves::types::PlotSeries;

/// Title, axis labels and canvas size of the chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            title: "Characteristic curve family".to_string(),
            x_label: "Exposition".to_string(),
            y_label: "Brightness".to_string(),
            // 10in at 96 dpi
            width: 960,
            height: 960,
        }
    }
}

pub trait PlotRenderer: Send + Sync {
    fn render(&self, chart: &ChartSpec, series: &[PlotSeries], output: &Path) -> Result<()>;
}
