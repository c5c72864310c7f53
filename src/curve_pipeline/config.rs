//! Pipeline configuration types

use std::path::PathBuf;

use crate::curve_pipeline::common::error::{CurveError, Result};
use crate::curve_pipeline::plot::ChartSpec;

/// What a directory scan does when one image cannot be turned into a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the whole batch on the first failing image (in file name order)
    #[default]
    FailFast,
    /// Log the failure and leave the image out
    SkipAndContinue,
}

/// Configuration for one curve pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory scanned for images when no data file is given
    pub scan_dir: PathBuf,
    /// Load measurements from this JSON file instead of scanning
    pub read_data_from: Option<PathBuf>,
    /// Save the measurements to this JSON file
    pub save_data_to: Option<PathBuf>,
    /// Allow `save_data_to` to replace an existing file
    pub overwrite_data: bool,
    /// Where to write the chart; `None` skips plotting
    pub plot_output: Option<PathBuf>,
    /// File extensions picked up by the scan, compared case-insensitively
    pub extensions: Vec<String>,
    pub failure_policy: FailurePolicy,
    /// Decode images on the rayon thread pool
    pub parallel: bool,
    pub chart: ChartSpec,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scan_dir: PathBuf::from("."),
            read_data_from: None,
            save_data_to: None,
            overwrite_data: false,
            plot_output: Some(PathBuf::from("points.png")),
            extensions: vec!["cr2".to_string()],
            failure_policy: FailurePolicy::FailFast,
            parallel: false,
            chart: ChartSpec::default(),
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        match &self.read_data_from {
            Some(read) => {
                if self.save_data_to.as_ref() == Some(read) {
                    return Err(CurveError::InvalidConfig(format!(
                        "read-data-from and save-data-to are the same file: {}",
                        read.display()
                    )));
                }
            }
            None => {
                if self.scan_dir.as_os_str().is_empty() {
                    return Err(CurveError::InvalidConfig(
                        "scan directory and data file are both empty".to_string(),
                    ));
                }
                if self.extensions.is_empty() {
                    return Err(CurveError::InvalidConfig(
                        "no file extensions to scan for".to_string(),
                    ));
                }
            }
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(CurveError::InvalidConfig(format!(
                "chart canvas {}x{}",
                self.chart.width, self.chart.height
            )));
        }
        Ok(())
    }

    /// Whether `extension` is one the scan should pick up.
    pub fn matches_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|wanted| wanted.eq_ignore_ascii_case(extension))
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    scan_dir: Option<PathBuf>,
    read_data_from: Option<Option<PathBuf>>,
    save_data_to: Option<Option<PathBuf>>,
    overwrite_data: Option<bool>,
    plot_output: Option<Option<PathBuf>>,
    extensions: Option<Vec<String>>,
    failure_policy: Option<FailurePolicy>,
    parallel: Option<bool>,
    chart: Option<ChartSpec>,
}

impl PipelineConfigBuilder {
    pub fn scan_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scan_dir = Some(dir.into());
        self
    }

    pub fn read_data_from(mut self, path: Option<PathBuf>) -> Self {
        self.read_data_from = Some(path);
        self
    }

    pub fn save_data_to(mut self, path: Option<PathBuf>) -> Self {
        self.save_data_to = Some(path);
        self
    }

    pub fn overwrite_data(mut self, overwrite: bool) -> Self {
        self.overwrite_data = Some(overwrite);
        self
    }

    pub fn plot_output(mut self, path: Option<PathBuf>) -> Self {
        self.plot_output = Some(path);
        self
    }

    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = Some(extensions.into_iter().map(Into::into).collect());
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = Some(policy);
        self
    }

    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn chart(mut self, chart: ChartSpec) -> Self {
        self.chart = Some(chart);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            scan_dir: self.scan_dir.unwrap_or(default.scan_dir),
            read_data_from: self.read_data_from.unwrap_or(default.read_data_from),
            save_data_to: self.save_data_to.unwrap_or(default.save_data_to),
            overwrite_data: self.overwrite_data.unwrap_or(default.overwrite_data),
            plot_output: self.plot_output.unwrap_or(default.plot_output),
            extensions: self.extensions.unwrap_or(default.extensions),
            failure_policy: self.failure_policy.unwrap_or(default.failure_policy),
            parallel: self.parallel.unwrap_or(default.parallel),
            chart: self.chart.unwrap_or(default.chart),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.scan_dir, PathBuf::from("."));
        assert_eq!(config.plot_output, Some(PathBuf::from("points.png")));
        assert_eq!(config.failure_policy, FailurePolicy::FailFast);
        assert!(!config.overwrite_data);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = PipelineConfig::builder()
            .scan_dir("/data/shots")
            .save_data_to(Some(PathBuf::from("stats.json")))
            .overwrite_data(true)
            .plot_output(None)
            .extensions(["CR2", "nef"])
            .failure_policy(FailurePolicy::SkipAndContinue)
            .parallel(true)
            .build();

        assert_eq!(config.scan_dir, PathBuf::from("/data/shots"));
        assert_eq!(config.save_data_to, Some(PathBuf::from("stats.json")));
        assert!(config.overwrite_data);
        assert!(config.plot_output.is_none());
        assert!(config.parallel);
        assert!(config.matches_extension("cr2"));
        assert!(config.matches_extension("NEF"));
        assert!(!config.matches_extension("jpg"));
    }

    #[test]
    fn test_same_read_and_save_file_is_rejected() {
        let config = PipelineConfig::builder()
            .read_data_from(Some(PathBuf::from("stats.json")))
            .save_data_to(Some(PathBuf::from("stats.json")))
            .build();
        assert!(matches!(config.validate(), Err(CurveError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_scan_dir_without_data_file_is_rejected() {
        let config = PipelineConfig::builder().scan_dir("").build();
        assert!(matches!(config.validate(), Err(CurveError::InvalidConfig(_))));

        let config = PipelineConfig::builder()
            .scan_dir("")
            .read_data_from(Some(PathBuf::from("stats.json")))
            .build();
        assert!(config.validate().is_ok());
    }
}
