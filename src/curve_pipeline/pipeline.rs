use tracing::{info, instrument};

use crate::curve_pipeline::{
    PipelineConfig, Result,
    curves::{PlotSeries, aggregate, normalize, select_series},
    measurement::{self, Measurement},
    plot::{PlotRenderer, PngPlotRenderer},
    raw::{ImageReader, RawLoaderReader},
    scan::scan_directory,
    timing::{PipelineTimings, Timer},
};

/// Outcome of one [`CurvePipeline::run`]
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Measurements loaded or scanned
    pub measurements: usize,
    /// (ISO, aperture) groups before filtering
    pub groups: usize,
    /// Series handed to the renderer
    pub series: Vec<PlotSeries>,
    pub timings: PipelineTimings,
}

/// Group count and selected series of one curve build
struct Curves {
    groups: usize,
    series: Vec<PlotSeries>,
}

pub struct CurvePipeline<R: ImageReader, P: PlotRenderer> {
    reader: R,
    renderer: P,
    config: PipelineConfig,
}

impl CurvePipeline<RawLoaderReader, PngPlotRenderer> {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader: RawLoaderReader::new(),
            renderer: PngPlotRenderer::new(),
            config,
        })
    }
}

impl<R: ImageReader, P: PlotRenderer> CurvePipeline<R, P> {
    pub fn with_custom(reader: R, renderer: P, config: PipelineConfig) -> Self {
        Self {
            reader,
            renderer,
            config,
        }
    }

    /// Reads measurements from the configured data file, or scans the
    /// configured directory when there is none.
    pub fn load_measurements(&self) -> Result<Vec<Measurement>> {
        match &self.config.read_data_from {
            Some(path) => measurement::load_measurements(path),
            None => scan_directory(&self.reader, &self.config.scan_dir, &self.config),
        }
    }

    /// Writes measurements to the configured data file, if any.
    pub fn save_measurements(&self, measurements: &[Measurement]) -> Result<()> {
        match &self.config.save_data_to {
            Some(path) => {
                measurement::save_measurements(path, measurements, self.config.overwrite_data)
            }
            None => Ok(()),
        }
    }

    /// Aggregates, normalizes and selects the plot series for `measurements`.
    pub fn build_series(&self, measurements: &[Measurement]) -> Vec<PlotSeries> {
        Self::build_curves(measurements, &mut PipelineTimings::new()).series
    }

    fn build_curves(measurements: &[Measurement], timings: &mut PipelineTimings) -> Curves {
        let timer = Timer::start("aggregate");
        let (mut family, peaks) = aggregate(measurements);
        timings.record(timer);

        let timer = Timer::start("normalize");
        normalize(&mut family, &peaks);
        timings.record(timer);

        let timer = Timer::start("select");
        let series = select_series(&family);
        timings.record(timer);

        Curves {
            groups: family.len(),
            series,
        }
    }

    #[instrument(skip(self))]
    pub fn run(&self) -> Result<PipelineReport> {
        self.config.validate()?;
        let mut timings = PipelineTimings::new();

        let timer = Timer::start("load");
        let measurements = self.load_measurements()?;
        timings.record(timer);

        let timer = Timer::start("save");
        self.save_measurements(&measurements)?;
        timings.record(timer);

        let Curves { groups, series } = Self::build_curves(&measurements, &mut timings);

        info!(
            measurements = measurements.len(),
            groups,
            series = series.len(),
            "Curves ready"
        );

        if let Some(output) = &self.config.plot_output {
            let timer = Timer::start("render");
            self.renderer.render(&self.config.chart, &series, output)?;
            timings.record(timer);
        }

        timings.log_summary();

        Ok(PipelineReport {
            measurements: measurements.len(),
            groups,
            series,
            timings,
        })
    }
}
