mod cli;

use anyhow::Context;
use exposure_curves::curve_pipeline::CurvePipeline;
use exposure_curves::logger;

use tracing::info;

fn main() -> anyhow::Result<()> {
    let (config, verbose) = match cli::parse(std::env::args().skip(1)) {
        Ok(cli::Command::Run { config, verbose }) => (config, verbose),
        Ok(cli::Command::Help) => {
            println!("{}", cli::USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("error parsing command line: {}\n\n{}", e, cli::USAGE);
            std::process::exit(1);
        }
    };

    logger::init(verbose);

    info!("Starting exposure_curves...");
    match &config.read_data_from {
        Some(path) => info!("Measurements from: {}", path.display()),
        None => info!("Scanning: {}", config.scan_dir.display()),
    }

    let pipeline = CurvePipeline::new(config).context("invalid configuration")?;
    let report = pipeline.run().context("curve pipeline failed")?;

    info!(
        "Done: {} measurement(s), {} group(s), {} curve(s) plotted",
        report.measurements,
        report.groups,
        report.series.len()
    );
    Ok(())
}
