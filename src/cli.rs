use std::path::PathBuf;

use exposure_curves::curve_pipeline::{FailurePolicy, PipelineConfig};

pub const USAGE: &str = "\
Usage: exposure_curves [OPTIONS]

Plots the characteristic curve family of a camera from a bracket of RAW shots.

Options:
  --scan-dir DIR         scan RAW files in this directory (default: .)
  --read-data-from FILE  read measurements from a JSON file instead of scanning
  --save-data-to FILE    save scanned measurements to a JSON file
  --data-overwrite       allow --save-data-to to replace an existing file
  --plot-to FILE         write the chart to FILE (default: points.png)
  --no-plot              do not render a chart
  --ext EXT              scan files with this extension, repeatable (default: cr2)
  --skip-bad-images      leave out unreadable images instead of aborting
  --parallel             decode images on all cores
  -v                     print more info while processing
  -h, --help             print usage and exit";

#[derive(Debug)]
pub enum Command {
    Help,
    Run { config: PipelineConfig, verbose: bool },
}

pub fn parse<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut builder = PipelineConfig::builder();
    let mut verbose = false;
    let mut plot_output = Some(PathBuf::from("points.png"));
    let mut extensions: Vec<String> = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("{} needs a value", name))
        };
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" => verbose = true,
            "--scan-dir" => builder = builder.scan_dir(value(&arg)?),
            "--read-data-from" => builder = builder.read_data_from(Some(value(&arg)?.into())),
            "--save-data-to" => builder = builder.save_data_to(Some(value(&arg)?.into())),
            "--data-overwrite" => builder = builder.overwrite_data(true),
            "--plot-to" => plot_output = Some(value(&arg)?.into()),
            "--no-plot" => plot_output = None,
            "--ext" => extensions.push(value(&arg)?.trim_start_matches('.').to_string()),
            "--skip-bad-images" => builder = builder.failure_policy(FailurePolicy::SkipAndContinue),
            "--parallel" => builder = builder.parallel(true),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    if !extensions.is_empty() {
        builder = builder.extensions(extensions);
    }
    let config = builder.plot_output(plot_output).build();
    config.validate().map_err(|e| e.to_string())?;

    Ok(Command::Run { config, verbose })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let Ok(Command::Run { config, verbose }) = parse(args(&[])) else {
            panic!("expected run");
        };
        assert!(!verbose);
        assert_eq!(config.scan_dir, PathBuf::from("."));
        assert_eq!(config.plot_output, Some(PathBuf::from("points.png")));
    }

    #[test]
    fn test_all_flags() {
        let parsed = parse(args(&[
            "--scan-dir", "shots",
            "--save-data-to", "stats.json",
            "--data-overwrite",
            "--no-plot",
            "--ext", ".NEF",
            "--skip-bad-images",
            "--parallel",
            "-v",
        ]));
        let Ok(Command::Run { config, verbose }) = parsed else {
            panic!("expected run");
        };
        assert!(verbose);
        assert_eq!(config.scan_dir, PathBuf::from("shots"));
        assert_eq!(config.save_data_to, Some(PathBuf::from("stats.json")));
        assert!(config.overwrite_data);
        assert!(config.plot_output.is_none());
        assert_eq!(config.extensions, ["NEF"]);
        assert_eq!(config.failure_policy, FailurePolicy::SkipAndContinue);
        assert!(config.parallel);
    }

    #[test]
    fn test_help() {
        assert!(matches!(parse(args(&["-v", "-h"])), Ok(Command::Help)));
    }

    #[test]
    fn test_errors() {
        assert!(parse(args(&["--scan-dir"])).is_err());
        assert!(parse(args(&["--bogus"])).is_err());
        assert!(parse(args(&["--read-data-from", "a.json", "--save-data-to", "a.json"])).is_err());
    }
}
