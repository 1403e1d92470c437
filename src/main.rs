use std::io::Read;

use clap::{Parser, ValueEnum};
use ocr_threshold::{find_threshold_with, ThresholdError, ThresholdParams, Weighting, DEFAULT_BINS};
use thiserror::Error;

/// Errors raised while reading samples or searching for the threshold.
#[derive(Error, Debug)]
enum CliError {
    /// Sample text could not be parsed as a number
    #[error("cannot parse sample: {0}")]
    Parse(String),

    #[error("cannot read stdin: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Threshold(#[from] ThresholdError),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum WeightingArg {
    /// Bin centre values (standard Otsu)
    Center,
    /// Legacy bin-index positions
    Index,
}

impl From<WeightingArg> for Weighting {
    fn from(arg: WeightingArg) -> Self {
        match arg {
            WeightingArg::Center => Weighting::BinCenter,
            WeightingArg::Index => Weighting::BinIndex,
        }
    }
}

/// Find the binary threshold of a set of intensity samples.
///
/// Samples are taken from the command line, or read from stdin as
/// whitespace-separated numbers when none are given.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of histogram bins
    #[arg(short, long, default_value_t = DEFAULT_BINS)]
    bins: usize,

    /// Bin positions used for the group statistics
    #[arg(short, long, value_enum, default_value_t = WeightingArg::Center)]
    weighting: WeightingArg,

    /// Sample values
    #[arg(allow_negative_numbers = true)]
    samples: Vec<f64>,
}

fn parse_samples(text: &str) -> Result<Vec<f64>, CliError> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| CliError::Parse(token.to_string()))
        })
        .collect()
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let samples = if cli.samples.is_empty() {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        parse_samples(&input)?
    } else {
        cli.samples
    };
    log::info!("read {} samples", samples.len());

    let params = ThresholdParams {
        bins: cli.bins,
        weighting: cli.weighting.into(),
    };
    let threshold = find_threshold_with(&samples, &params)?;

    println!("index: {}", threshold.index);
    println!("boundary: {}", threshold.boundary);
    println!("cost: {}", threshold.cost);
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
