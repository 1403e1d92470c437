use thiserror::Error;

/// Errors returned while building a histogram or searching for a threshold.
#[derive(Error, Debug)]
pub enum ThresholdError {
    /// No samples were supplied
    #[error("sample set is empty")]
    EmptySamples,

    /// A sample was NaN or infinite
    #[error("sample {index} is not finite: {value}")]
    NonFiniteSample { index: usize, value: f64 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, ThresholdError>;
