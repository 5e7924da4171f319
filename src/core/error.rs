use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised by the library.
pub enum PError {
    #[error("The following error occurred: {0}")]
    Generic(String),
    #[error("An optimisation run is already in progress. Wait for it to finish or cancel it first")]
    AlreadyRunning,
    #[error("No {0} has been selected yet")]
    IncompleteConfiguration(String),
    #[error("The request to the optimisation service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("The optimisation service reported a failure: {0}")]
    Service(String),
    #[error("The optimisation result is not valid: {0}")]
    Schema(String),
    #[error("All objective vectors must have the same length (expected {0}, found {1})")]
    DimensionMismatch(usize, usize),
    #[error("The Pareto front cannot be charted: {0}")]
    InsufficientData(String),
    #[error("An error occurred while rendering the '{0}' chart: {1}")]
    Chart(String, String),
}
