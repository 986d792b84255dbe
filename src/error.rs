use thiserror::Error;

// Error taxonomy for a one-shot batch run: every variant is terminal,
// there is no retry or partial-success path.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to write dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
}
