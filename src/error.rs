use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarioGaError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Invalid session state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Elite bookkeeping broke an invariant; the session cannot continue.
    #[error("Elitism invariant violated: {0}")]
    Elitism(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, MarioGaError>;
