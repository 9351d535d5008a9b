use shared::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("JSON input error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INVALID_INPUT: u8 = 2;
pub const EXIT_CONFIG: u8 = 3;

impl EngineError {
    /// Process exit code reported by the CLI for this error.
    pub fn exit_code(&self) -> u8 {
        tracing::error!("Mapping EngineError to exit code: {:?}", self);
        match self {
            EngineError::ConfigError(_) => EXIT_CONFIG,
            EngineError::CsvDataFormatError(_)
            | EngineError::JsonError { .. }
            | EngineError::Validation(_) => EXIT_INVALID_INPUT,
            EngineError::IoError { .. } | EngineError::AnyhowError(_) => EXIT_FAILURE,
        }
    }
}
