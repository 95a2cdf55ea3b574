use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TFJobError {
    ConfigurationError(String),
    ValidationError(String),
    ObservationError(String),
    JobNotFound(String),
}

impl fmt::Display for TFJobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TFJobError::ConfigurationError(msg) => write!(f, "Configuration error: {msg}"),
            TFJobError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            TFJobError::ObservationError(msg) => write!(f, "Observation error: {msg}"),
            TFJobError::JobNotFound(runtime_id) => write!(f, "No job with runtime ID: {runtime_id}"),
        }
    }
}

impl std::error::Error for TFJobError {}

pub type Result<T> = std::result::Result<T, TFJobError>;
