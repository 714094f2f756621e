//! Error types for the SonarOp CLI

use std::process::ExitStatus;

use thiserror::Error;

/// Result type alias for SonarOp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("Git clone failed: {0}")]
    Git(String),

    #[error("sonar-scanner failed (status: {status})")]
    Scanner { status: String, output: Vec<u8> },

    #[error("Gave up after too many invalid {0} attempts")]
    AttemptsExhausted(&'static str),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// Build a scanner error from a finished process
    pub fn scanner(status: ExitStatus, output: Vec<u8>) -> Self {
        let status = status
            .code()
            .map(|code| code.to_string())
            .unwrap_or_else(|| status.to_string());
        Error::Scanner { status, output }
    }
}

/// SonarQube API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{endpoint}: expected status code {expected}, got {actual}")]
    BadStatus {
        endpoint: &'static str,
        expected: u16,
        actual: u16,
    },

    #[error("Invalid host, response expected pong got\n  {0}")]
    UnexpectedBody(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to SonarQube server".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
