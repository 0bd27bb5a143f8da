//! Crate-level error type.
//!
//! Each program keeps its own error enum next to the code that raises it
//! (`ApiError`, `RouteError`, `MoveError`). `AppError` wraps them so the
//! library surface can return a single type where that is convenient.

use thiserror::Error;

use crate::api::ApiError;
use crate::hanoi::MoveError;
use crate::routing::RouteError;

#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration value could not be parsed
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Hanoi(#[from] MoveError),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result alias used by the library.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err: AppError = RouteError::UnknownCity("Lima".into()).into();
        assert_eq!(err.to_string(), "Unknown city: 'Lima'");
    }

    #[test]
    fn config_error_displays_message() {
        let err = AppError::config("HANOI_DISCS must be a number");
        assert_eq!(
            err.to_string(),
            "Configuration error: HANOI_DISCS must be a number"
        );
    }
}
