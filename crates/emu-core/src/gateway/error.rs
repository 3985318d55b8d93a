use error_location::ErrorLocation;
use std::panic::Location;
use thiserror::Error;

/// Errors that can occur talking to the emulator backend
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("API error: {message} {location}")]
    Api {
        message: String,
        location: ErrorLocation,
    },
}

impl GatewayError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        GatewayError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        GatewayError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Create an API error with location
    #[track_caller]
    pub fn api_error<S: Into<String>>(message: S) -> Self {
        GatewayError::Api {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The backend was reached and answered with a failure.
    pub fn is_api(&self) -> bool {
        matches!(self, GatewayError::Api { .. })
    }

    /// Message without the source location, suitable for display.
    pub fn message(&self) -> &str {
        match self {
            GatewayError::Http { message, .. }
            | GatewayError::Json { message, .. }
            | GatewayError::Api { message, .. } => message,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        GatewayError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for GatewayError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        GatewayError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
