use emu_config::ConfigError;
use emu_core::GatewayError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Client setup error: {message} {location}")]
    Setup {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logging setup error: {message} {location}")]
    Logging {
        message: String,
        location: ErrorLocation,
    },

    #[error("Output error: {message} {location}")]
    Output {
        message: String,
        location: ErrorLocation,
    },
}

impl CliError {
    #[track_caller]
    pub fn setup<S: Into<String>>(message: S) -> Self {
        Self::Setup {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::Logging {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn output<S: Into<String>>(message: S) -> Self {
        Self::Output {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<GatewayError> for CliError {
    #[track_caller]
    fn from(err: GatewayError) -> Self {
        Self::setup(err.to_string())
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;
