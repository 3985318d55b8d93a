use crate::gateway::GatewayError;
use crate::lifecycle_state::LifecycleState;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Message placed in `LifecycleState::Error` when a boot runs out of attempts.
pub(crate) const BOOT_TIMED_OUT: &str = "boot timed out";

#[derive(Error, Debug)]
pub enum ControllerError {
    /// Backend unreachable or answered with something undecodable
    #[error("Transport error: {message} {location}")]
    Transport {
        message: String,
        #[source]
        source: GatewayError,
        location: ErrorLocation,
    },

    /// Backend reachable but reported a failure
    #[error("API error: {message} {location}")]
    Api {
        message: String,
        location: ErrorLocation,
    },

    #[error("Boot did not complete within {attempts} attempts {location}")]
    Timeout { attempts: u32, location: ErrorLocation },

    #[error("Cannot {action} while {state} {location}")]
    Precondition {
        action: &'static str,
        state: String,
        location: ErrorLocation,
    },
}

impl ControllerError {
    #[track_caller]
    pub fn timeout(attempts: u32) -> Self {
        Self::Timeout {
            attempts,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn precondition(action: &'static str, state: &LifecycleState) -> Self {
        Self::Precondition {
            action,
            state: state.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition { .. })
    }

    /// Text shown to the user in the error state and notifications.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { message, .. } => format!("Error: {message}"),
            Self::Api { message, .. } => message.clone(),
            Self::Timeout { .. } => BOOT_TIMED_OUT.to_string(),
            Self::Precondition { action, state, .. } => format!("Cannot {action} while {state}"),
        }
    }
}

impl From<GatewayError> for ControllerError {
    #[track_caller]
    fn from(err: GatewayError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match err {
            GatewayError::Api { message, .. } => Self::Api { message, location },
            other => Self::Transport {
                message: other.message().to_string(),
                source: other,
                location,
            },
        }
    }
}

pub type ControllerResult<T> = std::result::Result<T, ControllerError>;
