use serde::{Deserialize, Serialize};

const STATUS_OK: &str = "ok";
const STATUS_ERROR: &str = "error";

/// Response object shared by every backend endpoint.
///
/// Older backends name the display endpoint `vnc_url`; both spellings are
/// accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "vnc_url")]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub emulator_info: Option<String>,
}

impl ApiResponse {
    /// Explicit acknowledgment; anything else is not a success.
    pub(crate) fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(STATUS_OK)
    }

    pub(crate) fn is_error(&self) -> bool {
        self.status.as_deref() == Some(STATUS_ERROR)
    }

    /// Endpoint with blank values treated as absent.
    pub(crate) fn endpoint(&self) -> Option<String> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(String::from)
    }

    pub(crate) fn message(&self) -> Option<String> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from)
    }
}

/// What the backend reports about the instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteStatus {
    pub running: bool,
    /// Always present when `running` is true
    pub endpoint: Option<String>,
    pub emulator_info: Option<String>,
}

/// Backend acknowledgment of a start request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartAck {
    pub endpoint: String,
    pub message: Option<String>,
}

/// Backend acknowledgment of a stop request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StopAck {
    pub message: Option<String>,
}

/// Result of the backend's container runtime check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockerCheck {
    pub available: bool,
    /// Runtime version on success, reason on failure
    pub message: Option<String>,
}
