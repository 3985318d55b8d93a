use std::fmt;

use serde::Serialize;

/// State of the single emulator instance as seen by this process.
///
/// Created as `Offline` and only ever mutated by the lifecycle controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LifecycleState {
    /// No instance running
    #[default]
    Offline,
    /// Start request sent, waiting for the backend
    Starting,
    /// Instance created, waiting for the display endpoint to answer
    ///
    /// `elapsed_secs` is the poll attempt count, which equals seconds at
    /// the default one-second cadence.
    Booting { elapsed_secs: u32 },
    /// Instance reachable at `endpoint` (never empty)
    Running { endpoint: String },
    /// Stop request sent, waiting for the backend
    Stopping,
    /// Last operation failed; accepts a new start
    Error { message: String },
}

impl LifecycleState {
    /// Whether `start()` is accepted from this state.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Offline | Self::Error { .. })
    }

    /// Whether `stop()` has anything to stop.
    pub fn can_stop(&self) -> bool {
        matches!(self, Self::Booting { .. } | Self::Running { .. })
    }

    /// A request to the backend is outstanding.
    pub fn is_request_in_flight(&self) -> bool {
        matches!(self, Self::Starting | Self::Stopping)
    }

    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Running { endpoint } => Some(endpoint),
            _ => None,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline => f.write_str("offline"),
            Self::Starting => f.write_str("starting"),
            Self::Booting { elapsed_secs } => write!(f, "booting ({elapsed_secs}s)"),
            Self::Running { endpoint } => write!(f, "running at {endpoint}"),
            Self::Stopping => f.write_str("stopping"),
            Self::Error { message } => write!(f, "in error ({message})"),
        }
    }
}
