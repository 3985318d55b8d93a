use crate::lifecycle_state::LifecycleState;

use serde::Serialize;

/// Coarse category a status widget styles itself by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Stopped,
    Starting,
    Booting,
    Running,
    Stopping,
    Error,
}

/// Presentation of a [`LifecycleState`] for the status widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub category: StatusCategory,
    pub label: String,
    /// Display endpoint to embed; only set while running
    pub endpoint: Option<String>,
    pub elapsed_secs: Option<u32>,
    pub progress_percent: Option<u8>,
}

impl StatusView {
    /// Same as `From<&LifecycleState>` but fills boot progress against
    /// `max_attempts`. Progress stays below 100 until the instance is ready.
    pub fn with_budget(state: &LifecycleState, max_attempts: u32) -> Self {
        let mut view = Self::from(state);
        if let LifecycleState::Booting { elapsed_secs } = state
            && max_attempts > 0
        {
            let percent = (u64::from(*elapsed_secs) * 100 / u64::from(max_attempts)).min(99);
            view.progress_percent = Some(percent as u8);
        }
        view
    }
}

impl From<&LifecycleState> for StatusView {
    fn from(state: &LifecycleState) -> Self {
        let (category, label) = match state {
            LifecycleState::Offline => (StatusCategory::Stopped, "Emulator not running".into()),
            LifecycleState::Starting => (StatusCategory::Starting, "Starting emulator...".into()),
            LifecycleState::Booting { elapsed_secs } => (
                StatusCategory::Booting,
                format!("Waiting for emulator to boot... ({elapsed_secs}s)"),
            ),
            LifecycleState::Running { .. } => (StatusCategory::Running, "Emulator running".into()),
            LifecycleState::Stopping => (StatusCategory::Stopping, "Stopping emulator...".into()),
            LifecycleState::Error { message } => (StatusCategory::Error, message.clone()),
        };

        let elapsed_secs = match state {
            LifecycleState::Booting { elapsed_secs } => Some(*elapsed_secs),
            _ => None,
        };

        StatusView {
            category,
            label,
            endpoint: state.endpoint().map(String::from),
            elapsed_secs,
            progress_percent: None,
        }
    }
}
