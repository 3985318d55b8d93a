//! Terminal rendering of controller state and notifications.

use emu_core::{
    DockerCheck, LifecycleState, Notification, RemoteStatus, StatusCategory, StatusView,
};

use serde::Serialize;

const BAR_WIDTH: usize = 20;

/// Machine-readable summary printed with `--json`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub state: &'a LifecycleState,
    pub view: &'a StatusView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<&'a RemoteStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker: Option<&'a DockerCheck>,
}

pub fn status_line(view: &StatusView) -> String {
    let tag = category_tag(view.category);
    match (&view.endpoint, view.progress_percent) {
        (Some(endpoint), _) => format!("[{tag}] {} at {endpoint}", view.label),
        (None, Some(percent)) => format!("[{tag}] {} {}", view.label, progress_bar(percent)),
        (None, None) => format!("[{tag}] {}", view.label),
    }
}

pub fn notification_line(notification: &Notification) -> String {
    format!(
        "{} {:>7}: {}",
        notification.timestamp.format("%H:%M:%S"),
        notification.severity,
        notification.message
    )
}

pub fn docker_line(check: &DockerCheck) -> String {
    let verdict = if check.available {
        "Docker available"
    } else {
        "Docker not available"
    };
    match &check.message {
        Some(message) => format!("{verdict}: {message}"),
        None => verdict.to_string(),
    }
}

pub fn remote_line(remote: &RemoteStatus) -> Option<String> {
    remote
        .emulator_info
        .as_deref()
        .map(str::trim)
        .filter(|info| !info.is_empty())
        .map(|info| format!("Devices: {info}"))
}

/// `[#####---------------]  25%`
pub fn progress_bar(percent: u8) -> String {
    let percent = percent.min(100);
    let filled = usize::from(percent) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {percent:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

fn category_tag(category: StatusCategory) -> &'static str {
    match category {
        StatusCategory::Stopped => "stopped",
        StatusCategory::Starting => "starting",
        StatusCategory::Booting => "booting",
        StatusCategory::Running => "running",
        StatusCategory::Stopping => "stopping",
        StatusCategory::Error => "error",
    }
}
