mod notification;
mod status_reporter;
mod status_view;

pub use notification::{Notification, Severity};
pub use status_reporter::StatusReporter;
pub use status_view::{StatusCategory, StatusView};
