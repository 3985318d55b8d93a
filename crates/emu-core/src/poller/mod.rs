mod cancel_handle;
mod poll_observer;
mod poller_settings;
mod probe;
mod readiness_poller;

pub use cancel_handle::CancelHandle;
pub use poll_observer::PollObserver;
pub use poller_settings::PollerSettings;
pub use probe::{HttpProbe, ProbeError, ReadinessProbe};
pub use readiness_poller::ReadinessPoller;
