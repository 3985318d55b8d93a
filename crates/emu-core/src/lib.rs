//! Emulator lifecycle core.
//!
//! Drives a single remote Android emulator instance through start, boot,
//! readiness and stop, and turns its state into something a UI can render.

mod controller;
mod error;
mod gateway;
mod lifecycle_state;
mod poller;
mod reporter;

#[cfg(test)]
mod tests;

pub use controller::LifecycleController;
pub use error::{ControllerError, ControllerResult};
pub use gateway::{
    ApiGateway, DockerCheck, GatewayError, GatewayResult, HttpGateway, RemoteStatus, StartAck,
    StopAck,
};
pub use lifecycle_state::LifecycleState;
pub use poller::{
    CancelHandle, HttpProbe, PollObserver, PollerSettings, ProbeError, ReadinessPoller,
    ReadinessProbe,
};
pub use reporter::{Notification, Severity, StatusCategory, StatusReporter, StatusView};
