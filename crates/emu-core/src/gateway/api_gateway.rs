use crate::gateway::{DockerCheck, GatewayResult, RemoteStatus, StartAck, StopAck};

use async_trait::async_trait;

/// Request/response boundary to the emulator backend.
///
/// The lifecycle controller only ever talks to the backend through this
/// trait, so tests can script responses without a server.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// Authoritative remote state of the instance.
    async fn status(&self) -> GatewayResult<RemoteStatus>;

    /// Ask the backend to create the instance.
    async fn start(&self) -> GatewayResult<StartAck>;

    /// Ask the backend to tear the instance down.
    async fn stop(&self) -> GatewayResult<StopAck>;

    /// Whether the backend host can run containers at all.
    async fn check_docker(&self) -> GatewayResult<DockerCheck>;
}
