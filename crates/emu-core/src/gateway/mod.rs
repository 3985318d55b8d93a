mod api_gateway;
mod error;
mod http_gateway;
pub(crate) mod wire;

pub use api_gateway::ApiGateway;
pub use error::{GatewayError, Result as GatewayResult};
pub use http_gateway::HttpGateway;
pub use wire::{DockerCheck, RemoteStatus, StartAck, StopAck};
