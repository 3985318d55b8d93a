use crate::gateway::wire::ApiResponse;
use crate::gateway::{
    ApiGateway, DockerCheck, GatewayError, GatewayResult, RemoteStatus, StartAck, StopAck,
};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use tracing::debug;

const STATUS_PATH: &str = "/api/status";
const START_PATH: &str = "/api/start";
const STOP_PATH: &str = "/api/stop";
const CHECK_DOCKER_PATH: &str = "/api/check-docker";

/// [`ApiGateway`] backed by the emulator backend's REST API
pub struct HttpGateway {
    pub base_url: String,
    client: ReqwestClient,
}

impl HttpGateway {
    /// Create a new gateway
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "http://127.0.0.1:8080")
    /// * `request_timeout` - Upper bound for a single request
    pub fn new(base_url: &str, request_timeout: Duration) -> GatewayResult<Self> {
        let client = ReqwestClient::builder().timeout(request_timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Send request and decode the shared response object
    async fn execute(&self, req: reqwest::RequestBuilder) -> GatewayResult<Reply> {
        let response = req.send().await?;
        let http_status = response.status();
        let body = response.text().await?;
        debug!("Backend answered HTTP {http_status}");

        let parsed: ApiResponse = serde_json::from_str(&body)?;
        Ok(Reply {
            http_status,
            body: parsed,
        })
    }
}

/// Decoded body together with the HTTP status it arrived with.
struct Reply {
    http_status: StatusCode,
    body: ApiResponse,
}

impl Reply {
    /// Start and stop only count as done on a 2xx with `status: "ok"`.
    fn acknowledged(self, default_message: &str) -> GatewayResult<ApiResponse> {
        if self.http_status.is_success() && self.body.is_ok() {
            return Ok(self.body);
        }

        Err(GatewayError::api_error(
            self.body
                .message()
                .unwrap_or_else(|| default_message.to_string()),
        ))
    }
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn status(&self) -> GatewayResult<RemoteStatus> {
        let resp = self
            .execute(self.request(Method::GET, STATUS_PATH))
            .await?
            .body;

        if resp.is_error() {
            return Err(GatewayError::api_error(
                resp.message()
                    .unwrap_or_else(|| "Failed to read emulator status".into()),
            ));
        }

        let endpoint = resp.endpoint();
        if resp.running && endpoint.is_none() {
            return Err(GatewayError::api_error(
                "status reported running without a display endpoint",
            ));
        }

        Ok(RemoteStatus {
            running: resp.running,
            endpoint,
            emulator_info: resp.emulator_info,
        })
    }

    async fn start(&self) -> GatewayResult<StartAck> {
        let resp = self
            .execute(self.request(Method::POST, START_PATH))
            .await?
            .acknowledged("Failed to start emulator")?;

        let endpoint = resp.endpoint().ok_or_else(|| {
            GatewayError::api_error("start acknowledged without a display endpoint")
        })?;

        Ok(StartAck {
            endpoint,
            message: resp.message(),
        })
    }

    async fn stop(&self) -> GatewayResult<StopAck> {
        let resp = self
            .execute(self.request(Method::POST, STOP_PATH))
            .await?
            .acknowledged("Failed to stop emulator")?;

        Ok(StopAck {
            message: resp.message(),
        })
    }

    async fn check_docker(&self) -> GatewayResult<DockerCheck> {
        let resp = self
            .execute(self.request(Method::GET, CHECK_DOCKER_PATH))
            .await?
            .body;

        Ok(DockerCheck {
            available: !resp.is_error(),
            message: resp.message(),
        })
    }
}
