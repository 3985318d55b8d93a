use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Why a probe did not reach the endpoint. Never leaves the poller.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("endpoint unreachable: {message}")]
    Unreachable { message: String },
}

/// Connectivity-only check of a display endpoint.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    async fn probe(&self, endpoint: &str) -> Result<(), ProbeError>;
}

/// Probe that issues a GET and accepts any HTTP response.
///
/// The status code and body are ignored: a freshly booted display server
/// may answer 404 or a redirect, and only the fact that it answered matters.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(1)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ReadinessProbe for HttpProbe {
    async fn probe(&self, endpoint: &str) -> Result<(), ProbeError> {
        self.client
            .get(endpoint)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| ProbeError::Unreachable {
                message: e.to_string(),
            })
    }
}
