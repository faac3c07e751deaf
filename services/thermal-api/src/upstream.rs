//! Push of rendered frames to the webcam ingestion service.
//!
//! One PUT per frame, no retries, default client timeouts. A failed push is
//! reported to the caller but never invalidates the rendered frame.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use thermal_common::{ThermalError, ThermalResult};
use tracing::{debug, info};

use crate::config::WebcamConfig;

/// Content type the ingestion service expects.
const UPLOAD_CONTENT_TYPE: &str = "image/jpg";

/// Client for the webcam ingestion endpoint.
#[derive(Debug, Clone)]
pub struct WebcamClient {
    client: reqwest::Client,
    config: WebcamConfig,
}

impl WebcamClient {
    pub fn new(config: WebcamConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn headers(&self) -> ThermalResult<HeaderMap> {
        let header = |value: &str, name: &str| {
            HeaderValue::from_str(value)
                .map_err(|e| ThermalError::Upstream(format!("Invalid {} header: {}", name, e)))
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(UPLOAD_CONTENT_TYPE));
        headers.insert("fingerprint", header(&self.config.fingerprint, "fingerprint")?);
        headers.insert("token", header(&self.config.token, "token")?);
        Ok(headers)
    }

    /// Build the PUT request for a frame without sending it.
    pub fn build_request(&self, frame: Bytes) -> ThermalResult<reqwest::Request> {
        self.client
            .put(&self.config.url)
            .headers(self.headers()?)
            .body(frame)
            .build()
            .map_err(|e| ThermalError::Upstream(format!("Failed to build request: {}", e)))
    }

    /// Send a frame. Any transport error or non-2xx status is an
    /// `Upstream` error.
    pub async fn push(&self, frame: Bytes) -> ThermalResult<()> {
        let size = frame.len();
        let request = self.build_request(frame)?;
        debug!(url = %self.config.url, size, "Pushing frame to webcam service");

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ThermalError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ThermalError::Upstream(format!(
                "Webcam service returned {}: {}",
                status, body
            )));
        }

        info!(url = %self.config.url, size, status = %status, "Frame pushed to webcam service");
        Ok(())
    }
}
