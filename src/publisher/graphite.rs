//! Graphite-compatible JSON publisher

use crate::errors::{PingmonError, Result};
use crate::metrics::Metric;
use crate::publisher::Publisher;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Credentials for the ingestion endpoint, sent as `Bearer {user_id}:{api_key}`
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("api_key", &"***")
            .finish()
    }
}

/// Everything the publisher needs, passed in at construction
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    pub endpoint: Url,
    pub credentials: Option<Credentials>,
    pub timeout: Duration,
}

/// POSTs metric batches as a JSON array
pub struct GraphitePublisher {
    config: PublisherConfig,
    http_client: reqwest::Client,
}

impl GraphitePublisher {
    pub fn new(config: PublisherConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn build_request(&self, metrics: &[Metric]) -> Result<reqwest::RequestBuilder> {
        let body = serde_json::to_vec(metrics)?;

        let mut request = self
            .http_client
            .post(self.config.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        if let Some(credentials) = &self.config.credentials {
            request = request.bearer_auth(format!(
                "{}:{}",
                credentials.user_id, credentials.api_key
            ));
        }

        Ok(request)
    }
}

#[async_trait]
impl Publisher for GraphitePublisher {
    async fn publish(&self, metrics: &[Metric]) -> Result<()> {
        let request = self.build_request(metrics)?;

        // Transport failures surface as PingmonError::HttpRequest
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            debug!("Published {} metrics ({})", metrics.len(), status);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(PingmonError::publish(format!(
            "{} rejected {} metrics with status {}: {}",
            self.config.endpoint,
            metrics.len(),
            status,
            body.trim()
        )))
    }
}
