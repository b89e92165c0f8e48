// Backend client for the executors listing

use crate::config::BackendConfig;
use crate::errors::FetchError;
use crate::models::ExecutorSummary;
use crate::telemetry;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Source of executor summaries
#[async_trait]
pub trait ExecutorSource: Send + Sync {
    /// Fetch the complete executor list
    async fn fetch_executors(&self) -> Result<Vec<ExecutorSummary>, FetchError>;
}

/// ExecutorSource backed by the backend REST endpoint
#[derive(Debug, Clone)]
pub struct HttpExecutorSource {
    client: Client,
    url: String,
}

impl HttpExecutorSource {
    /// Create a new source from backend configuration
    pub fn new(config: &BackendConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: config.executors_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self) -> Result<Vec<ExecutorSummary>, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let rows = serde_json::from_slice(&body)?;
        Ok(rows)
    }
}

#[async_trait]
impl ExecutorSource for HttpExecutorSource {
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    async fn fetch_executors(&self) -> Result<Vec<ExecutorSummary>, FetchError> {
        let started = Instant::now();
        let result = self.request().await;

        telemetry::record_fetch_duration(started.elapsed().as_secs_f64());
        match &result {
            Ok(rows) => {
                tracing::debug!(rows = rows.len(), "Fetched executor summaries");
                telemetry::record_fetch_success(rows.len());
            }
            Err(e) => telemetry::record_fetch_failure(e.reason()),
        }

        result
    }
}
