// Upstream device API repository implementation
use crate::application::reading_repository::ReadingRepository;
use crate::domain::reading::RawReading;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to upstream failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("upstream returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode upstream payload: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Fetches raw reading batches from the device ingestion API.
#[derive(Debug, Clone)]
pub struct UpstreamRepository {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn readings_url(&self, collection: &str, date_filter: Option<NaiveDate>) -> String {
        let collection = urlencoding::encode(collection);
        match date_filter {
            None => format!("{}/api/leituras/{}", self.base_url, collection),
            Some(date) => format!(
                "{}/api/historico-dia/{}?data={}",
                self.base_url,
                collection,
                date.format("%Y-%m-%d")
            ),
        }
    }

    async fn execute(&self, url: &str) -> Result<Vec<RawReading>, UpstreamError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(UpstreamError::Request)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        response
            .json::<Vec<RawReading>>()
            .await
            .map_err(UpstreamError::Decode)
    }
}

#[async_trait]
impl ReadingRepository for UpstreamRepository {
    async fn fetch_readings(
        &self,
        collection: &str,
        date_filter: Option<NaiveDate>,
    ) -> Result<Vec<RawReading>> {
        let url = self.readings_url(collection, date_filter);
        let readings = self
            .execute(&url)
            .await
            .with_context(|| format!("fetching readings from {url}"))?;

        tracing::debug!(collection, count = readings.len(), "fetched raw readings");
        Ok(readings)
    }
}
