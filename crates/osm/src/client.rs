//! # Overpass Client
//!
//! Thin async HTTP client for the vector-feature endpoint. One `fetch` call
//! covers one ingestion: build the combined query, GET it URL-encoded, check
//! the status, parse the body.

use std::time::Duration;

use urbe_common::GeoBounds;

use crate::error::{IngestError, Result};
use crate::parse::{parse_features, FeatureSet};
use crate::query::{feature_query, DEFAULT_ENDPOINT, QUERY_TIMEOUT_SECS};

/// HTTP client for the Overpass vector-feature endpoint
#[derive(Debug, Clone)]
pub struct OsmClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OsmClient {
    /// Client against a specific endpoint with an explicit request timeout,
    /// so a hung fetch cannot stall an ingestion forever.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IngestError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Client against the public Overpass endpoint
    pub fn with_default_endpoint() -> Result<Self> {
        Self::new(DEFAULT_ENDPOINT, Duration::from_secs(QUERY_TIMEOUT_SECS))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and parse every building and street within `bounds`.
    pub async fn fetch(&self, bounds: &GeoBounds) -> Result<FeatureSet> {
        let query = feature_query(bounds);
        tracing::debug!("Querying {} for {:?}", self.endpoint, bounds);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let set = parse_features(&body)?;
        tracing::info!(
            "Fetched {} buildings and {} streets",
            set.buildings.len(),
            set.streets.len()
        );
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction() {
        let client = OsmClient::with_default_endpoint().unwrap();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);

        let custom = OsmClient::new("http://localhost:9000/api", Duration::from_secs(5)).unwrap();
        assert_eq!(custom.endpoint(), "http://localhost:9000/api");
    }
}
