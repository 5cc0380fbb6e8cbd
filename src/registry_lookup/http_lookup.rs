use super::{config::HttpRegistryConfig, lookup::RegistryLookup, VerificationResult};
use crate::observability::metrics::record_registry_lookup;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("identifier not found in registry")]
    NotFound,

    #[error("Error making HTTP request: {0}")]
    Request(String),

    #[error("Unexpected HTTP status code {0}")]
    UnexpectedStatus(u16),

    #[error("Invalid registry response: {0}")]
    Decode(String),
}

/// Looks identifiers up in a JSON registry service reachable over HTTP.
///
/// The service answers `2xx` with a [VerificationResult] body (camelCase fields) and `404` for
/// unknown identifiers.
pub struct HttpRegistryLookup {
    config: HttpRegistryConfig,
    client: Client,
}

impl HttpRegistryLookup {
    pub fn new(config: HttpRegistryConfig) -> Self {
        HttpRegistryLookup {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &HttpRegistryConfig {
        &self.config
    }

    async fn request(&self, normalized_identifier: &str) -> Result<VerificationResult, LookupError> {
        let mut request_builder = self
            .client
            .get(self.config.endpoint_for(normalized_identifier))
            .timeout(self.config.timeout);
        for (key, value) in self.config.headers_for(normalized_identifier) {
            request_builder = request_builder.header(key, value);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|err| LookupError::Request(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::UnexpectedStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| LookupError::Request(err.to_string()))?;
        serde_json::from_str(&body).map_err(|err| LookupError::Decode(err.to_string()))
    }
}

#[async_trait]
impl RegistryLookup for HttpRegistryLookup {
    async fn lookup(&self, normalized_identifier: &str) -> VerificationResult {
        let result = self
            .request(normalized_identifier)
            .await
            .unwrap_or_else(|err| VerificationResult::failed(err.to_string()));
        record_registry_lookup(&result);
        result
    }
}
