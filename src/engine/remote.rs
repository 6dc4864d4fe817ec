//! Remote embedding provider
//!
//! Posts the raw image to an external face-encoding endpoint and expects
//! `{"encodings": [[f64, ...], ...]}` back.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::provider::{check_dim, Embedding, EmbeddingProvider, ProviderError};
use crate::config::{ProviderConfig, RecognitionConfig};

#[derive(Debug, Deserialize)]
struct EncodeResponse {
    encodings: Vec<Embedding>,
}

/// HTTP client for an external face-encoding service
pub struct RemoteProvider {
    client: reqwest::Client,
    endpoint: String,
    embedding_dim: Option<usize>,
}

impl RemoteProvider {
    pub fn new(provider: &ProviderConfig, recognition: &RecognitionConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(provider.timeout_ms))
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: provider.endpoint.clone(),
            embedding_dim: recognition.embedding_dim,
        })
    }
}

/// Parse an encode response body and validate embedding lengths
fn parse_encodings(body: &[u8], embedding_dim: Option<usize>) -> Result<Vec<Embedding>, ProviderError> {
    let parsed: EncodeResponse =
        serde_json::from_slice(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    check_dim(&parsed.encodings, embedding_dim)?;
    Ok(parsed.encodings)
}

#[async_trait]
impl EmbeddingProvider for RemoteProvider {
    async fn detect_and_encode(&self, image: &[u8]) -> Result<Vec<Embedding>, ProviderError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        let encodings = parse_encodings(&body, self.embedding_dim)?;

        debug!("Provider found {} face(s) in {} byte image", encodings.len(), image.len());
        Ok(encodings)
    }
}
