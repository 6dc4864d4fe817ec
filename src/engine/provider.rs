//! Embedding provider abstraction
//!
//! Face detection and feature extraction happen outside this service. A
//! provider turns raw image bytes into one embedding per detected face.

use async_trait::async_trait;

/// A face embedding. Distances between embeddings are Euclidean.
pub type Embedding = Vec<f64>;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("embedding provider unreachable: {0}")]
    Transport(String),

    #[error("embedding provider rejected the image ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed embedding provider response: {0}")]
    Malformed(String),

    #[error("embedding provider returned {actual}-dimensional embedding, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Detects faces in an image and encodes each one
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + 'static {
    /// One embedding per detected face, in image scan order. An empty list
    /// means no face was found.
    async fn detect_and_encode(&self, image: &[u8]) -> Result<Vec<Embedding>, ProviderError>;
}

/// Reject embeddings whose length differs from `expected`
pub fn check_dim(embeddings: &[Embedding], expected: Option<usize>) -> Result<(), ProviderError> {
    if let Some(expected) = expected {
        if let Some(bad) = embeddings.iter().find(|e| e.len() != expected) {
            return Err(ProviderError::DimensionMismatch {
                expected,
                actual: bad.len(),
            });
        }
    }
    Ok(())
}
