//! Embedding engine module
//!
//! Face detection and encoding are delegated to an external provider:
//! - `EmbeddingProvider` trait as the seam
//! - `RemoteProvider` talking to an HTTP face-encoding service

pub mod provider;
pub mod remote;

pub use provider::{Embedding, EmbeddingProvider, ProviderError};
pub use remote::RemoteProvider;
