//! Face Service - Core business logic
//!
//! Orchestrates the embedding provider, the matcher and the face store.
//! Every mutation runs load-mutate-save under one process-wide lock.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::RecognitionConfig;
use crate::engine::{Embedding, EmbeddingProvider};
use crate::storage::{FaceRecord, FaceStore};

use super::matcher::{self, EmptyDatabase};
use super::types::*;

/// Face registry service
pub struct FaceService<S: FaceStore, P: EmbeddingProvider> {
    store: Arc<S>,
    provider: Arc<P>,
    config: RecognitionConfig,
    write_lock: Mutex<()>,
}

impl<S: FaceStore, P: EmbeddingProvider> FaceService<S, P> {
    /// Create a new face service
    pub fn new(store: Arc<S>, provider: Arc<P>, config: RecognitionConfig) -> Self {
        Self {
            store,
            provider,
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Get a reference to the store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    async fn encode(&self, image_data: &[u8]) -> Result<Vec<Embedding>, FaceError> {
        let faces = self.provider.detect_and_encode(image_data).await?;
        debug!("Detected {} face(s)", faces.len());
        Ok(faces)
    }

    /// Register the single face in `image_data` under `name`.
    ///
    /// Rejects images with zero or several faces, and faces already
    /// registered under any name.
    pub async fn add_face(&self, image_data: &[u8], name: &str) -> Result<AddResult, FaceError> {
        let mut faces = self.encode(image_data).await?;

        let encoding = match faces.len() {
            0 => return Err(FaceError::NoFace),
            1 => faces.remove(0),
            n => return Err(FaceError::MultipleFaces(n)),
        };

        let _guard = self.write_lock.lock().await;
        let mut db = self.store.load().await?;

        if let Some(expected) = db.dim() {
            if expected != encoding.len() {
                return Err(FaceError::DimensionMismatch {
                    expected,
                    actual: encoding.len(),
                });
            }
        }

        if let Some(existing) =
            matcher::is_duplicate(&encoding, &db, self.config.duplicate_threshold)
        {
            debug!("Rejecting '{}': matches registered face '{}'", name, existing);
            return Err(FaceError::Duplicate(existing.to_string()));
        }

        db.faces.push(FaceRecord::new(name, encoding));
        self.store.save(&db).await?;

        info!("Registered face for {} ({} total)", name, db.len());

        Ok(AddResult {
            name: name.to_string(),
            total_faces: db.len(),
        })
    }

    /// Remove every face registered under exactly `name`
    pub async fn delete_face(&self, name: &str) -> Result<DeleteResult, FaceError> {
        let _guard = self.write_lock.lock().await;
        let mut db = self.store.load().await?;

        let deleted = db.remove_name(name);
        if deleted == 0 {
            return Err(FaceError::NameNotFound(name.to_string()));
        }

        self.store.save(&db).await?;
        info!("Deleted {} face(s) for {}", deleted, name);

        Ok(DeleteResult {
            name: name.to_string(),
            deleted,
        })
    }

    /// Rank every registered face against the first face in `image_data`.
    ///
    /// Extra faces in the image are ignored.
    pub async fn recognize_face(&self, image_data: &[u8]) -> Result<RecognizeResult, FaceError> {
        let faces = self.encode(image_data).await?;
        let probe = faces.first().ok_or(FaceError::NoFace)?;

        let db = self.store.load().await?;
        let all_matches = matcher::rank(probe, &db).map_err(|EmptyDatabase| FaceError::EmptyDatabase)?;
        let best_match = all_matches.first().cloned().ok_or(FaceError::NoMatches)?;

        debug!(
            "Best match {} ({:.4}) out of {}",
            best_match.name,
            best_match.confidence,
            all_matches.len()
        );

        Ok(RecognizeResult {
            best_match,
            all_matches,
        })
    }

    /// Registered names with their record counts
    pub async fn list_names(&self) -> Result<Vec<NameCount>, FaceError> {
        let db = self.store.load().await?;
        Ok(db
            .name_counts()
            .into_iter()
            .map(|(name, count)| NameCount {
                name: name.to_string(),
                count,
            })
            .collect())
    }

    /// Get health status
    pub async fn health(&self) -> HealthResult {
        let (healthy, total_faces) = match self.store.load().await {
            Ok(db) => (true, db.len()),
            Err(_) => (false, 0),
        };

        HealthResult {
            healthy,
            version: env!("CARGO_PKG_VERSION").to_string(),
            total_faces,
        }
    }
}
