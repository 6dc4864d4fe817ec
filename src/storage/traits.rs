//! Storage abstraction traits
//!
//! The whole face database is loaded and saved as one document.
//! Implementations can be swapped between the JSON file and memory.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A registered face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    /// Free-form name, not unique
    pub name: String,
    /// Face embedding as produced by the provider
    pub encoding: Vec<f64>,
}

impl FaceRecord {
    pub fn new(name: impl Into<String>, encoding: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            encoding,
        }
    }

    pub fn dim(&self) -> usize {
        self.encoding.len()
    }
}

/// All registered faces, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceDatabase {
    #[serde(default)]
    pub faces: Vec<FaceRecord>,
}

impl FaceDatabase {
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Embedding length shared by the stored records, from the first one
    pub fn dim(&self) -> Option<usize> {
        self.faces.first().map(FaceRecord::dim)
    }

    /// Remove every record named exactly `name`, returning how many went
    pub fn remove_name(&mut self, name: &str) -> usize {
        let before = self.faces.len();
        self.faces.retain(|face| face.name != name);
        before - self.faces.len()
    }

    /// Distinct names in first-insertion order with their record counts
    pub fn name_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for face in &self.faces {
            match counts.iter_mut().find(|(name, _)| *name == face.name) {
                Some((_, count)) => *count += 1,
                None => counts.push((&face.name, 1)),
            }
        }
        counts
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("face database at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize face database: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Face store trait
///
/// Callers own the load-mutate-save sequence; implementations do no locking
/// across calls.
#[async_trait]
pub trait FaceStore: Send + Sync + 'static {
    /// Read the whole database. A store that has never been saved is empty.
    async fn load(&self) -> Result<FaceDatabase, StorageError>;

    /// Replace the whole database
    async fn save(&self, db: &FaceDatabase) -> Result<(), StorageError>;
}
