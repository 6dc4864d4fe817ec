//! JSON file storage implementation
//!
//! The database lives in a single pretty-printed JSON document. Saves write a
//! sibling temp file and rename it into place; the database file is never
//! observed half-written.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use super::traits::{FaceDatabase, FaceStore, StorageError};

/// JSON file backed face store
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "face_database.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn ensure_parent(&self) -> Result<(), StorageError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StorageError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })
            }
            _ => Ok(()),
        }
    }
}

/// Four-space indented JSON, matching the historic file layout
fn to_pretty_json(db: &FaceDatabase) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    db.serialize(&mut ser)?;
    Ok(buf)
}

#[async_trait]
impl FaceStore for JsonFileStore {
    async fn load(&self) -> Result<FaceDatabase, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No face database at {:?}, starting empty", self.path);
                self.ensure_parent().await?;
                return Ok(FaceDatabase::default());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, db: &FaceDatabase) -> Result<(), StorageError> {
        self.ensure_parent().await?;

        let bytes = to_pretty_json(db)?;
        let tmp = self.tmp_path();

        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|source| StorageError::Io {
                path: tmp.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })?;

        info!("Saved {} face(s) to {:?}", db.len(), self.path);
        Ok(())
    }
}
