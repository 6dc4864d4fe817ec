//! In-memory storage implementation

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::{FaceDatabase, FaceStore, StorageError};

/// Face store that keeps the database in process memory
#[derive(Default)]
pub struct MemoryStore {
    db: RwLock<FaceDatabase>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(db: FaceDatabase) -> Self {
        Self { db: RwLock::new(db) }
    }

    /// Current contents, without going through the async trait
    pub fn snapshot(&self) -> FaceDatabase {
        self.db.read().clone()
    }
}

#[async_trait]
impl FaceStore for MemoryStore {
    async fn load(&self) -> Result<FaceDatabase, StorageError> {
        Ok(self.db.read().clone())
    }

    async fn save(&self, db: &FaceDatabase) -> Result<(), StorageError> {
        *self.db.write() = db.clone();
        Ok(())
    }
}
