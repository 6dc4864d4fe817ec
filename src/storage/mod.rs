//! Storage module for face data persistence

pub mod traits;
pub mod json;
pub mod memory;

pub use traits::{FaceDatabase, FaceRecord, FaceStore, StorageError};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
