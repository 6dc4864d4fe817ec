//! Service layer module

pub mod face_service;
pub mod matcher;
pub mod types;

pub use face_service::FaceService;
pub use matcher::{Match, DEFAULT_DUPLICATE_THRESHOLD};
pub use types::*;
