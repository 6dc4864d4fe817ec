//! Service layer types

use serde::Serialize;

use super::matcher::Match;
use crate::engine::ProviderError;
use crate::storage::StorageError;

/// Successful registration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddResult {
    pub name: String,
    pub total_faces: usize,
}

/// Successful deletion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteResult {
    pub name: String,
    pub deleted: usize,
}

/// Face identification result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognizeResult {
    pub best_match: Match,
    pub all_matches: Vec<Match>,
}

/// A registered name and how many records carry it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

/// Health check result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthResult {
    pub healthy: bool,
    pub version: String,
    pub total_faces: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum FaceError {
    #[error("No face found in the image")]
    NoFace,

    #[error("Multiple faces found in the image. Please provide an image with only one face.")]
    MultipleFaces(usize),

    #[error("This face appears to be already registered under the name: {0}")]
    Duplicate(String),

    #[error("Face embedding has {actual} dimensions but registered faces have {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("No faces in the database")]
    EmptyDatabase,

    #[error("No matches found")]
    NoMatches,

    #[error("No face found with name: {0}")]
    NameNotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl FaceError {
    /// Caller-side problem with the submitted image or state, as opposed to
    /// a lookup miss or an infrastructure failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FaceError::NoFace
                | FaceError::MultipleFaces(_)
                | FaceError::Duplicate(_)
                | FaceError::DimensionMismatch { .. }
                | FaceError::EmptyDatabase
                | FaceError::NoMatches
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_wire_contract() {
        assert_eq!(FaceError::NoFace.to_string(), "No face found in the image");
        assert_eq!(
            FaceError::MultipleFaces(3).to_string(),
            "Multiple faces found in the image. Please provide an image with only one face."
        );
        assert_eq!(
            FaceError::Duplicate("alice".into()).to_string(),
            "This face appears to be already registered under the name: alice"
        );
        assert_eq!(FaceError::EmptyDatabase.to_string(), "No faces in the database");
        assert_eq!(
            FaceError::NameNotFound("bob".into()).to_string(),
            "No face found with name: bob"
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(FaceError::NoFace.is_validation());
        assert!(FaceError::EmptyDatabase.is_validation());
        assert!(!FaceError::NameNotFound("x".into()).is_validation());
        assert!(!FaceError::Provider(ProviderError::Transport("down".into())).is_validation());
    }
}
