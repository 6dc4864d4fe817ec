//! Linear-scan matching of one embedding against the face database

use serde::Serialize;
use tracing::warn;

use crate::storage::{FaceDatabase, FaceRecord};
use crate::utils::math::euclidean_distance;

/// Distance under which two embeddings are the same person, by the
/// provider's convention
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.6;

/// A ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub name: String,
    /// `1 - distance`; only meaningful for ordering
    pub confidence: f64,
}

/// Ranking against an empty database
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no faces in the database")]
pub struct EmptyDatabase;

fn distance_to(candidate: &[f64], face: &FaceRecord) -> Option<f64> {
    let distance = euclidean_distance(candidate, &face.encoding);
    if distance.is_none() {
        warn!(
            "Skipping '{}': stored embedding has {} dimensions, candidate has {}",
            face.name,
            face.dim(),
            candidate.len()
        );
    }
    distance
}

/// Name of the first record, in insertion order, closer than `threshold`.
///
/// First match wins even if a later record is closer.
pub fn is_duplicate<'a>(candidate: &[f64], db: &'a FaceDatabase, threshold: f64) -> Option<&'a str> {
    db.faces
        .iter()
        .find(|face| matches!(distance_to(candidate, face), Some(d) if d < threshold))
        .map(|face| face.name.as_str())
}

/// Every record scored by `1 - distance`, best first. Ties keep insertion order.
pub fn rank(candidate: &[f64], db: &FaceDatabase) -> Result<Vec<Match>, EmptyDatabase> {
    if db.is_empty() {
        return Err(EmptyDatabase);
    }

    let mut matches: Vec<Match> = db
        .faces
        .iter()
        .filter_map(|face| {
            distance_to(candidate, face).map(|d| Match {
                name: face.name.clone(),
                confidence: 1.0 - d,
            })
        })
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(records: &[(&str, &[f64])]) -> FaceDatabase {
        FaceDatabase {
            faces: records
                .iter()
                .map(|(name, enc)| FaceRecord::new(*name, enc.to_vec()))
                .collect(),
        }
    }

    #[test]
    fn test_is_duplicate_empty_database() {
        assert_eq!(is_duplicate(&[0.0, 0.0], &FaceDatabase::default(), 0.6), None);
    }

    #[test]
    fn test_is_duplicate_threshold_is_strict() {
        let db = db(&[("alice", &[0.6, 0.0])]);
        assert_eq!(is_duplicate(&[0.0, 0.0], &db, 0.6), None);
        assert_eq!(is_duplicate(&[0.0, 0.0], &db, 0.6000001), Some("alice"));
    }

    #[test]
    fn test_is_duplicate_first_match_not_closest() {
        let db = db(&[
            ("far", &[3.0, 0.0]),
            ("first", &[0.5, 0.0]),
            ("closest", &[0.1, 0.0]),
        ]);
        assert_eq!(is_duplicate(&[0.0, 0.0], &db, 0.6), Some("first"));
    }

    #[test]
    fn test_is_duplicate_iff_some_record_within_threshold() {
        let stored = db(&[("a", &[1.0, 1.0]), ("b", &[-1.0, 2.0]), ("c", &[0.2, 0.3])]);
        let probes: [[f64; 2]; 5] = [[0.0, 0.0], [1.0, 1.2], [-0.5, 2.0], [5.0, 5.0], [0.25, 0.25]];

        for probe in probes {
            for threshold in [0.1, 0.4, 0.6, 1.0, 2.0] {
                let expected = stored
                    .faces
                    .iter()
                    .find(|f| euclidean_distance(&probe, &f.encoding).unwrap() < threshold)
                    .map(|f| f.name.as_str());
                assert_eq!(
                    is_duplicate(&probe, &stored, threshold),
                    expected,
                    "probe {probe:?} threshold {threshold}"
                );
            }
        }
    }

    #[test]
    fn test_is_duplicate_skips_mismatched_dimensions() {
        let db = db(&[("short", &[0.0]), ("alice", &[0.0, 0.1])]);
        assert_eq!(is_duplicate(&[0.0, 0.0], &db, 0.6), Some("alice"));
    }

    #[test]
    fn test_rank_empty_database() {
        assert_eq!(rank(&[0.0], &FaceDatabase::default()), Err(EmptyDatabase));
    }

    #[test]
    fn test_rank_exact_match_is_first_with_full_confidence() {
        let db = db(&[("bob", &[0.3, 0.4]), ("alice", &[0.1, 0.2])]);
        let matches = rank(&[0.1, 0.2], &db).unwrap();
        assert_eq!(matches[0], Match { name: "alice".to_string(), confidence: 1.0 });
        assert_eq!(matches[1].name, "bob");
        assert!(matches[1].confidence < 1.0);
    }

    #[test]
    fn test_rank_scores_every_record_without_threshold() {
        let db = db(&[("near", &[1.0, 0.0]), ("far", &[0.0, 10.0]), ("mid", &[0.0, 2.0])]);
        let matches = rank(&[0.0, 0.0], &db).unwrap();
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["near", "mid", "far"]);
        assert!((matches[0].confidence - 0.0).abs() < 1e-12);
        assert!((matches[1].confidence + 1.0).abs() < 1e-12);
        assert!((matches[2].confidence + 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_ties_keep_insertion_order() {
        let db = db(&[
            ("first", &[1.0, 0.0]),
            ("closer", &[0.5, 0.0]),
            ("second", &[0.0, 1.0]),
            ("third", &[-1.0, 0.0]),
        ]);
        let matches = rank(&[0.0, 0.0], &db).unwrap();
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["closer", "first", "second", "third"]);
    }

    #[test]
    fn test_rank_skips_mismatched_dimensions() {
        let db = db(&[("short", &[0.0]), ("alice", &[0.0, 0.0])]);
        let matches = rank(&[0.0, 0.0], &db).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "alice");
    }
}
