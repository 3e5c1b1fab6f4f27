//! Canonical school records.
//!
//! The remote service has grown three incompatible school shapes over time
//! (differing field casing, fee units, and location encodings). Exactly one
//! canonical shape exists on this side of the gateway boundary; all mapping
//! from wire shapes happens in the gateway implementation.

use serde::{Deserialize, Serialize};

/// Geographic coordinates of a school.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// A canonical school record.
///
/// Favorites hold these as snapshots taken at add-time; they are never
/// mutated in place afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: String,
    pub name: String,
    /// School type, e.g. "Public" or "Private"
    #[serde(rename = "type")]
    pub kind: String,
    pub curriculum: String,
    pub rating: f64,
    /// Annual tuition in dollars
    pub tuition: f64,
    pub focus: String,
    pub facilities: String,
    pub location: Location,
    pub student_teacher_ratio: f64,
    pub test_scores: f64,
}

/// A school returned by the recommender, optionally carrying a similarity
/// score relative to the user's interaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedSchool {
    #[serde(flatten)]
    pub school: School,
    pub similarity_score: Option<f64>,
}
