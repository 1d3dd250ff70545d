//! Search hit and relevance classification types

use serde::{Deserialize, Serialize};

use super::document::Document;

/// Relevance bucket derived from the similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

impl Relevance {
    /// Classify a cosine similarity score into a bucket
    pub fn from_score(score: f32) -> Self {
        if score > 0.8 {
            Relevance::High
        } else if score > 0.6 {
            Relevance::Medium
        } else {
            Relevance::Low
        }
    }
}

impl std::fmt::Display for Relevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relevance::High => write!(f, "high"),
            Relevance::Medium => write!(f, "medium"),
            Relevance::Low => write!(f, "low"),
        }
    }
}

/// A single ranked search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matched document
    pub document: Document,
    /// Cosine similarity score in [-1, 1]
    pub score: f32,
    /// Relevance bucket for the score
    pub relevance: Relevance,
}

impl SearchHit {
    /// Create a hit, deriving the relevance bucket from the score
    pub fn new(document: Document, score: f32) -> Self {
        Self {
            document,
            score,
            relevance: Relevance::from_score(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevance_buckets() {
        assert_eq!(Relevance::from_score(0.95), Relevance::High);
        assert_eq!(Relevance::from_score(0.7), Relevance::Medium);
        assert_eq!(Relevance::from_score(0.5), Relevance::Low);
        assert_eq!(Relevance::from_score(-0.2), Relevance::Low);
    }

    #[test]
    fn test_relevance_bucket_boundaries() {
        // Boundaries are exclusive: exactly 0.8 is medium, exactly 0.6 is low
        assert_eq!(Relevance::from_score(0.8), Relevance::Medium);
        assert_eq!(Relevance::from_score(0.6), Relevance::Low);
    }

    #[test]
    fn test_search_hit_derives_relevance() {
        let doc = Document::new("d1", "Title", "content", "Banking");
        let hit = SearchHit::new(doc, 0.85);

        assert_eq!(hit.relevance, Relevance::High);
        assert_eq!(hit.document.id, "d1");
    }

    #[test]
    fn test_relevance_serializes_lowercase() {
        let json = serde_json::to_string(&Relevance::High).unwrap();
        assert_eq!(json, "\"high\"");
    }
}
