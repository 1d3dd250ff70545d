//! Flat inner-product vector index
//!
//! Exact top-K search over L2-normalized vectors. Inner product over unit
//! vectors equals cosine similarity, so scores fall in [-1, 1]. The index is
//! rebuilt wholesale from the embedding matrix on every ingest; there is no
//! incremental insert path.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Exact inner-product index over normalized vectors
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FlatIndex {
    /// Fixed by the first non-empty build; sticky across rebuilds
    dimension: Option<usize>,
    /// Row vectors, L2-normalized at build time
    vectors: Vec<Vec<f32>>,
}

/// L2-normalize a vector in place.
///
/// The single normalization code path for both stored vectors and queries: a
/// query normalized differently from stored rows silently corrupts ranking.
/// Zero vectors are left untouched (their inner product is 0 regardless).
fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}

impl FlatIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the index contents with a fresh build over the given vectors.
    ///
    /// The dimension is fixed by the first non-empty build; a later build
    /// with a different dimension indicates an embedder swap without a full
    /// rebuild and is a fatal internal error.
    pub fn build(&mut self, vectors: &[Vec<f32>]) -> Result<(), DomainError> {
        let Some(first) = vectors.first() else {
            self.vectors.clear();
            return Ok(());
        };

        let dim = first.len();
        if let Some(expected) = self.dimension {
            if dim != expected {
                return Err(DomainError::dimension_mismatch(expected, dim));
            }
        }

        let mut rows = Vec::with_capacity(vectors.len());
        for vector in vectors {
            if vector.len() != dim {
                return Err(DomainError::dimension_mismatch(dim, vector.len()));
            }
            let mut row = vector.clone();
            l2_normalize(&mut row);
            rows.push(row);
        }

        self.dimension = Some(dim);
        self.vectors = rows;

        Ok(())
    }

    /// Top-K search by inner product.
    ///
    /// Returns `(row_index, score)` pairs in descending score order, at most
    /// `top_k` of them, and an empty list when the index is empty. The query
    /// is normalized through the same code path as stored vectors.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<(usize, f32)>, DomainError> {
        if self.vectors.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let dim = self.dimension.unwrap_or_default();
        if query.len() != dim {
            return Err(DomainError::dimension_mismatch(dim, query.len()));
        }

        let mut normalized = query.to_vec();
        l2_normalize(&mut normalized);

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(row, vector)| {
                let score: f32 = vector.iter().zip(&normalized).map(|(a, b)| a * b).sum();
                (row, score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);

        Ok(scored)
    }

    /// Number of vectors in the index
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector dimension, if fixed by a non-empty build
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}
