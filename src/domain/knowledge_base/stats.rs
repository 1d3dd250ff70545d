//! Knowledge base statistics

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Aggregate statistics over the knowledge base contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseStats {
    /// Total number of documents
    pub total_documents: usize,
    /// Document count per category
    pub categories: HashMap<String, usize>,
    /// Embedding model identifier
    pub model_name: String,
    /// Number of vectors in the index
    pub index_size: usize,
}
