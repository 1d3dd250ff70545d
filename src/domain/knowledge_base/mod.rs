//! Knowledge base domain types: documents, search hits, context assembly

pub mod context;
mod document;
mod hit;
mod stats;
mod store;

pub use document::{Document, DocumentSummary};
pub use hit::{Relevance, SearchHit};
pub use stats::KnowledgeBaseStats;
pub use store::DocumentStore;
