//! Domain layer - core retrieval logic and ports

pub mod embedding;
pub mod error;
pub mod knowledge_base;

pub use embedding::{
    Embedding, EmbeddingInput, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
    EmbeddingUsage,
};
pub use error::DomainError;
pub use knowledge_base::{
    Document, DocumentStore, DocumentSummary, KnowledgeBaseStats, Relevance, SearchHit,
};
