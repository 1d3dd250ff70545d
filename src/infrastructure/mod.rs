//! Infrastructure layer: adapters for embedding providers, indexing and
//! persistence

pub mod embedding;
pub mod index;
pub mod knowledge_base;
pub mod logging;
