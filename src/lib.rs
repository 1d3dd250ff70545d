//! vector-kb
//!
//! Embedding-indexed knowledge base with support for:
//! - Document ingestion with batch embedding generation
//! - Exact cosine-similarity search over a flat vector index
//! - Token-bounded context assembly for prompt construction
//! - Snapshot persistence across restarts

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    Document, DocumentSummary, DomainError, KnowledgeBaseStats, Relevance, SearchHit,
};
pub use infrastructure::knowledge_base::KnowledgeBase;

use std::sync::Arc;
use std::time::Duration;

use infrastructure::embedding::{HttpClient, OpenAiEmbeddingProvider};
use infrastructure::knowledge_base::SnapshotStore;
use tracing::info;

/// Build a knowledge base from configuration and load its snapshot.
///
/// Wires the OpenAI embedding provider behind the configured timeout and
/// points the snapshot store at `knowledge_base.index_path`. The API key
/// comes from config or the `OPENAI_API_KEY` environment variable; a missing
/// key is a configuration error rather than a deferred runtime failure.
pub async fn create_knowledge_base(config: &AppConfig) -> anyhow::Result<Arc<KnowledgeBase>> {
    let api_key = config
        .embedding
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .ok_or_else(|| {
            anyhow::anyhow!("no embedding API key configured (set OPENAI_API_KEY)")
        })?;

    let timeout = Duration::from_secs(config.embedding.timeout_secs);
    let client = HttpClient::with_timeout(timeout)?;

    let provider = match &config.embedding.api_base_url {
        Some(base_url) => {
            info!(base_url = %base_url, "using embedding provider with custom base URL");
            OpenAiEmbeddingProvider::with_base_url(client, api_key, base_url)
        }
        None => OpenAiEmbeddingProvider::new(client, api_key),
    };

    let snapshots = SnapshotStore::new(&config.knowledge_base.index_path);

    let kb = KnowledgeBase::new(Arc::new(provider), config.embedding.model.clone(), snapshots)
        .with_embed_timeout(timeout)
        .with_search_defaults(
            config.knowledge_base.default_top_k,
            config.knowledge_base.default_min_score,
        )
        .with_context_budget(config.knowledge_base.default_max_tokens);
    kb.load().await?;

    Ok(Arc::new(kb))
}
