//! Knowledge base orchestrator
//!
//! Owns the document store, the raw embedding matrix and the vector index
//! behind a single `tokio::sync::RwLock`, so mutations (`ingest`, `load`)
//! are serialized while searches run concurrently. The index is rebuilt from
//! the full embedding matrix on every ingest; with a flat exact index there
//! is no cheaper incremental path that keeps scores identical.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::snapshot::{Snapshot, SnapshotMetadata, SnapshotStore};
use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::knowledge_base::{
    context, Document, DocumentStore, DocumentSummary, KnowledgeBaseStats, SearchHit,
};
use crate::domain::DomainError;
use crate::infrastructure::index::FlatIndex;

/// Default number of hits returned by a search
pub const DEFAULT_TOP_K: usize = 5;
/// Default minimum similarity score for a hit to be returned (inclusive)
pub const DEFAULT_MIN_SCORE: f32 = 0.5;
/// Number of candidates considered when assembling context
pub const CONTEXT_TOP_K: usize = 10;
/// Default token budget for context assembly
pub const DEFAULT_MAX_TOKENS: usize = 2000;
/// Default timeout for a single embedding provider call
pub const DEFAULT_EMBED_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default)]
struct State {
    documents: DocumentStore,
    /// Raw (unnormalized) embedding rows, positionally aligned with the store
    embeddings: Vec<Vec<f32>>,
    index: FlatIndex,
}

/// Embedding-indexed knowledge base
///
/// Construction is explicit: callers build it, call [`load`](Self::load) once
/// to pick up a persisted snapshot, and inject it where needed. There is no
/// global instance and no lazy initialization on first use.
#[derive(Debug)]
pub struct KnowledgeBase {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
    snapshots: SnapshotStore,
    embed_timeout: Duration,
    default_top_k: usize,
    default_min_score: f32,
    default_max_tokens: usize,
    state: RwLock<State>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        model: impl Into<String>,
        snapshots: SnapshotStore,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            snapshots,
            embed_timeout: Duration::from_secs(DEFAULT_EMBED_TIMEOUT_SECS),
            default_top_k: DEFAULT_TOP_K,
            default_min_score: DEFAULT_MIN_SCORE,
            default_max_tokens: DEFAULT_MAX_TOKENS,
            state: RwLock::new(State::default()),
        }
    }

    /// Set the timeout applied to every embedding provider call
    pub fn with_embed_timeout(mut self, embed_timeout: Duration) -> Self {
        self.embed_timeout = embed_timeout;
        self
    }

    /// Set the `top_k` and `min_score` used by the default search surface.
    ///
    /// `min_score` also becomes the threshold applied during context
    /// assembly.
    pub fn with_search_defaults(mut self, top_k: usize, min_score: f32) -> Self {
        self.default_top_k = top_k;
        self.default_min_score = min_score;
        self
    }

    /// Set the token budget used by the default context surface
    pub fn with_context_budget(mut self, max_tokens: usize) -> Self {
        self.default_max_tokens = max_tokens;
        self
    }

    /// Embedding model identifier this base was built with
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Load the persisted snapshot into memory.
    ///
    /// A missing, corrupt, inconsistent or wrong-model snapshot degrades to
    /// an empty knowledge base with a warning; it never fails startup.
    pub async fn load(&self) -> Result<(), DomainError> {
        let mut guard = self.state.write().await;
        *guard = State::default();

        match self.snapshots.load().await {
            Ok(None) => {
                warn!(
                    dir = %self.snapshots.dir().display(),
                    "no snapshot found, starting with an empty knowledge base"
                );
            }
            Ok(Some(snapshot)) => {
                if snapshot.metadata.model_name != self.model {
                    warn!(
                        snapshot_model = %snapshot.metadata.model_name,
                        configured_model = %self.model,
                        "snapshot was built with a different embedding model, starting empty"
                    );
                } else {
                    guard.documents = DocumentStore::from_documents(snapshot.documents);
                    guard.embeddings = snapshot.embeddings;
                    guard.index = snapshot.index;
                    Self::check_alignment(&guard)?;

                    info!(
                        documents = guard.documents.len(),
                        model = %self.model,
                        "knowledge base loaded from snapshot"
                    );
                }
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "failed to load snapshot, starting with an empty knowledge base"
                );
            }
        }

        Ok(())
    }

    /// Ingest documents: embed their contents, append them, rebuild the
    /// index and persist a snapshot.
    ///
    /// An empty input is a no-op and does not touch the provider or disk.
    pub async fn ingest(&self, documents: Vec<Document>) -> Result<(), DomainError> {
        if documents.is_empty() {
            debug!("ingest called with no documents");
            return Ok(());
        }

        let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let vectors = self.embed_batch(texts, "ingest").await?;

        let mut guard = self.state.write().await;
        let state = &mut *guard;

        // Stage the extended matrix and the rebuilt index before touching
        // state: a failed build (e.g. the provider's dimension drifted) must
        // leave the previous, aligned state in place.
        let mut embeddings = state.embeddings.clone();
        embeddings.extend(vectors);
        let mut index = state.index.clone();
        index.build(&embeddings)?;

        state.documents.append(documents);
        state.embeddings = embeddings;
        state.index = index;
        Self::check_alignment(state)?;

        info!(
            total_documents = state.documents.len(),
            "documents ingested, index rebuilt"
        );

        self.save_locked(state).await
    }

    /// Search for the `top_k` most similar documents with a score of at
    /// least `min_score`.
    ///
    /// An empty knowledge base or a blank query returns an empty list
    /// without calling the embedding provider. Both parameters pass through
    /// as given; there is no clamping.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        min_score: f32,
    ) -> Result<Vec<SearchHit>, DomainError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        {
            let guard = self.state.read().await;
            if guard.documents.is_empty() {
                return Ok(Vec::new());
            }
        }

        let mut vectors = self.embed_batch(vec![query.to_string()], "search").await?;
        let query_vector = vectors.pop().ok_or_else(|| {
            DomainError::embedding("search", "provider returned no vector for the query")
        })?;

        // The store is append-only, so the base cannot have emptied while
        // the lock was released for the provider call.
        let guard = self.state.read().await;
        let candidates = guard.index.search(&query_vector, top_k)?;

        let mut hits = Vec::with_capacity(candidates.len());
        for (row, score) in candidates {
            if score < min_score {
                continue;
            }
            let Some(document) = guard.documents.get(row) else {
                warn!(row, "index returned a row with no backing document, skipping");
                continue;
            };
            hits.push(SearchHit::new(document.clone(), score));
        }

        debug!(query_len = query.len(), hits = hits.len(), "search completed");

        Ok(hits)
    }

    /// Search with the configured default `top_k` and `min_score`
    pub async fn search_with_defaults(
        &self,
        query: &str,
    ) -> Result<Vec<SearchHit>, DomainError> {
        self.search(query, self.default_top_k, self.default_min_score)
            .await
    }

    /// Assemble a token-bounded context string for the query.
    ///
    /// Considers up to [`CONTEXT_TOP_K`] hits above the configured minimum
    /// score and packs whole blocks in rank order. Returns an empty string
    /// when nothing clears the threshold or nothing fits the budget.
    pub async fn get_context(
        &self,
        query: &str,
        max_tokens: usize,
    ) -> Result<String, DomainError> {
        let hits = self
            .search(query, CONTEXT_TOP_K, self.default_min_score)
            .await?;
        Ok(context::assemble(&hits, max_tokens))
    }

    /// Assemble context under the configured default token budget
    pub async fn get_context_with_defaults(&self, query: &str) -> Result<String, DomainError> {
        self.get_context(query, self.default_max_tokens).await
    }

    /// Aggregate statistics over the current contents
    pub async fn get_stats(&self) -> KnowledgeBaseStats {
        let guard = self.state.read().await;

        let mut categories: HashMap<String, usize> = HashMap::new();
        for document in guard.documents.all() {
            *categories.entry(document.category.clone()).or_insert(0) += 1;
        }

        KnowledgeBaseStats {
            total_documents: guard.documents.len(),
            categories,
            model_name: self.model.clone(),
            index_size: guard.index.len(),
        }
    }

    /// List document summaries, optionally restricted to one category
    pub async fn list(&self, category: Option<&str>) -> Vec<DocumentSummary> {
        let guard = self.state.read().await;
        guard
            .documents
            .filter(|d| category.is_none_or(|c| d.category == c))
            .into_iter()
            .map(Document::summary)
            .collect()
    }

    /// Persist the current state as a snapshot
    pub async fn save(&self) -> Result<(), DomainError> {
        let guard = self.state.read().await;
        self.save_locked(&guard).await
    }

    /// Flush state to disk; call once at shutdown
    pub async fn flush(&self) -> Result<(), DomainError> {
        info!("flushing knowledge base to disk");
        self.save().await
    }

    async fn save_locked(&self, state: &State) -> Result<(), DomainError> {
        let snapshot = Snapshot {
            metadata: SnapshotMetadata {
                model_name: self.model.clone(),
                num_documents: state.documents.len(),
                embedding_dimension: state.index.dimension().unwrap_or(0),
                saved_at: Utc::now(),
            },
            documents: state.documents.all().to_vec(),
            embeddings: state.embeddings.clone(),
            index: state.index.clone(),
        };

        self.snapshots.save(&snapshot).await
    }

    async fn embed_batch(
        &self,
        texts: Vec<String>,
        operation: &str,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        let count = texts.len();
        let request = EmbeddingRequest::batch(self.model.clone(), texts);

        let response = timeout(self.embed_timeout, self.provider.embed(request))
            .await
            .map_err(|_| {
                DomainError::embedding(
                    operation,
                    format!(
                        "provider timed out after {}s embedding {} inputs",
                        self.embed_timeout.as_secs(),
                        count
                    ),
                )
            })?
            .map_err(|e| {
                DomainError::embedding(operation, format!("{} ({} inputs)", e, count))
            })?;

        let vectors = response.into_vectors();
        if vectors.len() != count {
            return Err(DomainError::embedding(
                operation,
                format!("expected {} vectors, provider returned {}", count, vectors.len()),
            ));
        }

        Ok(vectors)
    }

    fn check_alignment(state: &State) -> Result<(), DomainError> {
        let documents = state.documents.len();
        let rows = state.embeddings.len();
        let indexed = state.index.len();

        if documents != rows || documents != indexed {
            return Err(DomainError::internal(format!(
                "store/index alignment violated: {} documents, {} embedding rows, {} index entries",
                documents, rows, indexed
            )));
        }

        Ok(())
    }
}
