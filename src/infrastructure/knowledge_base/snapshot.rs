//! Persisted knowledge base snapshots
//!
//! A snapshot is one logical unit made of four artifacts under the snapshot
//! directory: `metadata.json`, `documents.json`, `embeddings.bin` (bincode
//! f32 rows) and `index.bin` (bincode-serialized index). Every artifact is
//! written to a temp file and renamed into place, with the metadata written
//! last, so a torn write never produces a snapshot that loads but is
//! internally inconsistent.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::knowledge_base::Document;
use crate::domain::DomainError;
use crate::infrastructure::index::FlatIndex;

const METADATA_FILE: &str = "metadata.json";
const DOCUMENTS_FILE: &str = "documents.json";
const EMBEDDINGS_FILE: &str = "embeddings.bin";
const INDEX_FILE: &str = "index.bin";

/// Snapshot metadata record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Embedding model identifier the vectors were produced with
    pub model_name: String,
    /// Number of documents (and embedding rows, and index entries)
    pub num_documents: usize,
    /// Embedding dimension; 0 when the base is empty
    pub embedding_dimension: usize,
    /// When the snapshot was written
    pub saved_at: DateTime<Utc>,
}

/// Complete persisted state of a knowledge base
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub metadata: SnapshotMetadata,
    pub documents: Vec<Document>,
    pub embeddings: Vec<Vec<f32>>,
    pub index: FlatIndex,
}

impl Snapshot {
    /// Verify that the four artifacts agree with each other.
    ///
    /// Any mismatch means the snapshot is corrupt; callers must not load it.
    pub fn check_consistency(&self) -> Result<(), DomainError> {
        let n = self.metadata.num_documents;

        if self.documents.len() != n || self.embeddings.len() != n || self.index.len() != n {
            return Err(DomainError::snapshot(format!(
                "inconsistent snapshot: metadata says {} documents, found {} documents, {} embedding rows, {} index entries",
                n,
                self.documents.len(),
                self.embeddings.len(),
                self.index.len(),
            )));
        }

        if n > 0 {
            let dim = self.metadata.embedding_dimension;
            if self.embeddings.iter().any(|row| row.len() != dim) {
                return Err(DomainError::snapshot(format!(
                    "inconsistent snapshot: embedding rows do not all have dimension {}",
                    dim
                )));
            }
            if self.index.dimension() != Some(dim) {
                return Err(DomainError::snapshot(format!(
                    "inconsistent snapshot: index dimension {:?} does not match metadata dimension {}",
                    self.index.dimension(),
                    dim
                )));
            }
        }

        Ok(())
    }
}

/// File-backed snapshot persistence
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a snapshot, replacing any previous one.
    ///
    /// Data artifacts are written before the metadata record; the metadata
    /// rename is the commit point.
    pub async fn save(&self, snapshot: &Snapshot) -> Result<(), DomainError> {
        snapshot.check_consistency()?;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            DomainError::snapshot(format!(
                "failed to create snapshot directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let documents = serde_json::to_vec_pretty(&snapshot.documents)
            .map_err(|e| DomainError::snapshot(format!("failed to encode documents: {}", e)))?;
        let embeddings = bincode::serialize(&snapshot.embeddings)
            .map_err(|e| DomainError::snapshot(format!("failed to encode embeddings: {}", e)))?;
        let index = bincode::serialize(&snapshot.index)
            .map_err(|e| DomainError::snapshot(format!("failed to encode index: {}", e)))?;
        let metadata = serde_json::to_vec_pretty(&snapshot.metadata)
            .map_err(|e| DomainError::snapshot(format!("failed to encode metadata: {}", e)))?;

        self.write_atomic(DOCUMENTS_FILE, &documents).await?;
        self.write_atomic(EMBEDDINGS_FILE, &embeddings).await?;
        self.write_atomic(INDEX_FILE, &index).await?;
        self.write_atomic(METADATA_FILE, &metadata).await?;

        debug!(
            documents = snapshot.metadata.num_documents,
            dir = %self.dir.display(),
            "snapshot saved"
        );

        Ok(())
    }

    /// Load the persisted snapshot, if one exists.
    ///
    /// A missing snapshot (no metadata record) is a normal, named outcome:
    /// `Ok(None)`. A snapshot that is present but unreadable or internally
    /// inconsistent is an error; callers decide whether to degrade.
    pub async fn load(&self) -> Result<Option<Snapshot>, DomainError> {
        let metadata_path = self.dir.join(METADATA_FILE);
        let metadata_bytes = match tokio::fs::read(&metadata_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::snapshot(format!(
                    "failed to read {}: {}",
                    metadata_path.display(),
                    e
                )));
            }
        };

        let metadata: SnapshotMetadata = serde_json::from_slice(&metadata_bytes)
            .map_err(|e| DomainError::snapshot(format!("failed to decode metadata: {}", e)))?;

        let documents: Vec<Document> = serde_json::from_slice(&self.read(DOCUMENTS_FILE).await?)
            .map_err(|e| DomainError::snapshot(format!("failed to decode documents: {}", e)))?;
        let embeddings: Vec<Vec<f32>> = bincode::deserialize(&self.read(EMBEDDINGS_FILE).await?)
            .map_err(|e| DomainError::snapshot(format!("failed to decode embeddings: {}", e)))?;
        let index: FlatIndex = bincode::deserialize(&self.read(INDEX_FILE).await?)
            .map_err(|e| DomainError::snapshot(format!("failed to decode index: {}", e)))?;

        let snapshot = Snapshot {
            metadata,
            documents,
            embeddings,
            index,
        };
        snapshot.check_consistency()?;

        Ok(Some(snapshot))
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, DomainError> {
        let path = self.dir.join(name);
        tokio::fs::read(&path)
            .await
            .map_err(|e| DomainError::snapshot(format!("failed to read {}: {}", path.display(), e)))
    }

    async fn write_atomic(&self, name: &str, bytes: &[u8]) -> Result<(), DomainError> {
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!("{}.tmp", name));

        tokio::fs::write(&tmp, bytes).await.map_err(|e| {
            DomainError::snapshot(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| {
            DomainError::snapshot(format!("failed to rename {} into place: {}", tmp.display(), e))
        })?;

        Ok(())
    }
}
