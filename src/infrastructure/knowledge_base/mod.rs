//! Knowledge base infrastructure: persistence and orchestration

pub mod service;
pub mod snapshot;

pub use service::KnowledgeBase;
pub use snapshot::{Snapshot, SnapshotMetadata, SnapshotStore};
