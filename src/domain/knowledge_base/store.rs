//! Append-only document store

use serde::{Deserialize, Serialize};

use super::document::Document;

/// Ordered, append-only collection of documents.
///
/// Position in the store is the row index into the embedding matrix and the
/// vector index. There is deliberately no removal or reordering operation:
/// either would desynchronize that positional alignment. Deletion, if ever
/// needed, must rebuild the store and the index together.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an existing document sequence (snapshot load)
    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Append documents to the end, preserving order
    pub fn append(&mut self, documents: Vec<Document>) {
        self.documents.extend(documents);
    }

    /// Get the document at a position
    pub fn get(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }

    /// All documents in insertion order
    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    /// Documents matching a predicate, in insertion order
    pub fn filter<P>(&self, predicate: P) -> Vec<&Document>
    where
        P: Fn(&Document) -> bool,
    {
        self.documents.iter().filter(|d| predicate(d)).collect()
    }

    /// Number of documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, category: &str) -> Document {
        Document::new(id, format!("Title {id}"), format!("Content {id}"), category)
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = DocumentStore::new();
        store.append(vec![doc("a", "Banking"), doc("b", "Reports")]);
        store.append(vec![doc("c", "Banking")]);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0).unwrap().id, "a");
        assert_eq!(store.get(1).unwrap().id, "b");
        assert_eq!(store.get(2).unwrap().id, "c");
    }

    #[test]
    fn test_get_out_of_bounds() {
        let store = DocumentStore::new();
        assert!(store.get(0).is_none());
    }

    #[test]
    fn test_filter_by_category() {
        let mut store = DocumentStore::new();
        store.append(vec![
            doc("a", "Banking"),
            doc("b", "Reports"),
            doc("c", "Banking"),
        ]);

        let banking = store.filter(|d| d.category == "Banking");

        assert_eq!(banking.len(), 2);
        assert_eq!(banking[0].id, "a");
        assert_eq!(banking[1].id, "c");
    }
}
