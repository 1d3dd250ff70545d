//! Knowledge base document types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A document in the knowledge base
///
/// Documents are immutable once created. Replacing content means ingesting a
/// new document; the identifier policy is left to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique, stable identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Document body text (the part that gets embedded)
    pub content: String,
    /// Free-form category label
    pub category: String,
    /// Keyword strings
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Optional source reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Optional free-form metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl Document {
    /// Create a new document
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            category: category.into(),
            keywords: Vec::new(),
            source_url: None,
            metadata: None,
        }
    }

    /// Set keywords
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Set source reference
    pub fn with_source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = Some(source_url.into());
        self
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// Summary view of this document (body withheld)
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            keywords: self.keywords.clone(),
            source_url: self.source_url.clone(),
            content_length: self.content.len(),
        }
    }
}

/// Summary of a document for listing endpoints - the content body is
/// withheld, only its length is reported
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub category: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub content_length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_builder() {
        let doc = Document::new("qb001", "Connecting Bank Accounts", "body text", "Banking")
            .with_keywords(vec!["bank".into(), "connect".into()])
            .with_source_url("https://example.com/help/bank")
            .with_metadata("version", serde_json::json!(2));

        assert_eq!(doc.id, "qb001");
        assert_eq!(doc.category, "Banking");
        assert_eq!(doc.keywords.len(), 2);
        assert_eq!(doc.source_url.as_deref(), Some("https://example.com/help/bank"));
        assert_eq!(
            doc.metadata.unwrap().get("version"),
            Some(&serde_json::json!(2))
        );
    }

    #[test]
    fn test_document_summary_withholds_body() {
        let doc = Document::new("d1", "Title", "some content here", "Reports");

        let summary = doc.summary();

        assert_eq!(summary.id, "d1");
        assert_eq!(summary.content_length, "some content here".len());

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("content").is_none());
    }

    #[test]
    fn test_document_roundtrip() {
        let doc = Document::new("d1", "Title", "content", "Payroll")
            .with_keywords(vec!["wages".into()]);

        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, doc.id);
        assert_eq!(back.keywords, doc.keywords);
        assert!(back.source_url.is_none());
    }
}
