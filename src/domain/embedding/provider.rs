//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Trait for embedding providers (OpenAI, local models, etc.)
///
/// Implementations must preserve input order, return one vector per input,
/// and produce identical vectors for identical (model, input) pairs so that
/// persisted indexes stay valid across reloads.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate embeddings for the given input
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Get the default model for this provider
    fn default_model(&self) -> &'static str;

    /// Get the embedding dimensions for a model
    fn dimensions(&self, model: &str) -> Option<usize>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::embedding::{Embedding, EmbeddingUsage};

    /// Mock embedding provider using feature hashing over lowercase tokens.
    ///
    /// Texts that share words get high cosine similarity, so retrieval tests
    /// can assert on ranking rather than on opaque vector values. Output is
    /// deterministic for a fixed input.
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        name: &'static str,
        dimensions: usize,
        error: Option<String>,
    }

    impl MockEmbeddingProvider {
        pub fn new(name: &'static str, dimensions: usize) -> Self {
            Self {
                name,
                dimensions,
                error: None,
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        fn embed_text(&self, text: &str) -> Vec<f32> {
            let mut vector = vec![0.0f32; self.dimensions];

            for token in text
                .to_lowercase()
                .split(|c: char| !c.is_alphanumeric())
                .filter(|t| !t.is_empty())
            {
                // FNV-1a over the token selects the bucket
                let mut hash: u64 = 0xcbf29ce484222325;
                for byte in token.bytes() {
                    hash ^= byte as u64;
                    hash = hash.wrapping_mul(0x100000001b3);
                }
                vector[(hash % self.dimensions as u64) as usize] += 1.0;
            }

            vector
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error));
            }

            let inputs = request.inputs();
            let embeddings: Vec<Embedding> = inputs
                .iter()
                .enumerate()
                .map(|(idx, text)| Embedding::new(idx, self.embed_text(text)))
                .collect();

            let total_tokens = inputs.iter().map(|t| t.len() / 4).sum::<usize>() as u32;

            Ok(EmbeddingResponse::new(
                request.model().to_string(),
                embeddings,
                EmbeddingUsage::new(total_tokens, total_tokens),
            ))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }

        fn default_model(&self) -> &'static str {
            "mock-embedding"
        }

        fn dimensions(&self, _model: &str) -> Option<usize> {
            Some(self.dimensions)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn cosine(a: &[f32], b: &[f32]) -> f32 {
            let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
            let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
            dot / (na * nb)
        }

        #[tokio::test]
        async fn test_mock_provider_batch_order_and_dimensions() {
            let provider = MockEmbeddingProvider::new("test", 128);
            let request = EmbeddingRequest::batch(
                "mock-embedding",
                vec!["Hello".into(), "World".into()],
            );

            let response = provider.embed(request).await.unwrap();

            assert_eq!(response.embeddings().len(), 2);
            assert_eq!(response.embeddings()[0].dimensions(), 128);
            assert_eq!(response.embeddings()[0].index(), 0);
            assert_eq!(response.embeddings()[1].index(), 1);
        }

        #[tokio::test]
        async fn test_deterministic_embeddings() {
            let provider = MockEmbeddingProvider::new("test", 128);
            let request1 = EmbeddingRequest::single("mock-embedding", "connect my bank");
            let request2 = EmbeddingRequest::single("mock-embedding", "connect my bank");

            let response1 = provider.embed(request1).await.unwrap();
            let response2 = provider.embed(request2).await.unwrap();

            assert_eq!(
                response1.embeddings()[0].vector(),
                response2.embeddings()[0].vector()
            );
        }

        #[tokio::test]
        async fn test_token_overlap_drives_similarity() {
            let provider = MockEmbeddingProvider::new("test", 128);
            let request = EmbeddingRequest::batch(
                "mock-embedding",
                vec![
                    "connect your bank account".into(),
                    "how do I connect my bank account".into(),
                    "inventory valuation reports".into(),
                ],
            );

            let response = provider.embed(request).await.unwrap();
            let vectors: Vec<_> = response
                .embeddings()
                .iter()
                .map(|e| e.vector().to_vec())
                .collect();

            let related = cosine(&vectors[0], &vectors[1]);
            let unrelated = cosine(&vectors[0], &vectors[2]);

            assert!(related > unrelated);
            assert!(related > 0.3);
        }

        #[tokio::test]
        async fn test_mock_provider_error() {
            let provider = MockEmbeddingProvider::new("test", 128).with_error("API error");
            let request = EmbeddingRequest::single("mock-embedding", "Hello");

            let result = provider.embed(request).await;

            assert!(result.is_err());
        }
    }
}
