use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Embedding error during {operation}: {message}")]
    Embedding { operation: String, message: String },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Snapshot error: {message}")]
    Snapshot { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn embedding(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Embedding {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::Snapshot {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_error() {
        let error = DomainError::embedding("search", "request timed out after 30s");
        assert_eq!(
            error.to_string(),
            "Embedding error during search: request timed out after 30s"
        );
    }

    #[test]
    fn test_dimension_mismatch_error() {
        let error = DomainError::dimension_mismatch(384, 768);
        assert_eq!(
            error.to_string(),
            "Dimension mismatch: expected 384, got 768"
        );
    }

    #[test]
    fn test_snapshot_error() {
        let error = DomainError::snapshot("metadata.json is missing");
        assert_eq!(
            error.to_string(),
            "Snapshot error: metadata.json is missing"
        );
    }
}
