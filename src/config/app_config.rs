use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub knowledge_base: KnowledgeBaseConfig,
    pub embedding: EmbeddingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KnowledgeBaseConfig {
    /// Directory the snapshot artifacts are written to
    pub index_path: String,
    pub default_top_k: usize,
    pub default_min_score: f32,
    pub default_max_tokens: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding model identifier
    pub model: String,
    /// Timeout for a single provider call, in seconds
    pub timeout_secs: u64,
    /// API key; falls back to OPENAI_API_KEY when unset
    pub api_key: Option<String>,
    /// Override for the provider base URL (proxies, local gateways)
    pub api_base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            index_path: "vector_store".to_string(),
            default_top_k: 5,
            default_min_score: 0.5,
            default_max_tokens: 2000,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            timeout_secs: 30,
            api_key: None,
            api_base_url: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.knowledge_base.index_path, "vector_store");
        assert_eq!(config.knowledge_base.default_top_k, 5);
        assert_eq!(config.knowledge_base.default_min_score, 0.5);
        assert_eq!(config.knowledge_base.default_max_tokens, 2000);
        assert_eq!(config.embedding.model, "text-embedding-3-small");
        assert_eq!(config.embedding.timeout_secs, 30);
        assert!(config.embedding.api_base_url.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_log_format_deserializes_lowercase() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert!(matches!(format, LogFormat::Json));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"embedding": {"model": "text-embedding-3-large"}}"#).unwrap();

        assert_eq!(config.embedding.model, "text-embedding-3-large");
        assert_eq!(config.embedding.timeout_secs, 30);
        assert_eq!(config.knowledge_base.default_top_k, 5);
    }
}
