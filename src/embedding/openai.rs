use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::QueryEmbedder;
use super::error::EmbeddingError;
use crate::config::Config;
use crate::constants::DEFAULT_EMBEDDING_DIM;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

/// Query embedder backed by an OpenAI-compatible `/v1/embeddings` endpoint.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: String,
    embedding_dim: usize,
}

impl std::fmt::Debug for OpenAiEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEmbedder")
            .field("url", &self.url)
            .field("model", &self.model)
            .field("embedding_dim", &self.embedding_dim)
            .finish_non_exhaustive()
    }
}

impl OpenAiEmbedder {
    pub fn new(
        url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, EmbeddingError> {
        let url = url.into();
        let model = model.into();
        let api_key = api_key.into();

        if url.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embeddings url cannot be empty".to_string(),
            });
        }
        if model.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embeddings model cannot be empty".to_string(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            url,
            model,
            api_key,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, EmbeddingError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| EmbeddingError::InvalidConfig {
                reason: "embeddings api key is not set".to_string(),
            })?;
        Ok(Self::new(&config.embeddings_url, &config.embeddings_model, api_key)?
            .with_embedding_dim(config.embedding_dim))
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }
}

impl QueryEmbedder for OpenAiEmbedder {
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: text,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: EmbeddingResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InvalidResponse {
                    reason: e.to_string(),
                })?;

        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbeddingError::InvalidResponse {
                reason: "response contained no embeddings".to_string(),
            })?;

        if embedding.len() != self.embedding_dim {
            return Err(EmbeddingError::InvalidDimension {
                expected: self.embedding_dim,
                actual: embedding.len(),
            });
        }

        debug!(dim = embedding.len(), "Query embedded");
        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_url() {
        let result = OpenAiEmbedder::new(" ", "text-embedding-3-small", "sk");
        assert!(matches!(result, Err(EmbeddingError::InvalidConfig { .. })));
    }

    #[test]
    fn test_new_rejects_empty_model() {
        let result = OpenAiEmbedder::new("http://localhost/v1/embeddings", "", "sk");
        assert!(matches!(result, Err(EmbeddingError::InvalidConfig { .. })));
    }

    #[test]
    fn test_from_config_requires_key() {
        let result = OpenAiEmbedder::from_config(&Config::default());
        assert!(matches!(result, Err(EmbeddingError::InvalidConfig { .. })));
    }

    #[test]
    fn test_from_config_defaults() {
        let config = Config {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let embedder = OpenAiEmbedder::from_config(&config).unwrap();

        assert_eq!(embedder.model(), "text-embedding-3-small");
        assert_eq!(embedder.embedding_dim(), DEFAULT_EMBEDDING_DIM);
        assert!(!format!("{:?}", embedder).contains("sk-test"));
    }

    #[test]
    fn test_from_config_embedding_dim() {
        let config = Config {
            api_key: Some("sk-test".to_string()),
            embeddings_model: "text-embedding-3-large".to_string(),
            embedding_dim: 3072,
            ..Default::default()
        };
        let embedder = OpenAiEmbedder::from_config(&config).unwrap();

        assert_eq!(embedder.embedding_dim(), 3072);
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"object":"list","data":[{"object":"embedding","index":0,"embedding":[0.1,0.2]}],"model":"m"}"#;
        let parsed: EmbeddingResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].embedding, vec![0.1, 0.2]);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let embedder = OpenAiEmbedder::new("http://127.0.0.1:9/v1/embeddings", "m", "sk").unwrap();

        let result = embedder.embed("wireless charging").await;
        assert!(matches!(result, Err(EmbeddingError::RequestFailed { .. })));
    }
}
