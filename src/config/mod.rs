//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `CLAIMSEARCH_*` environment variables.
//! The embeddings API key is read from `OPENAI_API_KEY` and is the only setting
//! without a default; [`Config::validate`] rejects a config that lacks it.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_COLLECTION_NAME, DEFAULT_EMBEDDING_DIM, DEFAULT_EMBEDDING_MODEL, DEFAULT_RESULT_LIMIT,
    DEFAULT_TOP_K,
};

/// Application configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `CLAIMSEARCH_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// Qdrant endpoint URL. Default: `http://localhost:6334`.
    pub qdrant_url: String,

    /// Collection holding the claim index. Default: `patent_claims`.
    pub collection_name: String,

    /// Path to the reranker model directory (BERT + tokenizer).
    pub reranker_path: Option<PathBuf>,

    /// OpenAI-compatible embeddings endpoint.
    pub embeddings_url: String,

    /// Embedding model name. Must match the model the index was built with.
    pub embeddings_model: String,

    /// Vector length the embeddings endpoint returns. Default: `1536`.
    pub embedding_dim: usize,

    /// API key for the embeddings endpoint.
    pub api_key: Option<String>,

    /// Candidates pulled from the vector store per query. Default: `75`.
    pub top_k: u64,

    /// Records returned per query. Default: `15`.
    pub result_limit: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("qdrant_url", &self.qdrant_url)
            .field("collection_name", &self.collection_name)
            .field("reranker_path", &self.reranker_path)
            .field("embeddings_url", &self.embeddings_url)
            .field("embeddings_model", &self.embeddings_model)
            .field("embedding_dim", &self.embedding_dim)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("top_k", &self.top_k)
            .field("result_limit", &self.result_limit)
            .finish()
    }
}

/// Default Qdrant URL used when `CLAIMSEARCH_QDRANT_URL` is not set.
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Default embeddings endpoint used when `CLAIMSEARCH_EMBEDDINGS_URL` is not set.
pub const DEFAULT_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

impl Default for Config {
    fn default() -> Self {
        Self {
            qdrant_url: DEFAULT_QDRANT_URL.to_string(),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            reranker_path: None,
            embeddings_url: DEFAULT_EMBEDDINGS_URL.to_string(),
            embeddings_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            api_key: None,
            top_k: DEFAULT_TOP_K,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl Config {
    const ENV_QDRANT_URL: &'static str = "CLAIMSEARCH_QDRANT_URL";
    const ENV_COLLECTION: &'static str = "CLAIMSEARCH_COLLECTION";
    const ENV_RERANKER_PATH: &'static str = "CLAIMSEARCH_RERANKER_PATH";
    const ENV_EMBEDDINGS_URL: &'static str = "CLAIMSEARCH_EMBEDDINGS_URL";
    const ENV_EMBEDDINGS_MODEL: &'static str = "CLAIMSEARCH_EMBEDDINGS_MODEL";
    const ENV_EMBEDDING_DIM: &'static str = "CLAIMSEARCH_EMBEDDING_DIM";
    const ENV_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_TOP_K: &'static str = "CLAIMSEARCH_TOP_K";
    const ENV_RESULT_LIMIT: &'static str = "CLAIMSEARCH_RESULT_LIMIT";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let qdrant_url = Self::parse_string_from_env(Self::ENV_QDRANT_URL, defaults.qdrant_url);
        let collection_name =
            Self::parse_string_from_env(Self::ENV_COLLECTION, defaults.collection_name);
        let reranker_path = Self::parse_optional_path_from_env(Self::ENV_RERANKER_PATH);
        let embeddings_url =
            Self::parse_string_from_env(Self::ENV_EMBEDDINGS_URL, defaults.embeddings_url);
        let embeddings_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDINGS_MODEL, defaults.embeddings_model);
        let embedding_dim =
            Self::parse_number_from_env(Self::ENV_EMBEDDING_DIM, defaults.embedding_dim)?;
        let api_key = Self::parse_optional_string_from_env(Self::ENV_API_KEY);
        let top_k = Self::parse_number_from_env(Self::ENV_TOP_K, defaults.top_k)?;
        let result_limit =
            Self::parse_number_from_env(Self::ENV_RESULT_LIMIT, defaults.result_limit)?;

        Ok(Self {
            qdrant_url,
            collection_name,
            reranker_path,
            embeddings_url,
            embeddings_model,
            embedding_dim,
            api_key,
            top_k,
            result_limit,
        })
    }

    /// Validates credentials, paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_API_KEY,
            });
        }

        if self.collection_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_COLLECTION,
                value: self.collection_name.clone(),
            });
        }

        if self.embedding_dim == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_EMBEDDING_DIM,
                value: self.embedding_dim.to_string(),
            });
        }

        if self.top_k == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_TOP_K,
                value: self.top_k.to_string(),
            });
        }

        if self.result_limit == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_RESULT_LIMIT,
                value: self.result_limit.to_string(),
            });
        }

        if let Some(ref path) = self.reranker_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        match Self::parse_optional_string_from_env(var_name) {
            Some(value) => value.parse().map_err(|e| ConfigError::NumberParseError {
                name: var_name,
                value: value.clone(),
                source: e,
            }),
            None => Ok(default),
        }
    }
}
