use std::path::PathBuf;

/// Token budget for one (query, claim) pair.
pub const MAX_SEQ_LEN: usize = 512;

/// Pairs per forward pass.
pub const DEFAULT_BATCH_SIZE: usize = 32;

#[derive(Debug, Clone)]
pub struct RerankerConfig {
    /// Model directory with `config.json`, `model.safetensors` and `tokenizer.json`.
    /// `None` runs the reranker in stub mode.
    pub model_path: Option<PathBuf>,

    pub batch_size: usize,

    pub max_seq_len: usize,
}

impl Default for RerankerConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            batch_size: DEFAULT_BATCH_SIZE,
            max_seq_len: MAX_SEQ_LEN,
        }
    }
}

impl RerankerConfig {
    pub const ENV_MODEL_PATH: &'static str = "CLAIMSEARCH_RERANKER_PATH";
    pub const ENV_BATCH_SIZE: &'static str = "CLAIMSEARCH_RERANKER_BATCH_SIZE";

    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch_size must be greater than 0");
        self.batch_size = batch_size;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }

        if self.max_seq_len == 0 {
            return Err("max_seq_len must be greater than 0".to_string());
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }

    pub fn from_env() -> Self {
        let model_path = std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let batch_size = std::env::var(Self::ENV_BATCH_SIZE)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(DEFAULT_BATCH_SIZE);

        Self {
            model_path,
            batch_size,
            max_seq_len: MAX_SEQ_LEN,
        }
    }
}
