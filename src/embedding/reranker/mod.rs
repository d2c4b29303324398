pub mod config;
pub mod error;


pub use config::{DEFAULT_BATCH_SIZE, MAX_SEQ_LEN, RerankerConfig};
pub use error::RerankerError;

use std::collections::HashSet;

use candle_core::Tensor;
use tokenizers::{Encoding, Tokenizer};
use tracing::{debug, info};

use crate::embedding::bert::BertCrossEncoder;
use crate::embedding::device::select_device;
use crate::embedding::utils::load_pair_tokenizer;

/// Cross-encoder relevance model.
///
/// Loaded once at startup and shared read-only across queries.
pub struct Reranker {
    device: candle_core::Device,
    config: RerankerConfig,
    model: Option<(BertCrossEncoder, Tokenizer)>,
}

impl std::fmt::Debug for Reranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reranker")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.is_model_loaded())
            .finish()
    }
}

impl Reranker {
    pub fn load(config: RerankerConfig) -> Result<Self, RerankerError> {
        if let Err(msg) = config.validate() {
            return Err(RerankerError::InvalidConfig { reason: msg });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for reranker");

        let Some(model_path) = config.model_path.clone() else {
            info!("No reranker model path configured, operating in stub mode");
            return Ok(Self {
                device,
                config,
                model: None,
            });
        };

        for required in ["config.json", "model.safetensors", "tokenizer.json"] {
            if !model_path.join(required).exists() {
                return Err(RerankerError::ModelLoadFailed {
                    reason: format!("Missing {} in {}", required, model_path.display()),
                });
            }
        }

        info!(
            model_path = %model_path.display(),
            batch_size = config.batch_size,
            "Loading reranker model"
        );

        let model = BertCrossEncoder::load(&model_path, &device).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            }
        })?;

        let tokenizer = load_pair_tokenizer(&model_path, config.max_seq_len).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!("Reranker model loaded successfully");

        Ok(Self {
            device,
            config,
            model: Some((model, tokenizer)),
        })
    }

    pub fn stub() -> Result<Self, RerankerError> {
        Self::load(RerankerConfig::stub())
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &RerankerConfig {
        &self.config
    }

    pub fn device(&self) -> &candle_core::Device {
        &self.device
    }

    /// Scores every `(query, passage)` pair; output is aligned with `pairs`.
    ///
    /// Scores are raw logits and are not normalized.
    pub fn predict(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, RerankerError> {
        debug!(
            num_pairs = pairs.len(),
            model_loaded = self.is_model_loaded(),
            "Scoring query-passage pairs"
        );

        if pairs.is_empty() {
            return Ok(Vec::new());
        }

        let Some((model, tokenizer)) = &self.model else {
            return Ok(pairs
                .iter()
                .map(|(query, passage)| placeholder_score(query, passage))
                .collect());
        };

        let mut scores = Vec::with_capacity(pairs.len());
        for chunk in pairs.chunks(self.config.batch_size) {
            let encodings = tokenizer.encode_batch(chunk.to_vec(), true).map_err(|e| {
                RerankerError::TokenizationFailed {
                    reason: e.to_string(),
                }
            })?;

            let input_ids = self.stack(&encodings, Encoding::get_ids)?;
            let type_ids = self.stack(&encodings, Encoding::get_type_ids)?;
            let attention_mask = self.stack(&encodings, Encoding::get_attention_mask)?;

            let logits = model
                .score_batch(&input_ids, &type_ids, &attention_mask)
                .map_err(|e| RerankerError::InferenceFailed {
                    reason: e.to_string(),
                })?;

            if logits.len() != chunk.len() {
                return Err(RerankerError::InferenceFailed {
                    reason: format!(
                        "model returned {} logits for {} pairs",
                        logits.len(),
                        chunk.len()
                    ),
                });
            }
            scores.extend(logits);
        }

        debug!(
            max_score = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max),
            "Pair scoring complete"
        );

        Ok(scores)
    }

    fn stack(
        &self,
        encodings: &[Encoding],
        field: fn(&Encoding) -> &[u32],
    ) -> Result<Tensor, RerankerError> {
        let seq_len = encodings.first().map(|e| field(e).len()).unwrap_or(0);
        let mut flat = Vec::with_capacity(encodings.len() * seq_len);

        for encoding in encodings {
            let row = field(encoding);
            if row.len() != seq_len {
                return Err(RerankerError::TokenizationFailed {
                    reason: format!("ragged batch: expected {} tokens, got {}", seq_len, row.len()),
                });
            }
            flat.extend_from_slice(row);
        }

        Ok(Tensor::from_vec(flat, (encodings.len(), seq_len), &self.device)?)
    }
}

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do",
    "does", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "and", "or",
    "but", "if", "then", "than", "so", "such", "said", "wherein", "which", "that", "this",
    "these", "those", "it", "its", "each", "one", "more", "least", "comprising", "claim",
];

fn content_words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// Lexical stand-in for the cross-encoder: a logit-like score in roughly `[-4, 4]`.
fn placeholder_score(query: &str, passage: &str) -> f32 {
    let query_words = content_words(query);
    if query_words.is_empty() {
        return -4.0;
    }

    let passage_words = content_words(passage);
    let matches = query_words.intersection(&passage_words).count();
    let recall = matches as f32 / query_words.len() as f32;

    let union = query_words.union(&passage_words).count();
    let jaccard = matches as f32 / union.max(1) as f32;

    let base = 0.7 * recall + 0.3 * jaccard;
    8.0 * (base - 0.5)
}
