use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::path::Path;
use std::sync::Arc;

/// Pooler plus single-logit classifier of a `*ForSequenceClassification` export.
struct ClassificationHead {
    pooler: Option<Linear>,
    classifier: Linear,
}

impl ClassificationHead {
    /// `encoder_vb` is scoped to the encoder prefix, `vb` to the checkpoint root.
    fn load(encoder_vb: &VarBuilder, vb: &VarBuilder, hidden_size: usize) -> Result<Self> {
        // Checkpoints exported without a pooler feed [CLS] to the classifier directly.
        let pooler = if encoder_vb.contains_tensor("pooler.dense.weight") {
            Some(candle_nn::linear(
                hidden_size,
                hidden_size,
                encoder_vb.pp("pooler.dense"),
            )?)
        } else {
            None
        };

        let classifier = candle_nn::linear(hidden_size, 1, vb.pp("classifier"))?;

        Ok(Self { pooler, classifier })
    }

    fn forward(&self, cls: &Tensor) -> Result<Tensor> {
        match &self.pooler {
            Some(pooler) => self.classifier.forward(&pooler.forward(cls)?.tanh()?),
            None => self.classifier.forward(cls),
        }
    }
}

struct CrossEncoderHead {
    encoder: BertModel,
    head: ClassificationHead,
}

impl CrossEncoderHead {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        // HF exports nest the encoder under its architecture name.
        let encoder_vb = ["bert", "roberta"]
            .into_iter()
            .find(|prefix| {
                vb.contains_tensor(&format!("{prefix}.embeddings.word_embeddings.weight"))
            })
            .map(|prefix| vb.pp(prefix))
            .unwrap_or_else(|| vb.clone());

        let encoder = BertModel::load(encoder_vb.clone(), config)?;
        let head = ClassificationHead::load(&encoder_vb, &vb, config.hidden_size)?;

        Ok(Self { encoder, head })
    }

    fn logits(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = self
            .encoder
            .forward(input_ids, token_type_ids, Some(attention_mask))?;
        let cls = hidden.i((.., 0, ..))?;
        self.head.forward(&cls)
    }
}

/// BERT sequence-classification model with a single relevance logit.
///
/// Cheap to clone; the weights are shared.
#[derive(Clone)]
pub struct BertCrossEncoder(Arc<CrossEncoderHead>);

impl BertCrossEncoder {
    /// Loads `config.json` and `model.safetensors` from `model_dir`.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();

        let config_content = std::fs::read_to_string(model_dir.join("config.json"))?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let weights = model_dir.join("model.safetensors");
        // SAFETY: the weights file is not modified while the mapping is alive.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, device)? };

        Ok(Self(Arc::new(CrossEncoderHead::load(vb, &config)?)))
    }

    /// Runs a `(batch, seq_len)` batch and returns one logit per row.
    pub fn score_batch(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Vec<f32>> {
        self.0
            .logits(input_ids, token_type_ids, attention_mask)?
            .flatten_all()?
            .to_vec1::<f32>()
    }
}
