//! Flan-T5 text generation using candle quantized models.
//!
//! Downloads model artifacts from HuggingFace on first use, then runs T5
//! decoding. Supports greedy decoding (summaries) and temperature sampling
//! with multiple candidates per prompt (practice questions).

use crate::error::{LecternError, Result};
use crate::models::t5_catalog::TextModelInfo;
use crate::textgen::generator::{GenerationParams, TextGenerator};

use candle_core::{Device, Tensor};
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::quantized_t5::{Config as T5Config, T5ForConditionalGeneration};
use candle_transformers::quantized_var_builder::VarBuilder;
use hf_hub::api::sync::Api;
use tokenizers::Tokenizer;

/// T5 decoder start token (pad).
const PAD_TOKEN: u32 = 0;

/// T5 end-of-sequence token.
const EOS_TOKEN: u32 = 1;

/// Temperature used when sampling is enabled.
const SAMPLING_TEMPERATURE: f64 = 1.0;

/// Flan-T5 generator that runs quantized inference via candle.
pub struct CandleT5Generator {
    model: T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
    model_name: String,
}

impl CandleT5Generator {
    /// Load a quantized Flan-T5 model from HuggingFace cache.
    ///
    /// Downloads model, config, and tokenizer on first call.
    pub fn load(info: &TextModelInfo) -> Result<Self> {
        let device = Device::Cpu;
        let api = Api::new().map_err(|e| LecternError::TextModelLoad {
            model: info.name.to_string(),
            message: format!("HF Hub API init: {e}"),
        })?;
        let repo = api.model(info.hf_repo.to_string());

        // Download / resolve paths
        let model_path = repo.get(info.hf_filename).map_err(|e| {
            LecternError::TextModelLoad {
                model: info.name.to_string(),
                message: format!("Download model {}: {e}", info.hf_filename),
            }
        })?;

        let config_path = repo.get(info.config_filename).map_err(|e| {
            LecternError::TextModelLoad {
                model: info.name.to_string(),
                message: format!("Download config {}: {e}", info.config_filename),
            }
        })?;

        let tokenizer_path = repo
            .get(crate::models::t5_catalog::TOKENIZER_FILENAME)
            .map_err(|e| LecternError::TextModelLoad {
                model: info.name.to_string(),
                message: format!("Download tokenizer: {e}"),
            })?;

        // Load config
        let config_bytes = std::fs::read(&config_path).map_err(|e| {
            LecternError::TextModelLoad {
                model: info.name.to_string(),
                message: format!("Read config {}: {e}", config_path.display()),
            }
        })?;
        let config: T5Config =
            serde_json::from_slice(&config_bytes).map_err(|e| LecternError::TextModelLoad {
                model: info.name.to_string(),
                message: format!("Parse T5 config: {e}"),
            })?;

        // Load quantized model
        let vb = VarBuilder::from_gguf(&model_path, &device).map_err(|e| {
            LecternError::TextModelLoad {
                model: info.name.to_string(),
                message: format!("Load GGUF model {}: {e}", model_path.display()),
            }
        })?;
        let model = T5ForConditionalGeneration::load(vb, &config).map_err(|e| {
            LecternError::TextModelLoad {
                model: info.name.to_string(),
                message: format!("Init T5 model: {e}"),
            }
        })?;

        // Load tokenizer
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            LecternError::TextModelLoad {
                model: info.name.to_string(),
                message: format!("Load tokenizer {}: {e}", tokenizer_path.display()),
            }
        })?;

        Ok(Self {
            model,
            tokenizer,
            device,
            model_name: info.name.to_string(),
        })
    }

    /// Run one decode pass against a prepared encoder output.
    ///
    /// Greedy when `sampler` is None, temperature sampling otherwise.
    /// EOS is suppressed until `params.min_tokens` tokens have been produced.
    fn decode(
        &mut self,
        encoder_output: &Tensor,
        params: &GenerationParams,
        mut sampler: Option<&mut LogitsProcessor>,
    ) -> Result<String> {
        // First step: feed pad token (0). Subsequent steps: feed only the new
        // token. The KV cache accumulates key-value pairs across steps.
        let mut decoded_ids: Vec<u32> = vec![PAD_TOKEN];
        let mut next_input = vec![PAD_TOKEN];
        let mut generated = 0usize;

        for _ in 0..params.max_tokens {
            let decoder_input = Tensor::new(next_input.as_slice(), &self.device)
                .map_err(|e| generation_error(format!("Create decoder input: {e}")))?
                .unsqueeze(0)
                .map_err(|e| generation_error(format!("Unsqueeze decoder: {e}")))?;

            let logits = self
                .model
                .decode(&decoder_input, encoder_output)
                .map_err(|e| generation_error(format!("Decoder forward: {e}")))?;

            // Take last token logits (seq dim = last position)
            let seq_len = logits
                .dim(1)
                .map_err(|e| generation_error(format!("Get logits dim: {e}")))?;
            let next_logits = logits
                .get_on_dim(1, seq_len - 1)
                .map_err(|e| generation_error(format!("Slice logits: {e}")))?
                .squeeze(0)
                .map_err(|e| generation_error(format!("Squeeze logits: {e}")))?;
            let mut logits_vec: Vec<f32> = next_logits
                .to_vec1()
                .map_err(|e| generation_error(format!("Read logits: {e}")))?;

            if generated < params.min_tokens && (EOS_TOKEN as usize) < logits_vec.len() {
                logits_vec[EOS_TOKEN as usize] = f32::NEG_INFINITY;
            }

            let next_token = match sampler.as_mut() {
                Some(lp) => {
                    let masked = Tensor::new(logits_vec.as_slice(), &self.device)
                        .map_err(|e| generation_error(format!("Create logits tensor: {e}")))?;
                    lp.sample(&masked)
                        .map_err(|e| generation_error(format!("Sample token: {e}")))?
                }
                None => argmax(&logits_vec),
            };

            if next_token == EOS_TOKEN {
                break;
            }

            decoded_ids.push(next_token);
            next_input = vec![next_token]; // incremental: only the new token
            generated += 1;
        }

        // Skip the leading pad token for decoding
        let output = self
            .tokenizer
            .decode(&decoded_ids[1..], true)
            .map_err(|e| generation_error(format!("Detokenize: {e}")))?;

        Ok(output)
    }
}

impl TextGenerator for CandleT5Generator {
    fn generate(&mut self, prompt: &str, params: &GenerationParams) -> Result<Vec<String>> {
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| generation_error(format!("Tokenize: {e}")))?;

        let input_ids: Vec<u32> = encoding.get_ids().to_vec();
        let input_tensor = Tensor::new(input_ids.as_slice(), &self.device)
            .map_err(|e| generation_error(format!("Create input tensor: {e}")))?
            .unsqueeze(0)
            .map_err(|e| generation_error(format!("Unsqueeze input: {e}")))?;

        let seed = sampling_seed();
        let mut candidates = Vec::with_capacity(params.num_return_sequences);

        for i in 0..params.num_return_sequences {
            self.model.clear_kv_cache();

            let encoder_output = self
                .model
                .encode(&input_tensor)
                .map_err(|e| generation_error(format!("Encoder forward: {e}")))?;

            // Distinct seed per candidate so the three question drafts differ.
            let mut sampler = params
                .sample
                .then(|| LogitsProcessor::new(seed.wrapping_add(i as u64), Some(SAMPLING_TEMPERATURE), None));

            let text = self.decode(&encoder_output, params, sampler.as_mut())?;
            candidates.push(text);
        }

        Ok(candidates)
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

fn generation_error(message: String) -> LecternError {
    LecternError::Generation { message }
}

/// Index of the highest logit.
fn argmax(logits: &[f32]) -> u32 {
    let mut best = 0usize;
    let mut best_val = f32::NEG_INFINITY;
    for (i, &v) in logits.iter().enumerate() {
        if v > best_val {
            best_val = v;
            best = i;
        }
    }
    best as u32
}

/// Wall-clock derived seed for sampled decoding.
fn sampling_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candle_t5_generator_is_send() {
        fn assert_send<T: Send + 'static>() {}
        assert_send::<CandleT5Generator>();
    }

    #[test]
    fn argmax_picks_highest() {
        assert_eq!(argmax(&[0.1, 0.9, 0.5]), 1);
        assert_eq!(argmax(&[3.0, 1.0, 2.0]), 0);
    }

    #[test]
    fn argmax_handles_neg_infinity_mask() {
        let mut logits = vec![0.2f32, 5.0, 0.3];
        logits[1] = f32::NEG_INFINITY;
        assert_eq!(argmax(&logits), 2);
    }
}
