//! TextGenerator trait for text-to-text model inference.

use crate::defaults;
use crate::error::{LecternError, Result};
use std::sync::{Arc, Mutex};

/// Decoding knobs for a single generation call.
///
/// These are fixed per adapter; they are named here so the summarization and
/// question-generation settings live in one place instead of as scattered
/// literals.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Maximum number of tokens to generate per candidate.
    pub max_tokens: usize,
    /// Minimum number of tokens per candidate (EOS is suppressed below this).
    pub min_tokens: usize,
    /// Number of candidates to return per call.
    pub num_return_sequences: usize,
    /// Whether to sample (true) or decode greedily (false).
    pub sample: bool,
}

impl GenerationParams {
    /// Parameters for per-chunk summarization: long-form, deterministic.
    pub fn summary() -> Self {
        Self {
            max_tokens: defaults::SUMMARY_MAX_TOKENS,
            min_tokens: defaults::SUMMARY_MIN_TOKENS,
            num_return_sequences: 1,
            sample: false,
        }
    }

    /// Parameters for per-chunk question generation: short, sampled, 3 candidates.
    pub fn questions() -> Self {
        Self {
            max_tokens: defaults::QUESTION_MAX_TOKENS,
            min_tokens: 0,
            num_return_sequences: defaults::QUESTIONS_PER_CHUNK,
            sample: true,
        }
    }
}

/// Trait for text-to-text generation.
///
/// Implementations receive a fully-formed prompt and return one or more
/// generated candidate strings. `&mut self` because decoding mutates model
/// state (the KV cache); callers that share a generator wrap it in a Mutex.
pub trait TextGenerator: Send {
    /// Generate candidates for the given prompt.
    fn generate(&mut self, prompt: &str, params: &GenerationParams) -> Result<Vec<String>>;

    /// Return the name of this generator for logging.
    fn name(&self) -> &str;
}

/// What a mock generation call should produce.
#[derive(Debug, Clone)]
enum MockMode {
    /// Return these candidates (truncated to `num_return_sequences`).
    Fixed(Vec<String>),
    /// Return candidates tagged with the last `n` characters of the prompt.
    EchoSuffix(usize),
}

/// Mock generator for testing.
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    name: String,
    mode: MockMode,
    should_fail: bool,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockTextGenerator {
    /// Create a mock that returns the given candidates on every call.
    pub fn fixed(name: &str, candidates: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            mode: MockMode::Fixed(candidates.iter().map(|s| s.to_string()).collect()),
            should_fail: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock whose candidates embed the prompt's last `suffix_len`
    /// characters, for asserting which chunk produced which output.
    pub fn echo(name: &str, suffix_len: usize) -> Self {
        Self {
            name: name.to_string(),
            mode: MockMode::EchoSuffix(suffix_len),
            should_fail: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure the mock to fail on generate.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("mock prompt lock").clone()
    }
}

impl TextGenerator for MockTextGenerator {
    fn generate(&mut self, prompt: &str, params: &GenerationParams) -> Result<Vec<String>> {
        self.prompts
            .lock()
            .expect("mock prompt lock")
            .push(prompt.to_string());

        if self.should_fail {
            return Err(LecternError::Generation {
                message: "mock generation failure".to_string(),
            });
        }

        match &self.mode {
            MockMode::Fixed(candidates) => Ok(candidates
                .iter()
                .take(params.num_return_sequences)
                .cloned()
                .collect()),
            MockMode::EchoSuffix(suffix_len) => {
                let chars: Vec<char> = prompt.chars().collect();
                let start = chars.len().saturating_sub(*suffix_len);
                let suffix: String = chars[start..].iter().collect();
                Ok((0..params.num_return_sequences)
                    .map(|i| format!("{}-{}", suffix, i + 1))
                    .collect())
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
