//! Summarization adapter.
//!
//! Chunks the transcript and summarizes each chunk independently with greedy
//! decoding, then joins the per-chunk summaries with single spaces in chunk
//! order. Each summary covers its chunk only — there is no cross-chunk length
//! negotiation, an accepted approximation of this pipeline.

use crate::chunker::chunk_text;
use crate::error::{LecternError, Result};
use crate::textgen::generator::{GenerationParams, TextGenerator};
use std::sync::Mutex;

/// Task prefix the Flan-T5 family expects for summarization.
const SUMMARY_PROMPT_PREFIX: &str = "summarize: ";

/// Summarizes a transcript chunk by chunk.
pub struct Summarizer {
    generator: Mutex<Box<dyn TextGenerator>>,
    chunk_size: usize,
    params: GenerationParams,
}

impl Summarizer {
    /// Create a summarizer around a generator, chunking at `chunk_size` characters.
    pub fn new(generator: Box<dyn TextGenerator>, chunk_size: usize) -> Self {
        Self {
            generator: Mutex::new(generator),
            chunk_size,
            params: GenerationParams::summary(),
        }
    }

    /// Name of the underlying model, for logging.
    pub fn model_name(&self) -> String {
        match self.generator.lock() {
            Ok(generator) => generator.name().to_string(),
            Err(_) => "<poisoned>".to_string(),
        }
    }

    /// Summarize a transcript.
    ///
    /// An empty transcript yields an empty summary without invoking the model.
    pub fn summarize(&self, transcript: &str) -> Result<String> {
        let chunks = chunk_text(transcript, self.chunk_size);
        let mut summaries = Vec::with_capacity(chunks.len());

        let mut generator = self.generator.lock().map_err(|e| LecternError::Generation {
            message: format!("Summary generator lock poisoned: {e}"),
        })?;

        for chunk in &chunks {
            let prompt = format!("{SUMMARY_PROMPT_PREFIX}{chunk}");
            let mut candidates = generator.generate(&prompt, &self.params)?;
            let summary = candidates.drain(..).next().ok_or_else(|| {
                LecternError::Generation {
                    message: format!("'{}' returned no summary candidate", generator.name()),
                }
            })?;
            summaries.push(summary);
        }

        Ok(summaries.join(" "))
    }
}
