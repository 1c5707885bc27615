//! Practice-question generation adapter.
//!
//! Chunks the transcript and asks the generator for three sampled question
//! candidates per chunk, fanning the chunks out across worker threads.
//! Handles are joined in submission order, so chunk grouping in the output is
//! deterministic; candidate order within a chunk follows the model's sampling
//! and varies run to run.

use crate::chunker::chunk_text;
use crate::error::{LecternError, Result};
use crate::textgen::generator::{GenerationParams, TextGenerator};
use std::sync::Mutex;
use std::thread;

/// Instruction prefix for question generation.
const QUESTION_INSTRUCTION: &str = "You are an AI tutor. Your task is to generate **insightful, topic-specific** questions based on the following passage. Ensure that the questions are relevant to the **key concepts, definitions, and explanations** present in the text. Avoid generic questions.";

/// Build the full prompt for one transcript chunk.
pub fn question_prompt(chunk: &str) -> String {
    format!("{QUESTION_INSTRUCTION}\n\nPassage:\n{chunk}")
}

/// Generates practice questions for a transcript, one task per chunk.
pub struct QuestionGenerator {
    generator: Mutex<Box<dyn TextGenerator>>,
    chunk_size: usize,
    params: GenerationParams,
}

impl QuestionGenerator {
    /// Create a question generator around a model, chunking at `chunk_size` characters.
    pub fn new(generator: Box<dyn TextGenerator>, chunk_size: usize) -> Self {
        Self {
            generator: Mutex::new(generator),
            chunk_size,
            params: GenerationParams::questions(),
        }
    }

    /// Name of the underlying model, for logging.
    pub fn model_name(&self) -> String {
        match self.generator.lock() {
            Ok(generator) => generator.name().to_string(),
            Err(_) => "<poisoned>".to_string(),
        }
    }

    /// Generate questions for a transcript.
    ///
    /// All candidates across all chunks are flattened and newline-joined, with
    /// no deduplication or filtering — whatever the model produced is passed
    /// through unchanged. An empty transcript yields an empty block without
    /// invoking the model.
    pub fn generate_questions(&self, transcript: &str) -> Result<String> {
        let chunks = chunk_text(transcript, self.chunk_size);

        let per_chunk: Vec<Result<Vec<String>>> = thread::scope(|scope| {
            let handles: Vec<_> = chunks
                .iter()
                .map(|chunk| {
                    let prompt = question_prompt(chunk);
                    scope.spawn(move || {
                        let mut generator = match self.generator.lock() {
                            Ok(generator) => generator,
                            Err(e) => {
                                return Err(LecternError::Generation {
                                    message: format!("Question generator lock poisoned: {e}"),
                                });
                            }
                        };
                        generator.generate(&prompt, &self.params)
                    })
                })
                .collect();

            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut questions = Vec::new();
        for result in per_chunk {
            questions.extend(result?);
        }

        Ok(questions.join("\n"))
    }
}
