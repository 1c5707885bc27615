//! Text generation: summarization and practice-question generation.

pub mod candle_t5;
pub mod generator;
pub mod questions;
pub mod summarizer;
