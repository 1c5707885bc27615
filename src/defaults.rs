//! Default configuration constants for lectern.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Default audio sample rate in Hz.
///
/// 16kHz is the standard for speech recognition and provides a good balance
/// between quality and computational efficiency for voice applications.
pub const SAMPLE_RATE: u32 = 16000;

/// Default Whisper model name.
///
/// "small" handles typical lecture audio well. Use "small.en" for
/// English-only recordings.
pub const DEFAULT_STT_MODEL: &str = "small";

/// Default language code for transcription.
///
/// "auto" lets Whisper detect the spoken language automatically.
/// Set to a specific code (e.g., "en", "de") to force a language.
pub const DEFAULT_LANGUAGE: &str = "auto";

/// Language value that triggers automatic language detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Default Flan-T5 model for summarization and question generation.
pub const DEFAULT_TEXT_MODEL: &str = "flan-t5-large";

/// Transcript chunk size in characters.
///
/// The transcript is split into contiguous slices of this many characters
/// before summarization and question generation. Chunks are cut on character
/// counts only — a boundary may fall mid-word or mid-sentence.
pub const CHUNK_SIZE: usize = 1024;

/// Maximum generated tokens for a per-chunk summary.
pub const SUMMARY_MAX_TOKENS: usize = 200;

/// Minimum generated tokens for a per-chunk summary.
pub const SUMMARY_MIN_TOKENS: usize = 50;

/// Maximum generated tokens for a single question candidate.
pub const QUESTION_MAX_TOKENS: usize = 120;

/// Number of sampled question candidates requested per chunk.
pub const QUESTIONS_PER_CHUNK: usize = 3;

/// Fixed report filename, overwritten on every request.
pub const REPORT_FILENAME: &str = "lecture_summary.txt";

/// Section header for the transcript in the report and the UI.
pub const TRANSCRIPT_HEADER: &str = "📝 Transcription:";

/// Section header for the summary in the report and the UI.
pub const SUMMARY_HEADER: &str = "📜 Summary:";

/// Section header for the practice questions in the report and the UI.
pub const QUESTIONS_HEADER: &str = "🤔 Practice Questions:";

/// Default listen address for the web UI.
pub const SERVER_ADDR: &str = "127.0.0.1:7860";

/// Report the GPU backend compiled into this build.
///
/// Returns a human-readable name based on the compile-time feature flags.
pub fn gpu_backend() -> &'static str {
    if cfg!(feature = "cuda") { "CUDA" } else { "CPU" }
}
