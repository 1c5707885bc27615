//! lectern - lecture study aid
//!
//! Transcribes a lecture recording, summarizes it, and generates practice
//! questions, then bundles all three into a downloadable report. Ships with
//! a small embedded browser UI.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
pub mod audio;
pub mod chunker;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod report;
pub mod stt;
pub mod textgen;
pub mod web;

// Core traits (adapters are substitutable with mocks)
pub use stt::transcriber::Transcriber;
pub use textgen::generator::{GenerationParams, TextGenerator};

// Pipeline
pub use orchestrator::{Orchestrator, ProcessOutput};

// Error handling
pub use error::{LecternError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
