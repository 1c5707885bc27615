//! Command-line interface for lectern
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Transcribe, summarize, and quiz lecture recordings
#[derive(Parser, Debug)]
#[command(
    name = "lectern",
    version,
    about = "Transcribe, summarize, and quiz lecture recordings"
)]
pub struct Cli {
    /// Subcommand to execute (default: serve the browser UI)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Whisper model (default: small, multilingual). Use small.en for English-only
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Flan-T5 model for both summarization and question generation
    #[arg(long, value_name = "MODEL")]
    pub text_model: Option<String>,

    /// Language code for transcription (default: auto-detect). Examples: auto, en, de
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Report output path (default: lecture_summary.txt)
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Prevent automatic model download if configured model is missing
    #[arg(long)]
    pub no_download: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the browser UI (upload, process, download)
    Serve {
        /// Listen address (default: 127.0.0.1:7860)
        #[arg(long, value_name = "ADDR")]
        addr: Option<String>,
    },

    /// Process one recording and write the report
    Process {
        /// Path to the lecture audio file (WAV)
        audio: PathBuf,
    },

    /// Manage models
    Models {
        /// Action to perform
        #[command(subcommand)]
        action: ModelsAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Model management actions
#[derive(Subcommand, Debug)]
pub enum ModelsAction {
    /// List available Whisper and Flan-T5 models
    List,

    /// Download and install a Whisper model
    Install {
        /// Model name (e.g., small, base.en)
        name: String,
    },
}
