//! Application entry points.
//!
//! Loads the three models once at startup, assembles the orchestrator, and
//! runs either a one-shot processing pass or the browser UI.

use crate::config::Config;
use crate::defaults;
use crate::error::{LecternError, Result};
use crate::models::download::{download_model, find_any_installed_model, is_model_installed, model_path};
use crate::models::t5_catalog::get_text_model;
use crate::orchestrator::Orchestrator;
use crate::stt::transcriber::Transcriber;
use crate::stt::whisper::{WhisperConfig, WhisperTranscriber};
use crate::textgen::candle_t5::CandleT5Generator;
use crate::textgen::generator::TextGenerator;
use crate::textgen::questions::QuestionGenerator;
use crate::textgen::summarizer::Summarizer;
use crate::web::server::WebServer;
use std::path::Path;
use std::sync::Arc;

/// Run the one-shot process command: transcribe → summarize → questions → report.
pub async fn run_process_command(
    config: Config,
    audio: &Path,
    quiet: bool,
    no_download: bool,
) -> Result<()> {
    let orchestrator = build_orchestrator(&config, quiet, no_download).await?;
    let output = orchestrator.process(audio)?;

    println!("{}", defaults::TRANSCRIPT_HEADER);
    println!("{}", output.transcript);
    println!();
    println!("{}", defaults::SUMMARY_HEADER);
    println!("{}", output.summary);
    println!();
    println!("{}", defaults::QUESTIONS_HEADER);
    println!("{}", output.questions);

    if !quiet {
        eprintln!("Saved to {}", output.report_path.display());
    }
    Ok(())
}

/// Run the browser UI until Ctrl+C.
pub async fn run_serve_command(
    config: Config,
    addr_override: Option<String>,
    quiet: bool,
    no_download: bool,
) -> Result<()> {
    let addr = addr_override.unwrap_or_else(|| config.server.addr.clone());
    let orchestrator = Arc::new(build_orchestrator(&config, quiet, no_download).await?);

    let server = WebServer::start(&addr, orchestrator)?;
    if !quiet {
        eprintln!("Serving on http://{}/", server.addr());
        eprintln!("Press Ctrl+C to stop.");
    }

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| LecternError::Other(format!("Failed to wait for Ctrl+C: {}", e)))?;

    if !quiet {
        eprintln!("\nShutting down...");
    }
    server.stop();
    Ok(())
}

/// Load all three models and assemble the orchestrator.
///
/// This is the slow part. Models are loaded once here and held for the
/// process lifetime; the orchestrator receives them by reference.
async fn build_orchestrator(config: &Config, quiet: bool, no_download: bool) -> Result<Orchestrator> {
    if !quiet {
        eprintln!("Loading models...");
    }

    let transcriber = load_transcriber(config, quiet, no_download).await?;
    let summary_model = load_text_model(&config.textgen.summary_model, quiet)?;
    let question_model = load_text_model(&config.textgen.question_model, quiet)?;

    if !quiet {
        eprintln!(
            "Models loaded successfully ({} backend).",
            defaults::gpu_backend()
        );
    }

    let chunk_size = config.chunking.chunk_size;
    Ok(Orchestrator::new(
        transcriber,
        Summarizer::new(summary_model, chunk_size),
        QuestionGenerator::new(question_model, chunk_size),
        config.output.path.clone(),
        quiet,
    ))
}

/// Resolve the Whisper model name based on the configured language.
///
/// Ensures a multilingual model is used when the language is not English:
/// - `language="auto"` + `model="small.en"` → switch to `"small"`, warn
/// - `language="de"` + `model="small.en"` → switch to `"small"`, warn
/// - `language="en"` + `model="small.en"` → keep as-is
fn resolve_model_for_language(model: &str, language: &str, quiet: bool) -> String {
    let needs_multilingual = language == defaults::AUTO_LANGUAGE
        || (language != "en" && !language.is_empty());

    if needs_multilingual
        && let Some(multilingual) = model.strip_suffix(".en")
        && crate::models::catalog::get_model(multilingual).is_some()
    {
        if !quiet {
            eprintln!(
                "Switching model '{}' → '{}' (language='{}' needs multilingual model).",
                model, multilingual, language
            );
        }
        return multilingual.to_string();
    }
    model.to_string()
}

/// Load the Whisper model, downloading if needed.
async fn load_transcriber(
    config: &Config,
    quiet: bool,
    no_download: bool,
) -> Result<Arc<dyn Transcriber>> {
    let resolved = resolve_model_for_language(&config.stt.model, &config.stt.language, quiet);

    let model_to_use = if is_model_installed(&resolved) {
        resolved
    } else if no_download {
        if let Some(fallback) = find_any_installed_model() {
            if !quiet {
                eprintln!(
                    "Model '{}' not installed (--no-download). Using '{}'.",
                    resolved, fallback
                );
            }
            fallback
        } else {
            return Err(LecternError::Transcription {
                message: format!(
                    "Model '{}' not installed and --no-download specified.\n\
                     Run: lectern models install {}",
                    resolved, resolved
                ),
            });
        }
    } else {
        if !quiet {
            eprintln!("Downloading model '{}'...", resolved);
        }
        download_model(&resolved, !quiet).await?;
        resolved
    };

    let whisper_config = WhisperConfig {
        model_path: model_path(&model_to_use),
        language: config.stt.language.clone(),
        threads: None,
    };

    Ok(Arc::new(WhisperTranscriber::new(whisper_config)?))
}

/// Load a Flan-T5 text model through the HuggingFace cache.
fn load_text_model(name: &str, quiet: bool) -> Result<Box<dyn TextGenerator>> {
    let info = get_text_model(name).ok_or_else(|| LecternError::ConfigInvalidValue {
        key: "textgen".to_string(),
        message: format!("unknown text model '{name}'. Run 'lectern models list'."),
    })?;

    if !quiet {
        eprintln!("Loading text model '{}'...", info.name);
    }
    Ok(Box::new(CandleT5Generator::load(info)?))
}
