//! Whisper model download and installation management.
//!
//! Handles downloading Whisper models from HuggingFace, verifying their
//! integrity, and storing them in the user's cache directory. (Flan-T5 text
//! models are fetched through the hf-hub cache instead; see
//! `textgen::candle_t5`.)

use crate::error::{LecternError, Result};
use crate::models::catalog::{get_model, resolve_name};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use sha1::{Digest, Sha1};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Get the directory where Whisper models are stored.
///
/// Uses `~/.cache/lectern/models/` on Linux/Unix.
pub fn models_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("lectern")
        .join("models")
}

/// Get the full path for a model file.
///
/// Always returns a path regardless of whether the model is in the catalog.
/// The file may or may not exist on disk.
pub fn model_path(name: &str) -> PathBuf {
    let resolved = resolve_name(name);
    let filename = format!("ggml-{resolved}.bin");
    models_dir().join(filename)
}

/// Check if a model is installed.
pub fn is_model_installed(name: &str) -> bool {
    model_path(name).exists()
}

/// Core download: fetch url, save to path, verify sha1 if non-empty.
async fn download_to_path(
    name: &str,
    url: &str,
    sha1: &str,
    size_mb: u32,
    output_path: &Path,
    progress: bool,
) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| LecternError::Other(format!("Failed to create models directory: {e}")))?;
    }

    if progress {
        eprintln!("Downloading {name} ({size_mb} MB)...");
    }

    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LecternError::Other(format!("Failed to start download: {e}")))?;

    if !response.status().is_success() {
        return Err(LecternError::Other(format!(
            "Download failed with status: {}",
            response.status()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);

    let pb = if progress {
        let pb = ProgressBar::new(total_size);
        pb.set_style(
            // SAFETY: hardcoded template string — always valid
            #[allow(clippy::expect_used)]
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("hardcoded progress bar template")
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    // Download with streaming and hash calculation
    let mut hasher = Sha1::new();
    let mut stream = response.bytes_stream();
    let mut file = fs::File::create(output_path)
        .map_err(|e| LecternError::Other(format!("Failed to create output file: {e}")))?;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk
            .map_err(|e| LecternError::Other(format!("Failed to read download chunk: {e}")))?;

        file.write_all(&chunk)
            .map_err(|e| LecternError::Other(format!("Failed to write to file: {e}")))?;

        hasher.update(&chunk);

        if let Some(ref pb) = pb {
            pb.inc(chunk.len() as u64);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Downloaded");
    }

    // Verify SHA-1 checksum
    if !sha1.is_empty() {
        let calculated_hash = format!("{:x}", hasher.finalize());
        if calculated_hash != sha1 {
            if let Err(e) = fs::remove_file(output_path) {
                eprintln!("lectern: failed to remove corrupted download: {e}");
            }
            return Err(LecternError::Other(format!(
                "SHA-1 checksum mismatch. Expected: {sha1}, got: {calculated_hash}"
            )));
        }
        if progress {
            eprintln!("Checksum verified");
        }
    }

    if progress {
        eprintln!("Model installed to: {}", output_path.display());
    }

    Ok(())
}

/// Download a Whisper model from the catalog.
///
/// # Errors
///
/// Returns an error if:
/// - The model is not found in the catalog
/// - The download fails
/// - The SHA-1 checksum doesn't match (if pinned in the catalog)
/// - The file cannot be written
pub async fn download_model(name: &str, progress: bool) -> Result<PathBuf> {
    let path = model_path(name);

    if path.exists() {
        if progress {
            eprintln!("Model '{}' is already installed at {}", name, path.display());
        }
        return Ok(path);
    }

    let info = get_model(resolve_name(name)).ok_or_else(|| {
        LecternError::Other(format!(
            "Model '{name}' not found in catalog.\n\
             Run 'lectern models list' to see available models."
        ))
    })?;

    download_to_path(name, &info.url(), info.sha1, info.size_mb, &path, progress).await?;
    Ok(path)
}

/// Find any installed model from the catalog.
///
/// Scans through all catalog models and returns the first one that is installed.
/// Useful for fallback scenarios when the configured model is not available.
pub fn find_any_installed_model() -> Option<String> {
    crate::models::catalog::list_models()
        .iter()
        .find(|m| is_model_installed(m.name))
        .map(|m| m.name.to_string())
}

/// Format a catalog entry for `models list` output.
pub fn format_model_info(info: &crate::models::catalog::ModelInfo) -> String {
    let installed = if is_model_installed(info.name) {
        " [installed]"
    } else {
        ""
    };
    let lang = if info.english_only {
        "English-only"
    } else {
        "multilingual"
    };
    format!("{:<12} {:>5} MB  {}{}", info.name, info.size_mb, lang, installed)
}
