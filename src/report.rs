//! Report assembly and output.
//!
//! The report is a single UTF-8 text file combining the transcript, summary,
//! and practice questions under fixed headers. It lives at one fixed path and
//! is overwritten on every request.

use crate::defaults::{QUESTIONS_HEADER, SUMMARY_HEADER, TRANSCRIPT_HEADER};
use crate::error::{LecternError, Result};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Assemble the three result strings into the report text.
pub fn format_report(transcript: &str, summary: &str, questions: &str) -> String {
    format!(
        "{TRANSCRIPT_HEADER}\n{transcript}\n\n{SUMMARY_HEADER}\n{summary}\n\n{QUESTIONS_HEADER}\n{questions}"
    )
}

/// Counter distinguishing temp files of concurrent requests in one process.
static WRITE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write the report to `path`, replacing any previous report.
///
/// The content goes to a temporary sibling file first and is renamed into
/// place, so a concurrent reader (or a second request racing on the same
/// path) only ever observes one complete report — last writer wins.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LecternError::ReportWrite {
            path: path.to_string_lossy().to_string(),
            message: "path has no filename".to_string(),
        })?;

    let nonce = WRITE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_path = dir.join(format!(".{filename}.{}.{nonce}.tmp", std::process::id()));

    std::fs::write(&tmp_path, contents).map_err(|e| LecternError::ReportWrite {
        path: tmp_path.to_string_lossy().to_string(),
        message: e.to_string(),
    })?;

    std::fs::rename(&tmp_path, path).map_err(|e| {
        // Best effort: don't leave the temp file behind on failure.
        let _ = std::fs::remove_file(&tmp_path);
        LecternError::ReportWrite {
            path: path.to_string_lossy().to_string(),
            message: e.to_string(),
        }
    })?;

    Ok(())
}
