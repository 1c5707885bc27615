//! HTTP server for the browser UI.
//!
//! Serves the embedded page, accepts uploaded recordings as base64 JSON,
//! runs the orchestrator, and re-exposes the report file for download.
//! Runs on a dedicated thread with an atomic shutdown flag; each request is
//! handled on its own thread since processing a lecture can take minutes.

use crate::error::{LecternError, Result};
use crate::orchestrator::Orchestrator;
use crate::web::page::INDEX_HTML;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

#[derive(Deserialize)]
struct ProcessRequest {
    audio_base64: String,
}

#[derive(Serialize)]
struct ProcessResponse {
    transcript: String,
    summary: String,
    questions: String,
    file: String,
}

/// Handle to a running web server.
pub struct WebServer {
    addr: SocketAddr,
    shutdown: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

impl WebServer {
    /// Bind `addr` and serve the UI until `stop` is called.
    pub fn start(addr: &str, orchestrator: Arc<Orchestrator>) -> Result<Self> {
        let server = Server::http(addr).map_err(|e| LecternError::Server {
            message: format!("Failed to bind {addr}: {e}"),
        })?;
        let bound_addr = server.server_addr().to_ip().ok_or_else(|| LecternError::Server {
            message: "Unexpected non-IP listen address".to_string(),
        })?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = shutdown.clone();
        let handle = thread::spawn(move || run_accept_loop(server, orchestrator, shutdown_flag));

        Ok(Self {
            addr: bound_addr,
            shutdown,
            handle,
        })
    }

    /// The address the server actually bound (useful with port 0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal shutdown and join the server thread.
    pub fn stop(self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Err(err) = self.handle.join() {
            eprintln!("lectern: failed to join web server thread: {err:?}");
        }
    }
}

fn run_accept_loop(server: Server, orchestrator: Arc<Orchestrator>, shutdown: Arc<AtomicBool>) {
    while !shutdown.load(Ordering::Relaxed) {
        match server.recv_timeout(Duration::from_millis(250)) {
            Ok(Some(request)) => {
                let orchestrator = orchestrator.clone();
                thread::spawn(move || handle_request(request, &orchestrator));
            }
            Ok(None) => continue,
            Err(err) => {
                eprintln!("lectern: web server receive error: {err}");
                thread::sleep(Duration::from_millis(100));
            }
        }
    }
}

fn handle_request(request: Request, orchestrator: &Orchestrator) {
    let method = request.method().clone();
    let url = request.url().to_string();

    match (method, url.as_str()) {
        (Method::Get, "/") => respond(request, 200, INDEX_HTML, "text/html; charset=utf-8"),
        (Method::Post, "/api/process") => handle_process(request, orchestrator),
        (Method::Get, "/download") => handle_download(request, orchestrator),
        _ => respond_error(request, 404, "not found"),
    }
}

fn handle_process(mut request: Request, orchestrator: &Orchestrator) {
    let mut body = Vec::new();
    if let Err(err) = request.as_reader().read_to_end(&mut body) {
        respond_error(request, 400, &format!("failed to read body: {err}"));
        return;
    }

    let parsed: ProcessRequest = match serde_json::from_slice(&body) {
        Ok(parsed) => parsed,
        Err(err) => {
            respond_error(request, 400, &format!("invalid request: {err}"));
            return;
        }
    };

    let audio_bytes = match base64::engine::general_purpose::STANDARD.decode(&parsed.audio_base64) {
        Ok(bytes) => bytes,
        Err(err) => {
            respond_error(request, 400, &format!("invalid base64 audio: {err}"));
            return;
        }
    };

    let upload_path = upload_scratch_path();
    if let Err(err) = std::fs::write(&upload_path, &audio_bytes) {
        respond_error(request, 500, &format!("failed to store upload: {err}"));
        return;
    }

    let result = orchestrator.process(&upload_path);
    let _ = std::fs::remove_file(&upload_path);

    match result {
        Ok(output) => {
            let response = ProcessResponse {
                transcript: output.transcript,
                summary: output.summary,
                questions: output.questions,
                file: output.report_path.to_string_lossy().to_string(),
            };
            let body = serde_json::to_string(&response)
                .unwrap_or_else(|_| "{\"error\":\"serialization failed\"}".to_string());
            respond(request, 200, &body, "application/json");
        }
        Err(err) => respond_error(request, 500, &err.to_string()),
    }
}

fn handle_download(request: Request, orchestrator: &Orchestrator) {
    let report_path = orchestrator.report_path();
    let contents = match std::fs::read_to_string(report_path) {
        Ok(contents) => contents,
        Err(_) => {
            respond_error(request, 404, "no report has been generated yet");
            return;
        }
    };

    let response = Response::from_string(contents)
        .with_status_code(StatusCode(200))
        .with_header(header("Content-Type", "text/plain; charset=utf-8"))
        .with_header(header(
            "Content-Disposition",
            &format!(
                "attachment; filename=\"{}\"",
                report_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("lecture_summary.txt")
            ),
        ));

    if let Err(err) = request.respond(response) {
        eprintln!("lectern: failed to send download: {err}");
    }
}

/// Counter distinguishing concurrent uploads within one process.
static UPLOAD_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Scratch path for one uploaded recording.
fn upload_scratch_path() -> PathBuf {
    let nonce = UPLOAD_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("lectern-upload-{}-{nonce}.wav", std::process::id()))
}

fn header(name: &str, value: &str) -> Header {
    // SAFETY: callers only pass static ASCII header names and sanitized values
    #[allow(clippy::expect_used)]
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("valid header")
}

fn respond(request: Request, status: u16, body: &str, content_type: &str) {
    let response = Response::from_string(body)
        .with_status_code(StatusCode(status))
        .with_header(header("Content-Type", content_type));
    if let Err(err) = request.respond(response) {
        eprintln!("lectern: failed to send response: {err}");
    }
}

fn respond_error(request: Request, status: u16, message: &str) {
    let body = serde_json::json!({ "error": message }).to_string();
    respond(request, status, &body, "application/json");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stt::transcriber::MockTranscriber;
    use crate::textgen::generator::MockTextGenerator;
    use crate::textgen::questions::QuestionGenerator;
    use crate::textgen::summarizer::Summarizer;
    use std::io::Write;
    use std::net::TcpStream;

    fn mock_orchestrator(report_path: PathBuf) -> Arc<Orchestrator> {
        let transcriber =
            Arc::new(MockTranscriber::new("mock").with_response("hello world"));
        let summarizer =
            Summarizer::new(Box::new(MockTextGenerator::fixed("s", &["SUM"])), 1024);
        let questions = QuestionGenerator::new(
            Box::new(MockTextGenerator::fixed("q", &["Q1", "Q2", "Q3"])),
            1024,
        );
        Arc::new(Orchestrator::new(
            transcriber,
            summarizer,
            questions,
            report_path,
            true,
        ))
    }

    fn http_roundtrip(addr: SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(10)))
            .unwrap();
        stream.write_all(request.as_bytes()).unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).unwrap();
        response
    }

    fn test_wav_bytes() -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..1600i16 {
            writer.write_sample(i % 64).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn serves_index_page() {
        let dir = tempfile::tempdir().unwrap();
        let server = WebServer::start(
            "127.0.0.1:0",
            mock_orchestrator(dir.path().join("lecture_summary.txt")),
        )
        .unwrap();
        let addr = server.addr();

        let response = http_roundtrip(
            addr,
            "GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        );
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("<!DOCTYPE html>"));

        server.stop();
    }

    #[test]
    fn unknown_route_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let server = WebServer::start(
            "127.0.0.1:0",
            mock_orchestrator(dir.path().join("lecture_summary.txt")),
        )
        .unwrap();

        let response = http_roundtrip(
            server.addr(),
            "GET /missing HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        );
        assert!(response.starts_with("HTTP/1.1 404"));

        server.stop();
    }

    #[test]
    fn download_before_first_request_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let server = WebServer::start(
            "127.0.0.1:0",
            mock_orchestrator(dir.path().join("lecture_summary.txt")),
        )
        .unwrap();

        let response = http_roundtrip(
            server.addr(),
            "GET /download HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        );
        assert!(response.starts_with("HTTP/1.1 404"));

        server.stop();
    }

    #[test]
    fn invalid_json_body_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let server = WebServer::start(
            "127.0.0.1:0",
            mock_orchestrator(dir.path().join("lecture_summary.txt")),
        )
        .unwrap();

        let body = "not json";
        let request = format!(
            "POST /api/process HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let response = http_roundtrip(server.addr(), &request);
        assert!(response.starts_with("HTTP/1.1 400"));
        assert!(response.contains("invalid request"));

        server.stop();
    }

    #[test]
    fn process_request_returns_artifacts_and_download_serves_report() {
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("lecture_summary.txt");
        let server = WebServer::start("127.0.0.1:0", mock_orchestrator(report_path)).unwrap();
        let addr = server.addr();

        let audio = base64::engine::general_purpose::STANDARD.encode(test_wav_bytes());
        let body = serde_json::json!({ "audio_base64": audio }).to_string();
        let request = format!(
            "POST /api/process HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let response = http_roundtrip(addr, &request);
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");

        let json_body = response.split("\r\n\r\n").nth(1).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(json_body).unwrap();
        assert_eq!(parsed["transcript"], "hello world");
        assert_eq!(parsed["summary"], "SUM");
        assert_eq!(parsed["questions"], "Q1\nQ2\nQ3");
        assert!(parsed["file"].as_str().unwrap().ends_with("lecture_summary.txt"));

        let download = http_roundtrip(
            addr,
            "GET /download HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        );
        assert!(download.starts_with("HTTP/1.1 200"));
        assert!(download.contains("Content-Disposition"));
        assert!(download.contains("hello world"));

        server.stop();
    }

    #[test]
    fn upload_scratch_paths_are_unique() {
        let a = upload_scratch_path();
        let b = upload_scratch_path();
        assert_ne!(a, b);
    }
}
