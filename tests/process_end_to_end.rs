//! End-to-end pipeline tests with mock models.

use lectern::orchestrator::Orchestrator;
use lectern::stt::transcriber::MockTranscriber;
use lectern::textgen::generator::MockTextGenerator;
use lectern::textgen::questions::QuestionGenerator;
use lectern::textgen::summarizer::Summarizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn write_test_wav(path: &Path) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create WAV");
    for i in 0..16000i16 {
        writer.write_sample(i % 256).expect("write sample");
    }
    writer.finalize().expect("finalize WAV");
}

fn stub_orchestrator(transcript: &str, report_path: PathBuf) -> Orchestrator {
    let transcriber = Arc::new(MockTranscriber::new("stub-whisper").with_response(transcript));
    let summarizer = Summarizer::new(
        Box::new(MockTextGenerator::fixed("stub-summarizer", &["SUM"])),
        1024,
    );
    let questions = QuestionGenerator::new(
        Box::new(MockTextGenerator::fixed("stub-questions", &["Q1", "Q2", "Q3"])),
        1024,
    );
    Orchestrator::new(transcriber, summarizer, questions, report_path, true)
}

#[test]
fn returns_expected_artifacts_for_single_chunk_transcript() {
    let dir = tempfile::tempdir().expect("tempdir");
    let audio_path = dir.path().join("lecture.wav");
    write_test_wav(&audio_path);
    let report_path = dir.path().join("lecture_summary.txt");

    let orchestrator = stub_orchestrator("hello world", report_path.clone());
    let output = orchestrator.process(&audio_path).expect("process");

    assert_eq!(output.transcript, "hello world");
    assert_eq!(output.summary, "SUM");
    assert_eq!(output.questions, "Q1\nQ2\nQ3");
    assert_eq!(output.report_path, report_path);
}

#[test]
fn report_file_contains_all_values_under_their_headers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let audio_path = dir.path().join("lecture.wav");
    write_test_wav(&audio_path);
    let report_path = dir.path().join("lecture_summary.txt");

    let orchestrator = stub_orchestrator("hello world", report_path.clone());
    orchestrator.process(&audio_path).expect("process");

    let contents = std::fs::read_to_string(&report_path).expect("read report");
    assert!(contents.contains("📝 Transcription:\nhello world"));
    assert!(contents.contains("📜 Summary:\nSUM"));
    assert!(contents.contains("🤔 Practice Questions:\nQ1\nQ2\nQ3"));

    // Sections are separated by blank lines.
    let sections: Vec<&str> = contents.split("\n\n").collect();
    assert_eq!(sections.len(), 3);
}

#[test]
fn multi_chunk_transcript_scales_summary_and_questions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let audio_path = dir.path().join("lecture.wav");
    write_test_wav(&audio_path);
    let report_path = dir.path().join("lecture_summary.txt");

    // 2500 chars at chunk size 1024 → 3 chunks
    let transcript = "a".repeat(2500);
    let orchestrator = stub_orchestrator(&transcript, report_path);
    let output = orchestrator.process(&audio_path).expect("process");

    assert_eq!(output.summary, "SUM SUM SUM");
    assert_eq!(output.questions.lines().count(), 9);
}

#[test]
fn reruns_with_deterministic_stubs_are_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let audio_path = dir.path().join("lecture.wav");
    write_test_wav(&audio_path);
    let report_path = dir.path().join("lecture_summary.txt");

    let orchestrator = stub_orchestrator("the same lecture", report_path.clone());

    orchestrator.process(&audio_path).expect("first run");
    let first = std::fs::read(&report_path).expect("read first");

    orchestrator.process(&audio_path).expect("second run");
    let second = std::fs::read(&report_path).expect("read second");

    assert_eq!(first, second, "reports must be byte-identical");
}

#[test]
fn concurrent_requests_leave_exactly_one_complete_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let audio_path = dir.path().join("lecture.wav");
    write_test_wav(&audio_path);
    let report_path = dir.path().join("lecture_summary.txt");

    // Two orchestrators share the report path but transcribe different inputs.
    let transcript_a = "lecture A ".repeat(5000);
    let transcript_b = "lecture B ".repeat(5000);
    let orchestrator_a = stub_orchestrator(&transcript_a, report_path.clone());
    let orchestrator_b = stub_orchestrator(&transcript_b, report_path.clone());

    std::thread::scope(|scope| {
        for _ in 0..5 {
            scope.spawn(|| orchestrator_a.process(&audio_path).expect("process A"));
            scope.spawn(|| orchestrator_b.process(&audio_path).expect("process B"));
        }
    });

    let contents = std::fs::read_to_string(&report_path).expect("read report");
    let expected_a = contents.contains(&transcript_a);
    let expected_b = contents.contains(&transcript_b);
    assert!(
        expected_a ^ expected_b,
        "final report must equal exactly one of the two complete reports"
    );
    assert!(contents.starts_with("📝 Transcription:\n"));
    assert!(contents.contains("🤔 Practice Questions:\nQ1\nQ2\nQ3"));
}
