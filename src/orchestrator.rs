//! Lecture processing pipeline.
//!
//! Sequences the full flow for one recording:
//! transcribe → (summarize ∥ generate questions) → assemble report → write.

use crate::audio::wav::load_wav;
use crate::error::Result;
use crate::report::{format_report, write_report};
use crate::stt::transcriber::Transcriber;
use crate::textgen::questions::QuestionGenerator;
use crate::textgen::summarizer::Summarizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

/// The artifacts produced for one lecture recording.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutput {
    /// Full transcription of the recording.
    pub transcript: String,
    /// Space-joined per-chunk summaries.
    pub summary: String,
    /// Newline-joined practice questions.
    pub questions: String,
    /// Where the combined report was written.
    pub report_path: PathBuf,
}

/// Runs the lecture pipeline against injected model adapters.
///
/// Model handles are constructed once at startup and passed in by reference,
/// which keeps the adapters substitutable with mocks in tests.
pub struct Orchestrator {
    transcriber: Arc<dyn Transcriber>,
    summarizer: Summarizer,
    questions: QuestionGenerator,
    report_path: PathBuf,
    quiet: bool,
}

impl Orchestrator {
    /// Create an orchestrator from its three adapters.
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        summarizer: Summarizer,
        questions: QuestionGenerator,
        report_path: PathBuf,
        quiet: bool,
    ) -> Self {
        Self {
            transcriber,
            summarizer,
            questions,
            report_path,
            quiet,
        }
    }

    /// The fixed path the report is written to.
    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Process one lecture recording.
    ///
    /// Transcription runs first and blocks — both downstream stages consume
    /// the transcript. Summarization and question generation then run on two
    /// worker threads; the summary result is consumed first, so a summary
    /// failure surfaces before the questions result while the question thread
    /// still runs to completion. The output tuple is only returned after the
    /// report file is on disk.
    pub fn process(&self, audio_path: &Path) -> Result<ProcessOutput> {
        if !self.quiet {
            eprintln!("Transcribing audio...");
        }
        let samples = load_wav(audio_path)?;
        let transcript = self.transcriber.transcribe(&samples)?;

        if !self.quiet {
            eprintln!("Summarizing and generating questions...");
        }
        let (summary, questions) = thread::scope(|scope| {
            let summary_handle = scope.spawn(|| self.summarizer.summarize(&transcript));
            let questions_handle = scope.spawn(|| self.questions.generate_questions(&transcript));

            let summary = summary_handle.join().unwrap();
            let questions = questions_handle.join().unwrap();
            (summary, questions)
        });
        let summary = summary?;
        let questions = questions?;

        let report = format_report(&transcript, &summary, &questions);
        write_report(&self.report_path, &report)?;

        if !self.quiet {
            eprintln!("Report written to {}", self.report_path.display());
        }

        Ok(ProcessOutput {
            transcript,
            summary,
            questions,
            report_path: self.report_path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LecternError;
    use crate::stt::transcriber::MockTranscriber;
    use crate::textgen::generator::MockTextGenerator;
    use std::path::PathBuf;

    fn write_test_wav(path: &Path) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..1600i16 {
            writer.write_sample(i % 128).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn mock_orchestrator(report_path: PathBuf) -> Orchestrator {
        let transcriber = Arc::new(MockTranscriber::new("mock").with_response("hello world"));
        let summarizer = Summarizer::new(
            Box::new(MockTextGenerator::fixed("mock-sum", &["SUM"])),
            1024,
        );
        let questions = QuestionGenerator::new(
            Box::new(MockTextGenerator::fixed("mock-q", &["Q1", "Q2", "Q3"])),
            1024,
        );
        Orchestrator::new(transcriber, summarizer, questions, report_path, true)
    }

    #[test]
    fn process_returns_all_four_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let audio_path = dir.path().join("lecture.wav");
        write_test_wav(&audio_path);
        let report_path = dir.path().join("lecture_summary.txt");

        let orchestrator = mock_orchestrator(report_path.clone());
        let output = orchestrator.process(&audio_path).unwrap();

        assert_eq!(output.transcript, "hello world");
        assert_eq!(output.summary, "SUM");
        assert_eq!(output.questions, "Q1\nQ2\nQ3");
        assert_eq!(output.report_path, report_path);
        assert!(report_path.exists());
    }

    #[test]
    fn missing_audio_file_fails_before_any_model_runs() {
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("lecture_summary.txt");

        let orchestrator = mock_orchestrator(report_path.clone());
        let result = orchestrator.process(Path::new("/nonexistent/lecture.wav"));

        assert!(matches!(result, Err(LecternError::AudioFileNotFound { .. })));
        assert!(!report_path.exists());
    }

    #[test]
    fn transcription_failure_propagates_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let audio_path = dir.path().join("lecture.wav");
        write_test_wav(&audio_path);
        let report_path = dir.path().join("lecture_summary.txt");

        let transcriber = Arc::new(MockTranscriber::new("mock").with_failure());
        let summarizer =
            Summarizer::new(Box::new(MockTextGenerator::fixed("s", &["SUM"])), 1024);
        let questions =
            QuestionGenerator::new(Box::new(MockTextGenerator::fixed("q", &["Q1"])), 1024);
        let orchestrator =
            Orchestrator::new(transcriber, summarizer, questions, report_path.clone(), true);

        let result = orchestrator.process(&audio_path);
        assert!(matches!(result, Err(LecternError::Transcription { .. })));
        assert!(!report_path.exists());
    }

    #[test]
    fn summary_failure_surfaces_even_when_questions_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let audio_path = dir.path().join("lecture.wav");
        write_test_wav(&audio_path);
        let report_path = dir.path().join("lecture_summary.txt");

        let transcriber = Arc::new(MockTranscriber::new("mock").with_response("hello"));
        let summarizer = Summarizer::new(
            Box::new(MockTextGenerator::fixed("s", &["SUM"]).with_failure()),
            1024,
        );
        let questions =
            QuestionGenerator::new(Box::new(MockTextGenerator::fixed("q", &["Q1"])), 1024);
        let orchestrator =
            Orchestrator::new(transcriber, summarizer, questions, report_path.clone(), true);

        let result = orchestrator.process(&audio_path);
        assert!(matches!(result, Err(LecternError::Generation { .. })));
        assert!(!report_path.exists(), "no report on failure");
    }

    #[test]
    fn report_file_contains_all_sections() {
        let dir = tempfile::tempdir().unwrap();
        let audio_path = dir.path().join("lecture.wav");
        write_test_wav(&audio_path);
        let report_path = dir.path().join("lecture_summary.txt");

        let orchestrator = mock_orchestrator(report_path.clone());
        orchestrator.process(&audio_path).unwrap();

        let contents = std::fs::read_to_string(&report_path).unwrap();
        assert_eq!(
            contents,
            "📝 Transcription:\nhello world\n\n📜 Summary:\nSUM\n\n🤔 Practice Questions:\nQ1\nQ2\nQ3"
        );
    }
}
