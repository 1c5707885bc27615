//! Error types for lectern.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LecternError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio decode errors
    #[error("Audio file not found at {path}")]
    AudioFileNotFound { path: String },

    #[error("Failed to decode audio: {message}")]
    AudioDecode { message: String },

    // Transcription errors
    #[error("Transcription model not found at {path}")]
    TranscriptionModelNotFound { path: String },

    #[error("Transcription inference failed: {message}")]
    TranscriptionInferenceFailed { message: String },

    #[error("Transcription error: {message}")]
    Transcription { message: String },

    // Text generation errors (summarization and question generation)
    #[error("Text model '{model}' failed to load: {message}")]
    TextModelLoad { model: String, message: String },

    #[error("Text generation failed: {message}")]
    Generation { message: String },

    // Report errors
    #[error("Failed to write report to {path}: {message}")]
    ReportWrite { path: String, message: String },

    // Web server errors
    #[error("Web server error: {message}")]
    Server { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, LecternError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn config_file_not_found_display() {
        let error = LecternError::ConfigFileNotFound {
            path: "/path/to/config.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found at /path/to/config.toml"
        );
    }

    #[test]
    fn config_invalid_value_display() {
        let error = LecternError::ConfigInvalidValue {
            key: "chunking.chunk_size".to_string(),
            message: "must be positive".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for chunking.chunk_size: must be positive"
        );
    }

    #[test]
    fn audio_file_not_found_display() {
        let error = LecternError::AudioFileNotFound {
            path: "/tmp/missing.wav".to_string(),
        };
        assert_eq!(error.to_string(), "Audio file not found at /tmp/missing.wav");
    }

    #[test]
    fn audio_decode_display() {
        let error = LecternError::AudioDecode {
            message: "not a WAV file".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to decode audio: not a WAV file");
    }

    #[test]
    fn transcription_model_not_found_display() {
        let error = LecternError::TranscriptionModelNotFound {
            path: "/models/whisper.bin".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Transcription model not found at /models/whisper.bin"
        );
    }

    #[test]
    fn transcription_inference_failed_display() {
        let error = LecternError::TranscriptionInferenceFailed {
            message: "out of memory".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Transcription inference failed: out of memory"
        );
    }

    #[test]
    fn text_model_load_display() {
        let error = LecternError::TextModelLoad {
            model: "flan-t5-large".to_string(),
            message: "download failed".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Text model 'flan-t5-large' failed to load: download failed"
        );
    }

    #[test]
    fn generation_display() {
        let error = LecternError::Generation {
            message: "decoder forward failed".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Text generation failed: decoder forward failed"
        );
    }

    #[test]
    fn report_write_display() {
        let error = LecternError::ReportWrite {
            path: "lecture_summary.txt".to_string(),
            message: "disk full".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to write report to lecture_summary.txt: disk full"
        );
    }

    #[test]
    fn server_display() {
        let error = LecternError::Server {
            message: "address in use".to_string(),
        };
        assert_eq!(error.to_string(), "Web server error: address in use");
    }

    #[test]
    fn other_display() {
        let error = LecternError::Other("unexpected error".to_string());
        assert_eq!(error.to_string(), "unexpected error");
    }

    #[test]
    fn from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: LecternError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn from_toml_error() {
        let toml_str = "invalid = toml = syntax";
        let toml_error = toml::from_str::<toml::Value>(toml_str).unwrap_err();
        let error: LecternError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: LecternError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<LecternError>();
        assert_sync::<LecternError>();
    }

    #[test]
    fn result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
