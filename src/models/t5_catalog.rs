//! Catalog of quantized Flan-T5 models for summarization and question generation.

/// Metadata for a Flan-T5 text model.
#[derive(Debug, Clone, PartialEq)]
pub struct TextModelInfo {
    /// Short name used in config and CLI (e.g. "flan-t5-large").
    pub name: &'static str,
    /// Human-readable display name.
    pub display_name: &'static str,
    /// Approximate download size in MB.
    pub size_mb: u32,
    /// HuggingFace repository containing the model.
    pub hf_repo: &'static str,
    /// GGUF model filename within the repository.
    pub hf_filename: &'static str,
    /// JSON config filename within the repository.
    pub config_filename: &'static str,
    /// Short description with expected latency.
    pub description: &'static str,
}

/// Shared tokenizer filename — all Flan-T5 variants use the same tokenizer.
pub const TOKENIZER_FILENAME: &str = "tokenizer.json";

/// HuggingFace repository for quantized T5 models.
pub const TEXT_MODEL_REPO: &str = "lmz/candle-quantized-t5";

/// Available text models, ordered by size (smallest first).
pub const TEXT_MODELS: &[TextModelInfo] = &[
    TextModelInfo {
        name: "flan-t5-small",
        display_name: "Flan-T5 Small (English, 64 MB)",
        size_mb: 64,
        hf_repo: TEXT_MODEL_REPO,
        hf_filename: "model.gguf",
        config_filename: "config.json",
        description: "Fast, lower quality. Suitable for smoke-testing the pipeline.",
    },
    TextModelInfo {
        name: "flan-t5-base",
        display_name: "Flan-T5 Base (English, 263 MB)",
        size_mb: 263,
        hf_repo: TEXT_MODEL_REPO,
        hf_filename: "model-flan-t5-base.gguf",
        config_filename: "config-flan-t5-base.json",
        description: "Balanced speed and quality for summaries and questions.",
    },
    TextModelInfo {
        name: "flan-t5-large",
        display_name: "Flan-T5 Large (English, 852 MB)",
        size_mb: 852,
        hf_repo: TEXT_MODEL_REPO,
        hf_filename: "model-flan-t5-large.gguf",
        config_filename: "config-flan-t5-large.json",
        description: "Best quality, slower. The default for lecture processing.",
    },
];

/// Look up a text model by name.
pub fn get_text_model(name: &str) -> Option<&'static TextModelInfo> {
    TEXT_MODELS.iter().find(|m| m.name == name)
}

/// List all available text models.
pub fn list_text_models() -> &'static [TextModelInfo] {
    TEXT_MODELS
}
