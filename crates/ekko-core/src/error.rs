use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EkkoError {
    #[error("no soil measurement available: nothing to report")]
    MissingInput,

    #[error("failed to parse input record: {0}")]
    InputParse(String),

    #[error("chart rendering failed for {parameter}: {reason}")]
    ChartRendering { parameter: String, reason: String },

    #[error("rendering backend failed: {0}")]
    Rendering(String),

    #[error("failed to load knowledge base from {path}: {reason}")]
    KnowledgeLoad { path: PathBuf, reason: String },

    #[error("invalid knowledge base: {0}")]
    KnowledgeInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
