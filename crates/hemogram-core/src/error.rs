use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HemogramError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("document has no extractable text layer: {0}")]
    MalformedInput(String),

    #[error("no recognizable metrics found in document")]
    EmptyResult,

    #[error("failed to load metric catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid metric catalog: {0}")]
    CatalogInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
