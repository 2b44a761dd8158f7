use thiserror::Error;

/// Errors that stop the pipeline before any aggregate is computed.
///
/// Malformed values inside an otherwise well-formed table never surface
/// here; they degrade to neutral values during normalization.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("required columns missing from input: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
