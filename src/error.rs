//! Error types for sceneseg.

use thiserror::Error;

/// Library-level error type for segmentation operations.
///
/// Structural malformity at the input boundary is the only hard failure:
/// numeric edge cases during reconciliation (overlaps, missing durations,
/// exhausted transcripts) are recovered locally by the pipeline and never
/// surface as errors. An empty transcript is likewise not an error; the
/// engine degrades to duration-only or empty output.
#[derive(Error, Debug)]
pub enum SegmentationError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for segmentation operations.
pub type Result<T> = std::result::Result<T, SegmentationError>;
