//! Error types for the chord-to-scale analyzer

use std::fmt;

/// Custom error type for progression analysis
#[derive(Debug, Clone)]
pub enum ScaleError {
    /// E001: No token resolved to a valid chord symbol
    NoResolvableChords(String),
    /// E002: No tonal center could be detected
    NoDetectableTonic,
    /// E003: Configuration validation failed
    ConfigValidationFailed(String),
    /// E004: Invalid configuration parameter
    InvalidConfigParameter(String),
    /// E005: Input validation error
    InputValidationError(String),
    /// E006: Processing pipeline error
    ProcessingPipelineError(String),
    /// E007: Analysis export error
    AnalysisExportError(String),
    /// E008: QA artifact generation error
    QaGenerationError(String),
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleError::NoResolvableChords(input) => {
                write!(f, "E001: No resolvable chords in input - \"{}\"", input)
            }
            ScaleError::NoDetectableTonic => {
                write!(f, "E002: No detectable tonic")
            }
            ScaleError::ConfigValidationFailed(msg) => {
                write!(f, "E003: Configuration validation failed - {}", msg)
            }
            ScaleError::InvalidConfigParameter(msg) => {
                write!(f, "E004: Invalid configuration parameter - {}", msg)
            }
            ScaleError::InputValidationError(msg) => {
                write!(f, "E005: Input validation error - {}", msg)
            }
            ScaleError::ProcessingPipelineError(msg) => {
                write!(f, "E006: Processing pipeline error - {}", msg)
            }
            ScaleError::AnalysisExportError(msg) => {
                write!(f, "E007: Analysis export error - {}", msg)
            }
            ScaleError::QaGenerationError(msg) => {
                write!(f, "E008: QA artifact generation error - {}", msg)
            }
        }
    }
}

impl std::error::Error for ScaleError {}

// From implementations for common error types
impl From<std::io::Error> for ScaleError {
    fn from(err: std::io::Error) -> Self {
        ScaleError::AnalysisExportError(format!("File I/O error: {}", err))
    }
}

impl From<serde_json::Error> for ScaleError {
    fn from(err: serde_json::Error) -> Self {
        ScaleError::AnalysisExportError(format!("JSON serialization error: {}", err))
    }
}

impl From<anyhow::Error> for ScaleError {
    fn from(err: anyhow::Error) -> Self {
        ScaleError::ProcessingPipelineError(format!("Generic error: {}", err))
    }
}

/// Result type alias for chord-to-scale operations
pub type Result<T> = std::result::Result<T, ScaleError>;
