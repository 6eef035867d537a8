//! Error handling for the resume gap analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GapAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read document '{document}': {reason}")]
    DocumentRead { document: String, reason: String },

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Stopword corpus error: {0}")]
    StopwordCorpus(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, GapAnalyzerError>;

impl GapAnalyzerError {
    pub fn document_read(document: impl Into<String>, reason: impl ToString) -> Self {
        GapAnalyzerError::DocumentRead {
            document: document.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convert zip container errors to our custom error type
impl From<zip::result::ZipError> for GapAnalyzerError {
    fn from(err: zip::result::ZipError) -> Self {
        GapAnalyzerError::document_read("DOCX container", err)
    }
}

/// Convert XML parser errors to our custom error type
impl From<quick_xml::Error> for GapAnalyzerError {
    fn from(err: quick_xml::Error) -> Self {
        GapAnalyzerError::document_read("DOCX body", err)
    }
}
