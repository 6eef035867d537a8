//! Input manager: loads the resume upload and the job description

use crate::error::{GapAnalyzerError, Result};
use crate::input::file_detector::MediaType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;

/// An uploaded resume: raw bytes plus the media type it was declared as.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub name: String,
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, media_type: MediaType, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type,
            bytes,
        }
    }
}

/// Where the job description comes from.
#[derive(Debug, Clone)]
pub enum JobSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl JobSource {
    pub fn label(&self) -> String {
        match self {
            JobSource::Inline(_) => "inline text".to_string(),
            JobSource::File(path) => path.display().to_string(),
            JobSource::Stdin => "stdin".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct InputManager;

impl InputManager {
    pub fn new() -> Self {
        Self
    }

    /// Read a resume file completely. The declared type wins over the extension.
    pub async fn load_resume(&self, path: &Path, declared: Option<MediaType>) -> Result<UploadedDocument> {
        if !path.exists() {
            return Err(GapAnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let media_type = declared.unwrap_or_else(|| MediaType::from_path(path));
        if !media_type.is_resume_format() {
            return Err(GapAnalyzerError::UnsupportedFormat(format!(
                "Resume must be a PDF or DOCX document, got {} for: {}",
                media_type,
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        info!("Loaded resume {} ({}, {} bytes)", path.display(), media_type, bytes.len());

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(UploadedDocument::new(name, media_type, bytes))
    }

    /// Extract the visible text of an uploaded resume.
    pub fn read_resume(&self, document: &UploadedDocument) -> Result<String> {
        let text = match document.media_type {
            MediaType::Pdf => {
                info!("Extracting text from PDF: {}", document.name);
                PdfExtractor.extract(&document.bytes)
            }
            MediaType::Docx => {
                info!("Extracting text from DOCX: {}", document.name);
                DocxExtractor.extract(&document.bytes)
            }
            other => {
                return Err(GapAnalyzerError::UnsupportedFormat(format!(
                    "Cannot read {} document as a resume: {}",
                    other, document.name
                )))
            }
        };

        let text = text.map_err(|e| match e {
            GapAnalyzerError::DocumentRead { reason, .. } => {
                GapAnalyzerError::document_read(document.name.clone(), reason)
            }
            other => other,
        })?;

        debug!("Resume text length: {} characters", text.chars().count());
        Ok(text)
    }

    pub async fn load_job_description(&self, source: &JobSource) -> Result<String> {
        match source {
            JobSource::Inline(text) => Ok(text.clone()),
            JobSource::Stdin => {
                info!("Reading job description from stdin");
                let mut bytes = Vec::new();
                tokio::io::stdin().read_to_end(&mut bytes).await?;
                PlainTextExtractor.extract(&bytes)
            }
            JobSource::File(path) => {
                if !path.exists() {
                    return Err(GapAnalyzerError::InvalidInput(format!(
                        "File does not exist: {}",
                        path.display()
                    )));
                }

                let bytes = fs::read(path).await?;
                match MediaType::from_path(path) {
                    MediaType::Text => {
                        info!("Reading plain text job description: {}", path.display());
                        PlainTextExtractor.extract(&bytes)
                    }
                    MediaType::Markdown => {
                        info!("Processing markdown job description: {}", path.display());
                        MarkdownExtractor.extract(&bytes)
                    }
                    _ => Err(GapAnalyzerError::UnsupportedFormat(format!(
                        "Job description must be a .txt or .md file: {}",
                        path.display()
                    ))),
                }
            }
        }
    }
}
