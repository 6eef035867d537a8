//! Media type detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl MediaType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => MediaType::Pdf,
            "docx" => MediaType::Docx,
            "txt" => MediaType::Text,
            "md" | "markdown" => MediaType::Markdown,
            _ => MediaType::Unknown,
        }
    }

    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_lowercase().as_str() {
            PDF_MIME => MediaType::Pdf,
            DOCX_MIME => MediaType::Docx,
            "text/plain" => MediaType::Text,
            "text/markdown" => MediaType::Markdown,
            _ => MediaType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(MediaType::Unknown)
    }

    /// Parse a user declaration: either a short name or a MIME type
    pub fn from_declaration(declared: &str) -> Self {
        if declared.contains('/') {
            Self::from_mime(declared)
        } else {
            Self::from_extension(declared.trim_start_matches('.'))
        }
    }

    /// Formats accepted as a resume upload
    pub fn is_resume_format(&self) -> bool {
        matches!(self, MediaType::Pdf | MediaType::Docx)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaType::Pdf => "PDF",
            MediaType::Docx => "DOCX",
            MediaType::Text => "plain text",
            MediaType::Markdown => "Markdown",
            MediaType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection() {
        assert_eq!(MediaType::from_extension("PDF"), MediaType::Pdf);
        assert_eq!(MediaType::from_path(Path::new("resume.docx")), MediaType::Docx);
        assert_eq!(MediaType::from_path(Path::new("resume")), MediaType::Unknown);
        assert_eq!(MediaType::from_mime(DOCX_MIME), MediaType::Docx);
        assert_eq!(MediaType::from_declaration("application/pdf"), MediaType::Pdf);
        assert_eq!(MediaType::from_declaration(".docx"), MediaType::Docx);
    }

    #[test]
    fn test_resume_formats() {
        assert!(MediaType::Pdf.is_resume_format());
        assert!(MediaType::Docx.is_resume_format());
        assert!(!MediaType::Markdown.is_resume_format());
        assert!(!MediaType::Unknown.is_resume_format());
    }
}
