//! Integration tests for the resume gap analyzer

use resume_gap_analyzer::config::Config;
use resume_gap_analyzer::error::GapAnalyzerError;
use resume_gap_analyzer::input::{InputManager, JobSource, MediaType};
use resume_gap_analyzer::processing::analyzer::{
    AnalysisEngine, AnalysisOutcome, AnalysisRequest, MISSING_INPUT_WARNING,
};
use resume_gap_analyzer::processing::stopwords::StopWords;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|text| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn engine() -> AnalysisEngine {
    AnalysisEngine::new(Arc::new(StopWords::english()), &Config::default())
}

async fn request_for(resume: &Path, job: JobSource) -> AnalysisRequest {
    let manager = InputManager::new();
    AnalysisRequest {
        resume: Some(manager.load_resume(resume, None).await.unwrap()),
        job_description: Some(manager.load_job_description(&job).await.unwrap()),
        job_source: Some(job.label()),
    }
}

#[tokio::test]
async fn test_docx_resume_against_inline_job() {
    let dir = TempDir::new().unwrap();
    let resume = write_file(&dir, "resume.docx", &docx_bytes(&["Python developer with SQL experience"]));

    let request = request_for(
        &resume,
        JobSource::Inline("Python developer with SQL and Docker experience".to_string()),
    )
    .await;

    match engine().handle(request).unwrap() {
        AnalysisOutcome::Completed(report) => {
            assert_eq!(report.headline(), "Resume matches the job by 74.74%");
            assert_eq!(report.gap_analysis.missing_skills, vec!["docker"]);
            assert_eq!(report.metadata.resume_file.as_deref(), Some("resume.docx"));
            assert_eq!(report.metadata.job_source.as_deref(), Some("inline text"));
        }
        AnalysisOutcome::MissingInput { .. } => panic!("both inputs were provided"),
    }
}

#[tokio::test]
async fn test_pdf_resume_against_job_file() {
    // Two pages: "Python developer" / "with SQL experience"
    let resume = Path::new("tests/fixtures/resume.pdf");
    let job = JobSource::File(PathBuf::from("tests/fixtures/job_description.txt"));

    let request = request_for(resume, job).await;
    assert_eq!(request.resume.as_ref().unwrap().media_type, MediaType::Pdf);

    match engine().handle(request).unwrap() {
        AnalysisOutcome::Completed(report) => {
            assert_eq!(report.headline(), "Resume matches the job by 74.74%");
            assert_eq!(report.gap_analysis.missing_skills, vec!["docker"]);
            assert_eq!(report.metadata.resume_file.as_deref(), Some("resume.pdf"));
        }
        AnalysisOutcome::MissingInput { .. } => panic!("both inputs were provided"),
    }
}

#[tokio::test]
async fn test_truncated_pdf_is_a_read_error() {
    let resume = Path::new("tests/fixtures/truncated.pdf");
    let request = request_for(resume, JobSource::Inline("Rust developer".to_string())).await;

    match engine().handle(request).unwrap_err() {
        GapAnalyzerError::DocumentRead { document, .. } => assert_eq!(document, "truncated.pdf"),
        other => panic!("expected a document read error, got {}", other),
    }
}

#[tokio::test]
async fn test_identical_documents_score_full_match() {
    let dir = TempDir::new().unwrap();
    let text = "Senior Rust engineer building Tokio services";
    let resume = write_file(&dir, "resume.docx", &docx_bytes(&[text]));

    let request = request_for(&resume, JobSource::Inline(text.to_string())).await;

    match engine().handle(request).unwrap() {
        AnalysisOutcome::Completed(report) => {
            assert_eq!(report.headline(), "Resume matches the job by 100.00%");
            assert_eq!(report.gap_line(), "No major skill gaps found");
        }
        AnalysisOutcome::MissingInput { .. } => panic!("both inputs were provided"),
    }
}

#[tokio::test]
async fn test_job_description_from_text_file() {
    let dir = TempDir::new().unwrap();
    let resume = write_file(&dir, "resume.docx", &docx_bytes(&["Python developer with SQL experience"]));
    let job = JobSource::File(PathBuf::from("tests/fixtures/job_description.txt"));

    match engine().handle(request_for(&resume, job).await).unwrap() {
        AnalysisOutcome::Completed(report) => {
            assert_eq!(report.match_summary.match_percentage.percentage(), 74.74);
            assert_eq!(report.gap_analysis.missing_skills, vec!["docker"]);
        }
        AnalysisOutcome::MissingInput { .. } => panic!("both inputs were provided"),
    }
}

#[tokio::test]
async fn test_job_description_from_markdown() {
    let manager = InputManager::new();
    let job = JobSource::File(PathBuf::from("tests/fixtures/job_description.md"));

    let text = manager.load_job_description(&job).await.unwrap();
    assert!(text.contains("Backend Engineer"));
    assert!(text.contains("Docker experience"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains('#'));

    let report = engine().analyze_texts("Python developer with SQL experience", &text);
    assert_eq!(
        report.gap_analysis.missing_skills,
        vec!["backend", "docker", "engineer", "need"]
    );
}

#[tokio::test]
async fn test_missing_resume_gives_warning() {
    let manager = InputManager::new();
    let job = JobSource::Inline("Rust developer".to_string());
    let request = AnalysisRequest {
        resume: None,
        job_description: Some(manager.load_job_description(&job).await.unwrap()),
        job_source: Some(job.label()),
    };

    match engine().handle(request).unwrap() {
        AnalysisOutcome::MissingInput { warning } => {
            assert_eq!(warning, MISSING_INPUT_WARNING);
            assert_eq!(warning, "Please upload a resume and paste the job description.");
        }
        AnalysisOutcome::Completed(_) => panic!("analysis should not run without a resume"),
    }
}

#[tokio::test]
async fn test_missing_job_description_gives_warning() {
    let dir = TempDir::new().unwrap();
    let resume = write_file(&dir, "resume.docx", &docx_bytes(&["Rust developer"]));
    let request = AnalysisRequest {
        resume: Some(InputManager::new().load_resume(&resume, None).await.unwrap()),
        job_description: None,
        job_source: None,
    };

    let outcome = engine().handle(request).unwrap();
    assert!(matches!(outcome, AnalysisOutcome::MissingInput { .. }));
}

#[tokio::test]
async fn test_declared_type_overrides_extension() {
    let dir = TempDir::new().unwrap();
    let resume = write_file(&dir, "upload.bin", &docx_bytes(&["Rust developer"]));
    let manager = InputManager::new();

    let document = manager
        .load_resume(&resume, Some(MediaType::from_declaration(resume_gap_analyzer::input::file_detector::DOCX_MIME)))
        .await
        .unwrap();
    assert_eq!(document.media_type, MediaType::Docx);
    assert_eq!(manager.read_resume(&document).unwrap().trim(), "Rust developer");
}

#[tokio::test]
async fn test_corrupt_docx_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let resume = write_file(&dir, "broken.docx", b"this is not a zip archive");

    let request = request_for(&resume, JobSource::Inline("Rust developer".to_string())).await;
    let error = engine().handle(request).unwrap_err();

    match error {
        GapAnalyzerError::DocumentRead { document, .. } => assert_eq!(document, "broken.docx"),
        other => panic!("expected a document read error, got {}", other),
    }
}

#[tokio::test]
async fn test_unsupported_resume_type() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.load_resume(path, None).await;
    assert!(matches!(result, Err(GapAnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_unsupported_job_description_type() {
    let manager = InputManager::new();
    let job = JobSource::File(PathBuf::from("tests/fixtures/unsupported.xyz"));

    let result = manager.load_job_description(&job).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.pdf");

    let result = manager.load_resume(path, None).await;
    assert!(result.is_err());
}
