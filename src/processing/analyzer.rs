//! Analysis engine: the Analyze action from inputs to report

use crate::config::Config;
use crate::error::Result;
use crate::input::manager::{InputManager, UploadedDocument};
use crate::output::report::{AnalysisReport, MatchSummary, ReportMetadata};
use crate::processing::gap::GapAnalyzer;
use crate::processing::similarity::{SimilarityScorer, TfidfOptions};
use crate::processing::stopwords::StopWords;
use crate::processing::text_processor::TextNormalizer;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;

pub const MISSING_INPUT_WARNING: &str = "Please upload a resume and paste the job description.";

/// The two inputs as they stand when Analyze is triggered.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub resume: Option<UploadedDocument>,
    pub job_description: Option<String>,
    /// Label of where the job description came from, for the report
    pub job_source: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Completed(AnalysisReport),
    /// An input was absent; nothing was analyzed
    MissingInput { warning: &'static str },
}

/// Main analysis engine that coordinates the pipeline stages
pub struct AnalysisEngine {
    input: InputManager,
    normalizer: TextNormalizer,
    scorer: SimilarityScorer,
    stopwords: Arc<StopWords>,
}

impl AnalysisEngine {
    pub fn new(stopwords: Arc<StopWords>, config: &Config) -> Self {
        Self {
            input: InputManager::new(),
            normalizer: TextNormalizer::new(),
            scorer: SimilarityScorer::new(TfidfOptions::from(&config.scoring)),
            stopwords,
        }
    }

    /// Run the whole pipeline once, or report which input is missing.
    pub fn handle(&self, request: AnalysisRequest) -> Result<AnalysisOutcome> {
        let job_description = request.job_description.filter(|text| !text.is_empty());

        let (resume, job_description) = match (request.resume, job_description) {
            (Some(resume), Some(job_description)) => (resume, job_description),
            (resume, job_description) => {
                warn!(
                    "Analysis skipped: resume {}, job description {}",
                    if resume.is_some() { "present" } else { "missing" },
                    if job_description.is_some() { "present" } else { "missing" }
                );
                return Ok(AnalysisOutcome::MissingInput {
                    warning: MISSING_INPUT_WARNING,
                });
            }
        };

        let start_time = Instant::now();
        let resume_text = self.input.read_resume(&resume)?;

        let mut report = self.analyze_texts(&resume_text, &job_description);
        report.metadata.resume_file = Some(resume.name);
        report.metadata.job_source = request.job_source;
        report.metadata.processing_time_ms = start_time.elapsed().as_millis() as u64;

        Ok(AnalysisOutcome::Completed(report))
    }

    /// Score and gap-analyze two already extracted texts.
    pub fn analyze_texts(&self, resume_text: &str, job_text: &str) -> AnalysisReport {
        let start_time = Instant::now();

        let resume_clean = self.normalizer.normalize(resume_text);
        let job_clean = self.normalizer.normalize(job_text);

        let similarity = self.scorer.compare(&resume_clean, &job_clean);
        let gap_analysis = GapAnalyzer::new(&self.stopwords).analyze(&resume_clean, &job_clean);

        info!(
            "Match score {}% with {} missing keywords",
            similarity.score,
            gap_analysis.missing_skills.len()
        );

        AnalysisReport {
            match_summary: MatchSummary::from(similarity),
            gap_analysis,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: None,
                job_source: None,
                stopword_source: self.stopwords.source().to_string(),
                resume_characters: resume_text.chars().count(),
                job_characters: job_text.chars().count(),
                processing_time_ms: start_time.elapsed().as_millis() as u64,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::file_detector::MediaType;

    fn engine() -> AnalysisEngine {
        AnalysisEngine::new(Arc::new(StopWords::english()), &Config::default())
    }

    #[test]
    fn test_docker_scenario() {
        let report = engine().analyze_texts(
            "Python developer with SQL experience",
            "Python developer with SQL and Docker experience",
        );

        assert_eq!(report.gap_analysis.missing_skills, vec!["docker"]);
        assert_eq!(report.match_summary.match_percentage.percentage(), 74.74);
    }

    #[test]
    fn test_identical_texts() {
        let text = "Senior Rust Engineer. Tokio, Axum & PostgreSQL; 5+ years!";
        let report = engine().analyze_texts(text, text);

        assert_eq!(report.match_summary.match_percentage.percentage(), 100.0);
        assert!(report.gap_analysis.missing_skills.is_empty());
        assert_eq!(report.headline(), "Resume matches the job by 100.00%");
    }

    #[test]
    fn test_empty_job_text() {
        let report = engine().analyze_texts("Python developer with SQL experience", "");

        assert!(report.gap_analysis.missing_skills.is_empty());
        assert_eq!(report.match_summary.match_percentage.percentage(), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let engine = engine();
        let resume = "Backend engineer: Go, gRPC, Kafka. Some Rust.";
        let job = "Looking for a Rust engineer with Kafka, Kubernetes and Terraform.";

        let first = engine.analyze_texts(resume, job);
        let second = engine.analyze_texts(resume, job);

        assert_eq!(first.match_summary.match_percentage, second.match_summary.match_percentage);
        assert_eq!(first.gap_analysis.missing_skills, second.gap_analysis.missing_skills);
        assert_eq!(first.gap_analysis.missing_skills, vec!["kubernetes", "looking", "terraform"]);
    }

    #[test]
    fn test_missing_resume_skips_analysis() {
        let request = AnalysisRequest {
            resume: None,
            job_description: Some("Rust developer".to_string()),
            job_source: None,
        };

        match engine().handle(request).unwrap() {
            AnalysisOutcome::MissingInput { warning } => assert_eq!(warning, MISSING_INPUT_WARNING),
            AnalysisOutcome::Completed(_) => panic!("analysis should not run without a resume"),
        }
    }

    #[test]
    fn test_empty_job_description_skips_analysis() {
        // Corrupt bytes: reaching the reader would be an error, not a warning
        let request = AnalysisRequest {
            resume: Some(UploadedDocument::new("resume.pdf", MediaType::Pdf, b"garbage".to_vec())),
            job_description: Some(String::new()),
            job_source: None,
        };

        let outcome = engine().handle(request).unwrap();
        assert!(matches!(outcome, AnalysisOutcome::MissingInput { .. }));
    }

    #[test]
    fn test_corrupt_resume_is_reported() {
        let request = AnalysisRequest {
            resume: Some(UploadedDocument::new("resume.docx", MediaType::Docx, b"garbage".to_vec())),
            job_description: Some("Rust developer".to_string()),
            job_source: None,
        };

        let error = engine().handle(request).unwrap_err();
        assert!(error.to_string().contains("resume.docx"));
    }
}
