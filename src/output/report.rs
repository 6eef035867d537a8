//! Report structures produced by one analysis run

use crate::processing::gap::GapAnalysis;
use crate::processing::similarity::{MatchScore, SimilarityResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_GAP_MESSAGE: &str = "No major skill gaps found";

/// Everything one analysis produced, ready for formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// TF-IDF similarity between the two documents
    pub match_summary: MatchSummary,

    /// Job keywords missing from the resume
    pub gap_analysis: GapAnalysis,

    /// Report metadata and generation info
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Match percentage (0-100, two decimals)
    pub match_percentage: MatchScore,

    pub band: MatchBand,

    /// Raw cosine similarity before scaling and rounding
    pub cosine_similarity: f64,

    /// Distinct terms across both documents
    pub vocabulary_size: usize,

    pub top_job_terms: Vec<WeightedTerm>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the analyzer used
    pub analyzer_version: String,

    /// Resume file analyzed, when the text came from an upload
    pub resume_file: Option<String>,

    /// Where the job description came from
    pub job_source: Option<String>,

    /// Stopword corpus used for keyword extraction
    pub stopword_source: String,

    pub resume_characters: usize,
    pub job_characters: usize,

    /// Total processing time
    pub processing_time_ms: u64,
}

impl MatchBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            MatchBand::Excellent
        } else if percentage >= 60.0 {
            MatchBand::Good
        } else if percentage >= 40.0 {
            MatchBand::Fair
        } else {
            MatchBand::Poor
        }
    }
}

impl fmt::Display for MatchBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchBand::Excellent => "Excellent",
            MatchBand::Good => "Good",
            MatchBand::Fair => "Fair",
            MatchBand::Poor => "Poor",
        };
        write!(f, "{}", label)
    }
}

impl From<SimilarityResult> for MatchSummary {
    fn from(result: SimilarityResult) -> Self {
        Self {
            band: MatchBand::from_percentage(result.score.percentage()),
            match_percentage: result.score,
            cosine_similarity: result.cosine,
            vocabulary_size: result.vocabulary_size,
            top_job_terms: result
                .top_job_terms
                .into_iter()
                .map(|(term, weight)| WeightedTerm { term, weight })
                .collect(),
        }
    }
}

impl AnalysisReport {
    /// "Resume matches the job by X%"
    pub fn headline(&self) -> String {
        format!("Resume matches the job by {}%", self.match_summary.match_percentage)
    }

    /// Sorted, comma separated missing keywords or the no-gap message
    pub fn gap_line(&self) -> String {
        if self.gap_analysis.missing_skills.is_empty() {
            NO_GAP_MESSAGE.to_string()
        } else {
            self.gap_analysis.missing_skills.join(", ")
        }
    }
}
