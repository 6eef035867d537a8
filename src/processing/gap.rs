//! Keyword gap analysis between a job description and a resume

use crate::processing::stopwords::StopWords;
use crate::processing::text_processor::TextNormalizer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique non-stopword words of a normalized text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(HashSet<String>);

impl KeywordSet {
    pub fn from_normalized(text: &str, stopwords: &StopWords) -> Self {
        Self(
            TextNormalizer::words(text)
                .filter(|word| !stopwords.contains(word))
                .map(str::to_string)
                .collect(),
        )
    }

    /// Keywords of `self` that `other` lacks, sorted
    pub fn missing_from(&self, other: &KeywordSet) -> Vec<String> {
        let mut missing: Vec<String> = self.0.difference(&other.0).cloned().collect();
        missing.sort();
        missing
    }

    /// Keywords present in both sets, sorted
    pub fn shared_with(&self, other: &KeywordSet) -> Vec<String> {
        let mut shared: Vec<String> = self.0.intersection(&other.0).cloned().collect();
        shared.sort();
        shared
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub missing_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub job_keyword_count: usize,
    pub resume_keyword_count: usize,
}

impl GapAnalysis {
    pub fn has_gaps(&self) -> bool {
        !self.missing_skills.is_empty()
    }
}

pub struct GapAnalyzer<'a> {
    stopwords: &'a StopWords,
}

impl<'a> GapAnalyzer<'a> {
    pub fn new(stopwords: &'a StopWords) -> Self {
        Self { stopwords }
    }

    pub fn keywords(&self, normalized: &str) -> KeywordSet {
        KeywordSet::from_normalized(normalized, self.stopwords)
    }

    /// Job keywords the resume does not contain. Argument order matters.
    pub fn analyze(&self, resume: &str, job: &str) -> GapAnalysis {
        let resume_keywords = self.keywords(resume);
        let job_keywords = self.keywords(job);

        log::debug!(
            "Keyword sets: resume {}, job {}",
            resume_keywords.len(),
            job_keywords.len()
        );

        GapAnalysis {
            missing_skills: job_keywords.missing_from(&resume_keywords),
            matched_keywords: job_keywords.shared_with(&resume_keywords),
            job_keyword_count: job_keywords.len(),
            resume_keyword_count: resume_keywords.len(),
        }
    }
}
