//! Stopword corpus used by keyword extraction

use crate::config::StopwordConfig;
use crate::error::{GapAnalyzerError, Result};
use log::info;
use std::collections::HashSet;
use std::path::Path;

const ENGLISH: &str = include_str!("../../resources/stopwords/english.txt");

/// Immutable set of lowercase stopwords. Built once at startup and shared.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
    source: String,
}

impl StopWords {
    /// The built-in English list
    pub fn english() -> Self {
        Self {
            words: parse_word_list(ENGLISH),
            source: "builtin:english".to_string(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GapAnalyzerError::StopwordCorpus(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let words = parse_word_list(&content);
        if words.is_empty() {
            return Err(GapAnalyzerError::StopwordCorpus(format!(
                "No stopwords found in {}",
                path.display()
            )));
        }

        Ok(Self {
            words,
            source: path.display().to_string(),
        })
    }

    /// Resolve the corpus named by the configuration.
    pub fn load(config: &StopwordConfig) -> Result<Self> {
        let stopwords = match &config.path {
            Some(path) => Self::from_file(path)?,
            None => Self::english(),
        };

        info!("Loaded {} stopwords from {}", stopwords.len(), stopwords.source());
        Ok(stopwords)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Alphabetical listing
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

fn parse_word_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}
