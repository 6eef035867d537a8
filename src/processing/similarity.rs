//! TF-IDF vectorization and cosine similarity scoring

use crate::config::ScoringConfig;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfOptions {
    pub min_token_len: usize,
    pub smooth_idf: bool,
    pub sublinear_tf: bool,
}

impl Default for TfidfOptions {
    fn default() -> Self {
        Self {
            min_token_len: 2,
            smooth_idf: true,
            sublinear_tf: false,
        }
    }
}

impl From<&ScoringConfig> for TfidfOptions {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            min_token_len: config.min_token_len,
            smooth_idf: config.smooth_idf,
            sublinear_tf: config.sublinear_tf,
        }
    }
}

/// Bag-of-words TF-IDF over a small corpus, fitted fresh on every call.
pub struct TfidfVectorizer {
    options: TfidfOptions,
    token_pattern: Regex,
}

/// Row-per-document TF-IDF weights, each row L2-normalized.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: BTreeMap<String, usize>,
    idf: Array1<f64>,
    weights: Array2<f64>,
}

impl TfidfVectorizer {
    pub fn new(options: TfidfOptions) -> Self {
        let min_len = options.min_token_len.max(1);
        let token_pattern =
            Regex::new(&format!(r"\b\w{{{},}}\b", min_len)).expect("Invalid token regex");

        Self {
            options,
            token_pattern,
        }
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.token_pattern.find_iter(text).map(|m| m.as_str()).collect()
    }

    pub fn fit_transform(&self, documents: &[&str]) -> TfidfMatrix {
        let tokenized: Vec<Vec<&str>> = documents.iter().map(|doc| self.tokenize(doc)).collect();

        // Sorted vocabulary keeps column order independent of document order
        let vocabulary: BTreeMap<String, usize> = tokenized
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index))
            .collect();

        let mut counts = Array2::<f64>::zeros((documents.len(), vocabulary.len()));
        for (row, tokens) in tokenized.iter().enumerate() {
            for token in tokens {
                if let Some(&column) = vocabulary.get(*token) {
                    counts[[row, column]] += 1.0;
                }
            }
        }

        let n_docs = documents.len() as f64;
        let smooth = self.options.smooth_idf;
        let idf: Array1<f64> = counts
            .map_axis(Axis(0), |column| column.iter().filter(|&&count| count > 0.0).count() as f64)
            .mapv(|df| {
                if smooth {
                    ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
                } else {
                    (n_docs / df).ln() + 1.0
                }
            });

        let mut weights = if self.options.sublinear_tf {
            counts.mapv(|count| if count > 0.0 { count.ln() + 1.0 } else { 0.0 })
        } else {
            counts
        };
        weights *= &idf;

        for mut row in weights.rows_mut() {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|weight| weight / norm);
            }
        }

        TfidfMatrix {
            vocabulary,
            idf,
            weights,
        }
    }
}

impl TfidfMatrix {
    pub fn row(&self, document: usize) -> ArrayView1<'_, f64> {
        self.weights.row(document)
    }

    pub fn n_documents(&self) -> usize {
        self.weights.nrows()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary.get(term).map(|&column| self.idf[column])
    }

    /// Highest weighted terms of one document, ties broken alphabetically
    pub fn top_terms(&self, document: usize, limit: usize) -> Vec<(String, f64)> {
        let row = self.row(document);
        let mut terms: Vec<(String, f64)> = self
            .vocabulary
            .iter()
            .map(|(term, &column)| (term.clone(), row[column]))
            .filter(|(_, weight)| *weight > 0.0)
            .collect();

        terms.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(limit);
        terms
    }
}

/// Cosine of the angle between two vectors; zero when either has no magnitude.
pub fn cosine_similarity(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = a.dot(&b) / (norm_a * norm_b);
    if similarity.is_finite() {
        similarity.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Match percentage in [0, 100], rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchScore(f64);

impl MatchScore {
    pub fn from_similarity(similarity: f64) -> Self {
        if !similarity.is_finite() {
            return Self(0.0);
        }
        let percentage = (similarity * 100.0).clamp(0.0, 100.0);
        // Round from the exact decimal expansion of the float, not from
        // `percentage * 100.0`, so 2.675 (stored as 2.67499..) gives 2.67
        let rounded = format!("{:.2}", percentage).parse().unwrap_or(percentage);
        Self(rounded)
    }

    pub fn percentage(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub score: MatchScore,
    pub cosine: f64,
    pub vocabulary_size: usize,
    /// Most distinctive job description terms by TF-IDF weight
    pub top_job_terms: Vec<(String, f64)>,
}

/// Scores a resume against a job description as a two-document corpus.
/// Stopwords are deliberately kept in the vocabulary here.
pub struct SimilarityScorer {
    vectorizer: TfidfVectorizer,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(TfidfOptions::default())
    }
}

impl SimilarityScorer {
    const TOP_TERMS: usize = 10;

    pub fn new(options: TfidfOptions) -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(options),
        }
    }

    pub fn score(&self, resume: &str, job: &str) -> MatchScore {
        self.compare(resume, job).score
    }

    pub fn compare(&self, resume: &str, job: &str) -> SimilarityResult {
        let matrix = self.vectorizer.fit_transform(&[resume, job]);
        let cosine = cosine_similarity(matrix.row(0), matrix.row(1));

        log::debug!(
            "TF-IDF vocabulary: {} terms, cosine similarity {:.6}",
            matrix.vocabulary_len(),
            cosine
        );

        SimilarityResult {
            score: MatchScore::from_similarity(cosine),
            cosine,
            vocabulary_size: matrix.vocabulary_len(),
            top_job_terms: matrix.top_terms(1, Self::TOP_TERMS),
        }
    }
}
