//! TF-IDF vectorizer restored from a fitted artifact
//!
//! Mirrors the inference half of scikit-learn's `TfidfVectorizer`: the
//! analyzer (lowercase, regex token pattern, word n-grams), raw or sublinear
//! term frequency, idf weighting and row normalization. Fitting happens
//! elsewhere; this type only ever reads the stored vocabulary and idf.

use crate::classifier::{SparseVector, Vectorizer};
use crate::model_loader::{malformed, read_artifact};
use regex::Regex;
use sentilyze_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Default scikit-learn token pattern
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Row normalization applied after weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized form of a fitted vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfArtifact {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column
    #[serde(default)]
    pub idf: Vec<f64>,

    #[serde(default = "default_true")]
    pub lowercase: bool,

    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// `null` disables normalization
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,

    #[serde(default = "default_true")]
    pub use_idf: bool,

    #[serde(default)]
    pub sublinear_tf: bool,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    token_regex: Regex,
    ngram_range: (usize, usize),
    norm: Option<Norm>,
    use_idf: bool,
    sublinear_tf: bool,
    n_features: usize,
}

impl TfidfVectorizer {
    /// Validate an artifact and build the vectorizer
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self> {
        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::vectorizer(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        if artifact.vocabulary.is_empty() {
            return Err(Error::vectorizer("vocabulary is empty"));
        }

        let n_features = if artifact.use_idf {
            artifact.idf.len()
        } else {
            artifact
                .vocabulary
                .values()
                .max()
                .map(|max| max + 1)
                .unwrap_or(0)
        };

        let mut seen = vec![false; n_features];
        for (term, &col) in &artifact.vocabulary {
            if col >= n_features {
                return Err(Error::vectorizer(format!(
                    "term '{}' maps to column {} but only {} features exist",
                    term, col, n_features
                )));
            }
            if std::mem::replace(&mut seen[col], true) {
                return Err(Error::vectorizer(format!(
                    "column {} is assigned to more than one term",
                    col
                )));
            }
        }

        if artifact.use_idf && artifact.idf.len() != artifact.vocabulary.len() {
            return Err(Error::vectorizer(format!(
                "idf has {} entries for a vocabulary of {}",
                artifact.idf.len(),
                artifact.vocabulary.len()
            )));
        }

        let token_regex = Regex::new(&artifact.token_pattern).map_err(|e| {
            Error::vectorizer(format!(
                "invalid token pattern '{}': {}",
                artifact.token_pattern, e
            ))
        })?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            token_regex,
            ngram_range: artifact.ngram_range,
            norm: artifact.norm,
            use_idf: artifact.use_idf,
            sublinear_tf: artifact.sublinear_tf,
            n_features,
        })
    }

    /// Parse a JSON artifact
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: TfidfArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    /// Load a JSON artifact from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = read_artifact(path)?;
        Self::from_json(&contents).map_err(|e| malformed(path, e))
    }

    /// Column index of a term, if it is in the fitted vocabulary
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Analyzer output: the terms (n-grams) extracted from a document
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let lowered;
        let text = if self.lowercase {
            lowered = document.to_lowercase();
            lowered.as_str()
        } else {
            document
        };

        let tokens: Vec<&str> = self.token_regex.find_iter(text).map(|m| m.as_str()).collect();
        let (min_n, max_n) = self.ngram_range;

        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, document: &str) -> Result<SparseVector> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(document) {
            if let Some(col) = self.column(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector::from_pairs(self.n_features, counts)?;

        for value in vector.values_mut() {
            if self.sublinear_tf {
                *value = value.ln() + 1.0;
            }
        }

        if self.use_idf {
            let weighted = vector
                .iter()
                .map(|(col, tf)| (col, tf * self.idf[col]))
                .collect::<Vec<_>>();
            vector = SparseVector::from_pairs(self.n_features, weighted)?;
        }

        let length = match self.norm {
            Some(Norm::L2) => vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => vector.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 0.0,
        };
        if length > 0.0 {
            vector.scale(1.0 / length);
        }

        Ok(vector)
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}
