//! Stopword sets
//!
//! The built-in list is the NLTK English corpus list, so it is always
//! available without a download. A newline-delimited file can replace it.

use sentilyze_core::ArtifactError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// NLTK English stopwords
pub const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Where the stopword list comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StopwordSource {
    /// Compiled-in list for a language
    Builtin {
        #[serde(default = "default_language")]
        language: String,
    },

    /// One word per line; blank lines and `#` comments are skipped
    File { path: PathBuf },
}

fn default_language() -> String {
    "english".to_string()
}

impl Default for StopwordSource {
    fn default() -> Self {
        Self::Builtin {
            language: default_language(),
        }
    }
}

/// Immutable set of lowercase stopwords
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The NLTK English list
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    /// A set that filters nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from any list of words; entries are lowercased
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load a newline-delimited stopword file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ArtifactError::Missing {
                paths: vec![path.to_path_buf()],
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ArtifactError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let set = Self::from_words(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );
        if set.is_empty() {
            return Err(ArtifactError::Malformed {
                path: path.to_path_buf(),
                reason: "stopword file contains no words".to_string(),
            });
        }

        Ok(set)
    }

    /// Resolve a configured source
    pub fn from_source(source: &StopwordSource) -> Result<Self, ArtifactError> {
        let set = match source {
            StopwordSource::Builtin { language } => match language.to_lowercase().as_str() {
                "english" | "en" => Self::english(),
                other => {
                    return Err(ArtifactError::Malformed {
                        path: PathBuf::from(format!("builtin:{}", other)),
                        reason: format!("no built-in stopword list for language '{}'", other),
                    })
                }
            },
            StopwordSource::File { path } => Self::from_file(path)?,
        };

        info!("Loaded {} stopwords", set.len());
        Ok(set)
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
}
