//! Error types for Sentilyze

use std::path::PathBuf;

/// Result type alias using Sentilyze's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Sentilyze operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Vectorizer or classifier artifacts could not be loaded
    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    /// The classifier produced a label outside {0, 1}
    #[error("classifier produced unexpected label {0}")]
    UnexpectedLabel(i64),

    /// Feature extraction errors
    #[error("vectorizer error: {0}")]
    Vectorizer(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Post fetching errors
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML configuration parse errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new vectorizer error
    pub fn vectorizer(msg: impl Into<String>) -> Self {
        Self::Vectorizer(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error means the model resources are unusable
    pub fn is_artifact(&self) -> bool {
        matches!(self, Self::Artifact(_))
    }
}

/// Failure to load the serialized vectorizer/classifier pair.
///
/// Cloneable so a loader can cache the failed outcome and hand the same
/// error to every later caller without touching the filesystem again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactError {
    /// One or more resource files are absent
    #[error("required file is missing: {}", join_paths(.paths))]
    Missing { paths: Vec<PathBuf> },

    /// An artifact exists but could not be read
    #[error("artifact {} could not be read: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// An artifact exists but could not be decoded
    #[error("artifact {} is malformed: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    /// Vectorizer and classifier disagree on the feature space width
    #[error(
        "vectorizer produces {vectorizer_features} features but classifier expects {classifier_features}"
    )]
    Incompatible {
        vectorizer_features: usize,
        classifier_features: usize,
    },
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
