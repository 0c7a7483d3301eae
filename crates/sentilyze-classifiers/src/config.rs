//! Configuration for resource loading

use crate::stopwords::StopwordSource;
use sentilyze_core::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the vectorizer artifact
pub const DEFAULT_VECTORIZER_PATH: &str = "artifacts/vectorizer.json";

/// Default location of the classifier artifact
pub const DEFAULT_MODEL_PATH: &str = "artifacts/model.json";

/// Where the prediction resources are read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Fitted vectorizer artifact
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,

    /// Fitted classifier artifact
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Stopword list
    #[serde(default)]
    pub stopwords: StopwordSource,
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from(DEFAULT_VECTORIZER_PATH)
}

fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_PATH)
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            vectorizer_path: default_vectorizer_path(),
            model_path: default_model_path(),
            stopwords: StopwordSource::default(),
        }
    }
}

impl ResourceConfig {
    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Both artifacts under one directory with their default file names
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vectorizer_path: dir.join("vectorizer.json"),
            model_path: dir.join("model.json"),
            ..Default::default()
        }
    }

    /// Set vectorizer path
    pub fn with_vectorizer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.vectorizer_path = path.into();
        self
    }

    /// Set classifier path
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    /// Set stopword source
    pub fn with_stopwords(mut self, source: StopwordSource) -> Self {
        self.stopwords = source;
        self
    }
}
