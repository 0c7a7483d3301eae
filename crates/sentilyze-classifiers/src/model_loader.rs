//! Loading and caching of the stopword set, vectorizer and classifier

use crate::classifier::{LabelClassifier, Vectorizer};
use crate::config::ResourceConfig;
use crate::linear::LinearClassifier;
use crate::pipeline::predict_sentiment;
use crate::stopwords::StopwordSet;
use crate::tfidf::TfidfVectorizer;
use sentilyze_core::{ArtifactError, Error, Result, Sentiment};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, error, info};

/// Everything the prediction pipeline needs, loaded once and shared read-only
pub struct SentimentResources {
    stopwords: Arc<StopwordSet>,
    vectorizer: Arc<dyn Vectorizer>,
    classifier: Arc<dyn LabelClassifier>,
}

impl SentimentResources {
    /// Bundle already-loaded resources.
    ///
    /// Fails when the classifier declares a feature width different from the
    /// vectorizer's.
    pub fn new(
        stopwords: Arc<StopwordSet>,
        vectorizer: Arc<dyn Vectorizer>,
        classifier: Arc<dyn LabelClassifier>,
    ) -> std::result::Result<Self, ArtifactError> {
        if let Some(expected) = classifier.n_features() {
            if expected != vectorizer.n_features() {
                return Err(ArtifactError::Incompatible {
                    vectorizer_features: vectorizer.n_features(),
                    classifier_features: expected,
                });
            }
        }

        Ok(Self {
            stopwords,
            vectorizer,
            classifier,
        })
    }

    /// Read every resource named by the configuration
    pub fn load(config: &ResourceConfig) -> std::result::Result<Self, ArtifactError> {
        let stopwords = StopwordSet::from_source(&config.stopwords)?;

        let missing: Vec<_> = [&config.model_path, &config.vectorizer_path]
            .into_iter()
            .filter(|path| !path.exists())
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(ArtifactError::Missing { paths: missing });
        }

        let classifier = LinearClassifier::from_file(&config.model_path)
            .map_err(|e| into_artifact_error(&config.model_path, e))?;
        info!(
            "Loaded classifier '{}' from {:?}",
            classifier.name(),
            config.model_path
        );

        let vectorizer = TfidfVectorizer::from_file(&config.vectorizer_path)
            .map_err(|e| into_artifact_error(&config.vectorizer_path, e))?;
        info!(
            "Loaded vectorizer from {:?} ({} features)",
            config.vectorizer_path,
            vectorizer.n_features()
        );

        Self::new(
            Arc::new(stopwords),
            Arc::new(vectorizer),
            Arc::new(classifier),
        )
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn vectorizer(&self) -> &dyn Vectorizer {
        self.vectorizer.as_ref()
    }

    pub fn classifier(&self) -> &dyn LabelClassifier {
        self.classifier.as_ref()
    }

    /// Classify one text with the loaded resources
    pub fn predict(&self, text: &str) -> Result<Sentiment> {
        predict_sentiment(
            text,
            self.classifier.as_ref(),
            self.vectorizer.as_ref(),
            &self.stopwords,
        )
    }

    /// Classify several texts, one result per input in order
    pub fn predict_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Result<Sentiment>> {
        texts.iter().map(|text| self.predict(text.as_ref())).collect()
    }
}

/// Loads [`SentimentResources`] at most once.
///
/// The first call to [`ResourceLoader::load`] reads the artifacts; every later
/// call returns the cached outcome, including a cached failure, without
/// touching the filesystem. Concurrent first callers block on the same
/// initialization instead of loading twice.
pub struct ResourceLoader {
    config: ResourceConfig,
    cached: OnceLock<std::result::Result<Arc<SentimentResources>, ArtifactError>>,
}

impl ResourceLoader {
    /// Create a loader; nothing is read until the first `load`
    pub fn new(config: ResourceConfig) -> Self {
        Self {
            config,
            cached: OnceLock::new(),
        }
    }

    /// Load on first use, then return the cached outcome
    pub fn load(&self) -> Result<Arc<SentimentResources>> {
        let outcome = self.cached.get_or_init(|| {
            info!("Loading sentiment resources");
            match SentimentResources::load(&self.config) {
                Ok(resources) => Ok(Arc::new(resources)),
                Err(e) => {
                    error!("{}", e);
                    Err(e)
                }
            }
        });

        match outcome {
            Ok(resources) => Ok(Arc::clone(resources)),
            Err(e) => {
                debug!("Returning cached load failure");
                Err(Error::Artifact(e.clone()))
            }
        }
    }

    /// Whether a load has been attempted
    pub fn is_initialized(&self) -> bool {
        self.cached.get().is_some()
    }
}

/// Read an artifact file, distinguishing absent files from unreadable ones
pub(crate) fn read_artifact(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ArtifactError::Missing {
            paths: vec![path.to_path_buf()],
        }
        .into());
    }

    std::fs::read_to_string(path).map_err(|e| {
        ArtifactError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Attribute a decode/validation failure to the artifact that caused it
pub(crate) fn malformed(path: &Path, err: Error) -> Error {
    Error::Artifact(into_artifact_error(path, err))
}

fn into_artifact_error(path: &Path, err: Error) -> ArtifactError {
    match err {
        Error::Artifact(inner) => inner,
        other => ArtifactError::Malformed {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}
