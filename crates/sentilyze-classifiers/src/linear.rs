//! Binary linear classifier restored from a fitted artifact

use crate::classifier::{LabelClassifier, SparseVector};
use crate::model_loader::{malformed, read_artifact};
use sentilyze_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Model family, which decides whether a probability is meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinearKind {
    /// Logistic regression; sigmoid of the decision is a probability
    Logistic,
    /// Margin classifier (linear SVM, perceptron, ...)
    #[default]
    Linear,
}

/// Accepts both a bare value and scikit-learn's one-row array layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum OneRow<T> {
    Bare(T),
    Rows(Vec<T>),
}

impl<T> OneRow<T> {
    fn into_single(self, field: &str) -> Result<T> {
        match self {
            Self::Bare(value) => Ok(value),
            Self::Rows(mut rows) if rows.len() == 1 => Ok(rows.remove(0)),
            Self::Rows(rows) => Err(Error::classifier(format!(
                "{} has {} rows; only binary models are supported",
                field,
                rows.len()
            ))),
        }
    }
}

/// Serialized form of a fitted binary linear model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    #[serde(default = "default_name")]
    name: String,

    #[serde(default)]
    kind: LinearKind,

    coef: OneRow<Vec<f64>>,

    #[serde(default = "default_intercept")]
    intercept: OneRow<f64>,

    /// `classes[0]` is predicted for non-positive decisions, `classes[1]` otherwise
    #[serde(default = "default_classes")]
    classes: Vec<i64>,
}

fn default_name() -> String {
    "linear-sentiment".to_string()
}

fn default_intercept() -> OneRow<f64> {
    OneRow::Bare(0.0)
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

/// Fitted binary linear classifier
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    name: String,
    kind: LinearKind,
    coef: Vec<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl LinearClassifier {
    /// Create a classifier directly from weights
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            name: default_name(),
            kind: LinearKind::Linear,
            coef,
            intercept,
            classes: [0, 1],
        }
    }

    /// Set the model family
    pub fn with_kind(mut self, kind: LinearKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the class labels for the negative and positive side of the boundary
    pub fn with_classes(mut self, negative: i64, positive: i64) -> Self {
        self.classes = [negative, positive];
        self
    }

    /// Validate an artifact and build the classifier
    pub fn from_artifact(artifact: LinearArtifact) -> Result<Self> {
        let coef = artifact.coef.into_single("coef")?;
        let intercept = artifact.intercept.into_single("intercept")?;

        if coef.is_empty() {
            return Err(Error::classifier("coef is empty"));
        }
        if coef.iter().any(|w| !w.is_finite()) || !intercept.is_finite() {
            return Err(Error::classifier("weights must be finite"));
        }

        let classes: [i64; 2] = artifact.classes.as_slice().try_into().map_err(|_| {
            Error::classifier(format!(
                "expected exactly 2 classes, found {}",
                artifact.classes.len()
            ))
        })?;

        Ok(Self {
            name: artifact.name,
            kind: artifact.kind,
            coef,
            intercept,
            classes,
        })
    }

    /// Parse a JSON artifact
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: LinearArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    /// Load a JSON artifact from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = read_artifact(path)?;
        Self::from_json(&contents).map_err(|e| malformed(path, e))
    }

    pub fn kind(&self) -> LinearKind {
        self.kind
    }

    pub fn classes(&self) -> [i64; 2] {
        self.classes
    }

    /// Signed distance from the decision boundary
    pub fn decision_function(&self, features: &SparseVector) -> Result<f64> {
        if features.dim() != self.coef.len() {
            return Err(Error::classifier(format!(
                "feature vector has width {} but model expects {}",
                features.dim(),
                self.coef.len()
            )));
        }
        Ok(features.dot(&self.coef) + self.intercept)
    }

    /// Probability of the positive class, for logistic models only
    pub fn probability(&self, features: &SparseVector) -> Result<Option<f64>> {
        match self.kind {
            LinearKind::Logistic => {
                let decision = self.decision_function(features)?;
                Ok(Some(1.0 / (1.0 + (-decision).exp())))
            }
            LinearKind::Linear => Ok(None),
        }
    }
}

impl LabelClassifier for LinearClassifier {
    fn predict(&self, features: &SparseVector) -> Result<i64> {
        let decision = self.decision_function(features)?;
        Ok(if decision > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        })
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coef.len())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
