//! Sentilyze Classifiers
//!
//! Inference-only sentiment classification over a bag-of-words TF-IDF
//! representation.
//!
//! - [`stopwords`]: built-in or file-backed stopword sets
//! - [`preprocess`]: ASCII-letter normalization and stopword removal
//! - [`tfidf`]: fitted TF-IDF vectorizer restored from a JSON artifact
//! - [`linear`]: fitted binary linear classifier restored from a JSON artifact
//! - [`model_loader`]: once-only loading of all of the above
//! - [`pipeline`]: `predict_sentiment`, the text-to-label pipeline

pub mod classifier;
pub mod config;
pub mod linear;
pub mod model_loader;
pub mod pipeline;
pub mod preprocess;
pub mod stopwords;
pub mod tfidf;

pub use classifier::{LabelClassifier, SparseVector, Vectorizer};
pub use config::{ResourceConfig, DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH};
pub use linear::{LinearClassifier, LinearKind};
pub use model_loader::{ResourceLoader, SentimentResources};
pub use pipeline::predict_sentiment;
pub use stopwords::{StopwordSet, StopwordSource};
pub use tfidf::{Norm, TfidfVectorizer};
