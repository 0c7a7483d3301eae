//! Text-to-sentiment prediction pipeline

use crate::classifier::{LabelClassifier, Vectorizer};
use crate::preprocess::{is_blank, preprocess};
use crate::stopwords::StopwordSet;
use sentilyze_core::{Result, Sentiment};
use std::time::Instant;
use tracing::debug;

/// Classify a raw text.
///
/// Empty or whitespace-only input (see [`is_blank`]) short-circuits to
/// [`Sentiment::NoTextProvided`] without calling the vectorizer or the
/// classifier. Otherwise the text is normalized to lowercase ASCII letters,
/// stripped of stopwords, vectorized with the fitted vocabulary and
/// classified. Labels other than 0 and 1 are reported as
/// [`sentilyze_core::Error::UnexpectedLabel`].
pub fn predict_sentiment<C, V>(
    text: &str,
    classifier: &C,
    vectorizer: &V,
    stopwords: &StopwordSet,
) -> Result<Sentiment>
where
    C: LabelClassifier + ?Sized,
    V: Vectorizer + ?Sized,
{
    if is_blank(text) {
        return Ok(Sentiment::NoTextProvided);
    }

    let start = Instant::now();

    let cleaned = preprocess(text, stopwords);
    let features = vectorizer.transform(&cleaned)?;
    let label = classifier.predict(&features)?;
    let sentiment = Sentiment::from_label(label)?;

    debug!(
        classifier = classifier.name(),
        nnz = features.nnz(),
        label,
        latency_us = start.elapsed().as_micros() as u64,
        "Predicted {}",
        sentiment
    );

    Ok(sentiment)
}
