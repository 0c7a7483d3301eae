//! Pipeline behavior with stub vectorizers and classifiers
//!
//! The stubs count their calls so tests can assert which stages ran.

use sentilyze_classifiers::{
    predict_sentiment, LabelClassifier, SentimentResources, SparseVector, StopwordSet, Vectorizer,
};
use sentilyze_core::{ArtifactError, Error, Result, Sentiment};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Vectorizer that records every document it is asked to transform
struct RecordingVectorizer {
    width: usize,
    seen: Mutex<Vec<String>>,
}

impl RecordingVectorizer {
    fn new(width: usize) -> Self {
        Self {
            width,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Vectorizer for RecordingVectorizer {
    fn transform(&self, document: &str) -> Result<SparseVector> {
        self.seen.lock().unwrap().push(document.to_string());
        let pairs = document
            .split_whitespace()
            .map(|word| (word.len() % self.width, 1.0));
        SparseVector::from_pairs(self.width, pairs)
    }

    fn n_features(&self) -> usize {
        self.width
    }
}

/// Classifier that always answers with the same label
struct ConstantClassifier {
    label: i64,
    width: Option<usize>,
    call_count: AtomicU32,
}

impl ConstantClassifier {
    fn new(label: i64) -> Self {
        Self {
            label,
            width: None,
            call_count: AtomicU32::new(0),
        }
    }

    fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl LabelClassifier for ConstantClassifier {
    fn predict(&self, _features: &SparseVector) -> Result<i64> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.label)
    }

    fn n_features(&self) -> Option<usize> {
        self.width
    }

    fn name(&self) -> &str {
        "constant"
    }
}

/// Classifier that always fails
struct FailingClassifier;

impl LabelClassifier for FailingClassifier {
    fn predict(&self, _features: &SparseVector) -> Result<i64> {
        Err(Error::classifier("model exploded"))
    }

    fn n_features(&self) -> Option<usize> {
        None
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[test]
fn test_blank_input_skips_vectorizer_and_classifier() {
    let vectorizer = RecordingVectorizer::new(8);
    let classifier = ConstantClassifier::new(1);
    let stopwords = StopwordSet::english();

    for text in ["", " ", "\t\n", "     "] {
        let result = predict_sentiment(text, &classifier, &vectorizer, &stopwords).unwrap();
        assert_eq!(result, Sentiment::NoTextProvided);
    }

    assert!(vectorizer.seen().is_empty());
    assert_eq!(classifier.call_count(), 0);
}

#[test]
fn test_positive_scenario() {
    let vectorizer = RecordingVectorizer::new(8);
    let classifier = ConstantClassifier::new(1);
    let stopwords = StopwordSet::english();

    let result =
        predict_sentiment("I absolutely LOVE this!!!", &classifier, &vectorizer, &stopwords)
            .unwrap();

    assert_eq!(result, Sentiment::Positive);
    assert_eq!(result.to_string(), "Positive");
    assert_eq!(vectorizer.seen(), vec!["absolutely love".to_string()]);
    assert_eq!(classifier.call_count(), 1);
}

#[test]
fn test_negative_scenario() {
    let vectorizer = RecordingVectorizer::new(8);
    let classifier = ConstantClassifier::new(0);
    let stopwords = StopwordSet::english();

    let result =
        predict_sentiment("I hate waiting in long lines", &classifier, &vectorizer, &stopwords)
            .unwrap();

    assert_eq!(result, Sentiment::Negative);
    assert_eq!(vectorizer.seen(), vec!["hate waiting long lines".to_string()]);
}

#[test]
fn test_vectorizer_sees_cleaned_text_only() {
    let vectorizer = RecordingVectorizer::new(8);
    let classifier = ConstantClassifier::new(1);
    let stopwords = StopwordSet::from_words(["the"]);

    predict_sentiment(
        "@friend The 2nd BEST day-ever :) #blessed https://t.co/x",
        &classifier,
        &vectorizer,
        &stopwords,
    )
    .unwrap();

    assert_eq!(
        vectorizer.seen(),
        vec!["friend nd best day ever blessed https t co x".to_string()]
    );
}

#[test]
fn test_deterministic() {
    let vectorizer = RecordingVectorizer::new(8);
    let classifier = ConstantClassifier::new(0);
    let stopwords = StopwordSet::english();

    let text = "Stuck in traffic again, so tired of this";
    let first = predict_sentiment(text, &classifier, &vectorizer, &stopwords).unwrap();
    for _ in 0..10 {
        assert_eq!(
            predict_sentiment(text, &classifier, &vectorizer, &stopwords).unwrap(),
            first
        );
    }

    let seen = vectorizer.seen();
    assert!(seen.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_classifier_error_propagates() {
    let vectorizer = RecordingVectorizer::new(8);
    let stopwords = StopwordSet::english();

    let result = predict_sentiment("fine day", &FailingClassifier, &vectorizer, &stopwords);
    assert!(matches!(result, Err(Error::Classifier(_))));
}

#[test]
fn test_unexpected_label() {
    let vectorizer = RecordingVectorizer::new(8);
    let classifier = ConstantClassifier::new(4);
    let stopwords = StopwordSet::english();

    let result = predict_sentiment("fine day", &classifier, &vectorizer, &stopwords);
    assert!(matches!(result, Err(Error::UnexpectedLabel(4))));
}

#[test]
fn test_resources_bundle() {
    let resources = SentimentResources::new(
        Arc::new(StopwordSet::english()),
        Arc::new(RecordingVectorizer::new(8)),
        Arc::new(ConstantClassifier::new(1).with_width(8)),
    )
    .unwrap();

    let results = resources.predict_batch(&["", "sunny", "   "]);
    let results: Vec<Sentiment> = results.into_iter().map(|r| r.unwrap()).collect();
    assert_eq!(
        results,
        vec![
            Sentiment::NoTextProvided,
            Sentiment::Positive,
            Sentiment::NoTextProvided
        ]
    );
}

#[test]
fn test_resources_reject_width_mismatch() {
    let result = SentimentResources::new(
        Arc::new(StopwordSet::english()),
        Arc::new(RecordingVectorizer::new(8)),
        Arc::new(ConstantClassifier::new(1).with_width(9)),
    );

    assert!(matches!(
        result,
        Err(ArtifactError::Incompatible {
            vectorizer_features: 8,
            classifier_features: 9,
        })
    ));
}
