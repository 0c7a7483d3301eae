//! The two demo modes: free text and user posts

use crate::config::POST_BATCH_SIZE;
use crate::render::Card;
use crate::source::{fetch_recent, PostSource};
use sentilyze_classifiers::preprocess::is_blank;
use sentilyze_classifiers::{ResourceLoader, SentimentResources};
use sentilyze_core::{Result, Sentiment};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{error, info};

/// Shown when the user mode has nothing to classify
pub const NO_POSTS_MESSAGE: &str = "No posts found or an error occurred.";

/// Load resources, or tell the user why prediction is unavailable.
///
/// Returns `None` when loading failed; callers stop there without running
/// the pipeline.
pub fn load_or_report(loader: &ResourceLoader) -> Option<Arc<SentimentResources>> {
    match loader.load() {
        Ok(resources) => Some(resources),
        Err(e) => {
            error!("Cannot classify without model resources: {}", e);
            eprintln!("Error: {}", e);
            eprintln!("Please ensure the model and vectorizer files are in the correct directory.");
            None
        }
    }
}

/// Free-text mode
pub fn analyze_text(resources: &SentimentResources, text: &str) -> Result<Sentiment> {
    resources.predict(text)
}

/// Classify each non-empty line of `input`, writing one verdict per line
pub fn run_interactive<R: BufRead, W: Write>(
    resources: &SentimentResources,
    input: R,
    mut output: W,
) -> anyhow::Result<usize> {
    let mut classified = 0;
    for line in input.lines() {
        let line = line?;
        if is_blank(&line) {
            continue;
        }
        let sentiment = resources.predict(&line)?;
        writeln!(output, "Sentiment: {}", sentiment)?;
        classified += 1;
    }
    Ok(classified)
}

/// Result of the user-posts mode
#[derive(Debug, Clone, Default)]
pub struct UserReport {
    pub cards: Vec<Card>,

    /// Fetch failure message, if any
    pub warning: Option<String>,
}

impl UserReport {
    /// Render all cards, or the empty-result message
    pub fn render(&self, html: bool) -> String {
        if self.cards.is_empty() {
            return format!("{}\n", NO_POSTS_MESSAGE);
        }

        self.cards
            .iter()
            .map(|card| {
                if html {
                    format!("{}\n", card.to_html())
                } else {
                    card.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// User mode: fetch the latest posts and classify each
pub async fn analyze_user(
    resources: &SentimentResources,
    source: &dyn PostSource,
    username: &str,
) -> Result<UserReport> {
    let report = fetch_recent(source, username, POST_BATCH_SIZE).await;

    let texts: Vec<&str> = report.posts.iter().map(|p| p.text.as_str()).collect();
    let sentiments = resources.predict_batch(&texts);

    let mut cards = Vec::with_capacity(report.posts.len());
    for (post, sentiment) in report.posts.iter().zip(sentiments) {
        cards.push(Card::new(post.text.clone(), sentiment?));
    }

    info!("Classified {} posts for {}", cards.len(), username);

    Ok(UserReport {
        cards,
        warning: report.warning,
    })
}
