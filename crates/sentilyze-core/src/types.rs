//! Core types for Sentilyze

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classifier label for negative sentiment
pub const NEGATIVE_LABEL: i64 = 0;

/// Classifier label for positive sentiment
pub const POSITIVE_LABEL: i64 = 1;

/// Outcome of classifying one piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// The input was empty or whitespace only
    NoTextProvided,
    Negative,
    Positive,
}

impl Sentiment {
    /// Map a binary classifier label to a sentiment.
    ///
    /// Labels outside {0, 1} are rejected rather than folded into `Positive`.
    pub fn from_label(label: i64) -> Result<Self> {
        match label {
            NEGATIVE_LABEL => Ok(Self::Negative),
            POSITIVE_LABEL => Ok(Self::Positive),
            other => Err(Error::UnexpectedLabel(other)),
        }
    }

    /// Display string shown to users
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoTextProvided => "No text provided",
            Self::Negative => "Negative",
            Self::Positive => "Positive",
        }
    }

    /// Whether a prediction was actually made
    pub fn is_prediction(&self) -> bool {
        !matches!(self, Self::NoTextProvided)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
