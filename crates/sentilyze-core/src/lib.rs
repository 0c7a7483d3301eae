//! Sentilyze Core
//!
//! Types shared across the Sentilyze crates.
//!
//! This crate provides:
//! - The closed `Sentiment` result enumeration and label mapping
//! - Error types and result handling, including artifact load failures

pub mod error;
pub mod types;

pub use error::{ArtifactError, Error, Result};
pub use types::{Sentiment, NEGATIVE_LABEL, POSITIVE_LABEL};
