//! Vectorizer and classifier traits plus the sparse feature vector they share

use sentilyze_core::Result;

/// Sparse feature vector produced by a [`Vectorizer`].
///
/// Entries are kept sorted by column index with no duplicates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Create an all-zero vector of the given width
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Build a vector from (column, value) pairs.
    ///
    /// Pairs are sorted, repeated columns are summed and explicit zeros dropped.
    /// Columns outside `dim` are rejected.
    pub fn from_pairs(dim: usize, pairs: impl IntoIterator<Item = (usize, f64)>) -> Result<Self> {
        let mut entries: Vec<(usize, f64)> = pairs.into_iter().collect();
        if let Some((col, _)) = entries.iter().find(|(col, _)| *col >= dim) {
            return Err(sentilyze_core::Error::vectorizer(format!(
                "column {} out of range for width {}",
                col, dim
            )));
        }
        entries.sort_by_key(|(col, _)| *col);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (col, value) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == col => *acc += value,
                _ => merged.push((col, value)),
            }
        }
        merged.retain(|(_, value)| *value != 0.0);

        Ok(Self {
            dim,
            entries: merged,
        })
    }

    /// Width of the feature space
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at a column (zero when absent)
    pub fn get(&self, col: usize) -> f64 {
        self.entries
            .binary_search_by_key(&col, |(c, _)| *c)
            .map(|idx| self.entries[idx].1)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Dot product with a dense weight vector of the same width
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(col, value)| weights.get(*col).map(|w| w * value))
            .sum()
    }

    /// Scale every entry in place
    pub(crate) fn scale(&mut self, factor: f64) {
        for (_, value) in &mut self.entries {
            *value *= factor;
        }
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.entries.iter_mut().map(|(_, value)| value)
    }
}

/// Pre-fitted transform from a document to a fixed-width feature vector.
///
/// Implementations must only use their fitted vocabulary; inference never
/// re-fits.
pub trait Vectorizer: Send + Sync {
    /// Transform one document
    fn transform(&self, document: &str) -> Result<SparseVector>;

    /// Width of every vector this vectorizer produces
    fn n_features(&self) -> usize;
}

/// Pre-fitted binary decision function over a feature space
pub trait LabelClassifier: Send + Sync {
    /// Predict the integer class label for one feature vector
    fn predict(&self, features: &SparseVector) -> Result<i64>;

    /// Expected input width, when the model knows it
    fn n_features(&self) -> Option<usize>;

    /// Get the classifier name
    fn name(&self) -> &str;
}
