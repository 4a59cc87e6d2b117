//! Pre-trained model capabilities consumed by the sentiment pipeline.
//!
//! The pipeline only sees two narrow traits: a [`Vectorizer`] turning cleaned
//! text into feature vectors and a [`Classifier`] turning those vectors into
//! labels. The concrete implementations here load exported scikit-learn style
//! state (a count/tf-idf vocabulary and a multinomial Naive Bayes model).

pub mod count_vectorizer;
pub mod naive_bayes;

pub use count_vectorizer::CountVectorizer;
pub use naive_bayes::MultinomialNaiveBayes;

use serde::{Deserialize, Serialize};

/// A fixed-width feature vector stored sparsely.
///
/// `entries` holds `(index, value)` pairs sorted by index with no duplicates;
/// every index is below `dim`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// An all-zero vector of width `dim`.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Build from unordered pairs; values for repeated indices are summed and
    /// out-of-range indices are rejected.
    pub fn from_pairs(dim: usize, pairs: impl IntoIterator<Item = (usize, f64)>) -> anyhow::Result<Self> {
        let mut entries: Vec<(usize, f64)> = pairs.into_iter().collect();
        if let Some((idx, _)) = entries.iter().find(|(idx, _)| *idx >= dim) {
            anyhow::bail!("feature index {idx} out of range for dimension {dim}");
        }
        entries.sort_by_key(|(idx, _)| *idx);
        entries.dedup_by(|next, kept| {
            if next.0 == kept.0 {
                kept.1 += next.1;
                true
            } else {
                false
            }
        });
        Ok(Self { dim, entries })
    }

    pub fn from_dense(values: &[f64]) -> Self {
        Self {
            dim: values.len(),
            entries: values
                .iter()
                .enumerate()
                .filter(|(_, v)| **v != 0.0)
                .map(|(i, v)| (i, *v))
                .collect(),
        }
    }

    /// Declared width of the vector.
    pub fn len(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Non-zero entries in index order.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dim];
        for &(i, v) in &self.entries {
            dense[i] = v;
        }
        dense
    }

    /// Dot product against a dense weight row of the same width.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries.iter().map(|&(i, v)| v * weights[i]).sum()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.entries.iter_mut().map(|(_, v)| v)
    }
}

/// Class label emitted by a classifier. `1` is positive, `0` is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub i64);

impl Label {
    pub const NEGATIVE: Label = Label(0);
    pub const POSITIVE: Label = Label(1);

    pub fn is_positive(self) -> bool {
        self == Self::POSITIVE
    }

    pub fn is_negative(self) -> bool {
        self == Self::NEGATIVE
    }

    /// Whether the label is part of the binary {0, 1} convention.
    pub fn is_binary(self) -> bool {
        self.is_positive() || self.is_negative()
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label(value)
    }
}

/// Maps cleaned text onto fixed-width feature vectors.
pub trait Vectorizer {
    /// One vector per input, in input order.
    fn transform(&self, documents: &[String]) -> anyhow::Result<Vec<FeatureVector>>;

    /// Width of every vector this vectorizer produces.
    fn n_features(&self) -> usize;
}

/// Maps feature vectors onto class labels.
pub trait Classifier {
    /// One label per input, in input order.
    fn predict(&self, features: &[FeatureVector]) -> anyhow::Result<Vec<Label>>;

    /// Width of the vectors this classifier accepts.
    fn n_features(&self) -> usize;
}
