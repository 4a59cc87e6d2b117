use std::collections::{HashMap, HashSet};
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{FeatureVector, Vectorizer};
use crate::core::ArtifactError;
use crate::loaders::ArtifactLoader;

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Row normalization applied after tf-idf weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized vectorizer state as exported from training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountVectorizerState {
    /// Term to column index. Indices must cover `0..vocabulary.len()` exactly.
    pub vocabulary: HashMap<String, usize>,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,
    /// Inverse document frequencies; present for tf-idf vectorizers only.
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default)]
    pub norm: Option<Norm>,
}

impl CountVectorizerState {
    /// Plain unigram count state over `terms`, indexed in the given order.
    pub fn from_terms<S: AsRef<str>>(terms: &[S]) -> Self {
        Self {
            vocabulary: terms
                .iter()
                .enumerate()
                .map(|(i, t)| (t.as_ref().to_string(), i))
                .collect(),
            token_pattern: default_token_pattern(),
            lowercase: true,
            ngram_range: default_ngram_range(),
            binary: false,
            stop_words: None,
            idf: None,
            norm: None,
        }
    }
}

/// Bag-of-words vectorizer with optional n-grams and tf-idf weighting.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
    token_pattern: Regex,
    lowercase: bool,
    ngram_range: (usize, usize),
    binary: bool,
    stop_words: HashSet<String>,
    idf: Option<Vec<f64>>,
    norm: Option<Norm>,
}

impl CountVectorizer {
    /// Load a vectorizer artifact from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let loader = ArtifactLoader::new(path);
        let state: CountVectorizerState = loader.load()?;
        let vectorizer = Self::from_state(state).map_err(|reason| loader.invalid(reason))?;
        tracing::info!(
            path = %loader.path.display(),
            n_features = vectorizer.n_features(),
            tfidf = vectorizer.idf.is_some(),
            "loaded vectorizer"
        );
        Ok(vectorizer)
    }

    /// Validate exported state and build the vectorizer.
    pub fn from_state(state: CountVectorizerState) -> Result<Self, String> {
        let n = state.vocabulary.len();
        let mut seen = vec![false; n];
        for (term, &idx) in &state.vocabulary {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(format!("duplicate vocabulary index {idx} (term '{term}')")),
                None => {
                    return Err(format!(
                        "vocabulary index {idx} (term '{term}') out of range for {n} terms"
                    ))
                }
            }
        }

        let (min_n, max_n) = state.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({min_n}, {max_n})"));
        }

        if let Some(idf) = &state.idf {
            if idf.len() != n {
                return Err(format!("idf has {} weights for {n} terms", idf.len()));
            }
        }

        let token_pattern = Regex::new(&state.token_pattern)
            .map_err(|e| format!("invalid token_pattern: {e}"))?;
        if token_pattern.captures_len() > 2 {
            return Err("token_pattern may contain at most one capturing group".to_string());
        }

        Ok(Self {
            vocabulary: state.vocabulary,
            token_pattern,
            lowercase: state.lowercase,
            ngram_range: state.ngram_range,
            binary: state.binary,
            stop_words: state.stop_words.unwrap_or_default().into_iter().collect(),
            idf: state.idf,
            norm: state.norm,
        })
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// Split a document into the terms looked up in the vocabulary.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let lowered;
        let text = if self.lowercase {
            lowered = document.to_lowercase();
            lowered.as_str()
        } else {
            document
        };

        let tokens: Vec<&str> = if self.token_pattern.captures_len() == 2 {
            self.token_pattern
                .captures_iter(text)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .collect()
        } else {
            self.token_pattern
                .find_iter(text)
                .map(|m| m.as_str())
                .collect()
        };

        let tokens: Vec<&str> = tokens
            .into_iter()
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        self.ngrams(&tokens)
    }

    fn ngrams(&self, tokens: &[&str]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    fn vectorize(&self, document: &str) -> anyhow::Result<FeatureVector> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        if self.binary {
            counts.values_mut().for_each(|v| *v = 1.0);
        }

        let mut vector = FeatureVector::from_pairs(self.n_features(), counts)?;

        if let Some(idf) = &self.idf {
            let weighted: Vec<(usize, f64)> = vector
                .entries()
                .iter()
                .map(|&(i, v)| (i, v * idf[i]))
                .collect();
            vector = FeatureVector::from_pairs(self.n_features(), weighted)?;
        }

        if let Some(norm) = self.norm {
            let total = match norm {
                Norm::L1 => vector.entries().iter().map(|(_, v)| v.abs()).sum::<f64>(),
                Norm::L2 => vector
                    .entries()
                    .iter()
                    .map(|(_, v)| v * v)
                    .sum::<f64>()
                    .sqrt(),
            };
            if total > 0.0 {
                vector.values_mut().for_each(|v| *v /= total);
            }
        }

        Ok(vector)
    }
}

impl Vectorizer for CountVectorizer {
    fn transform(&self, documents: &[String]) -> anyhow::Result<Vec<FeatureVector>> {
        documents.iter().map(|doc| self.vectorize(doc)).collect()
    }

    fn n_features(&self) -> usize {
        self.vocabulary.len()
    }
}
