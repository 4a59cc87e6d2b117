//! Multinomial Naive Bayes over bag-of-words features.
//!
//! Only the prediction half lives here. The exported state carries the class
//! log priors and per-class feature log probabilities computed at training
//! time; prediction picks the class with the highest joint log likelihood.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Classifier, FeatureVector, Label};
use crate::core::ArtifactError;
use crate::loaders::ArtifactLoader;

/// Serialized classifier state as exported from training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesState {
    pub classes: Vec<Label>,
    pub class_log_prior: Vec<f64>,
    /// One row of `n_features` log probabilities per class.
    pub feature_log_prob: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct MultinomialNaiveBayes {
    classes: Vec<Label>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

impl MultinomialNaiveBayes {
    /// Load a classifier artifact from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let loader = ArtifactLoader::new(path);
        let state: NaiveBayesState = loader.load()?;
        let model = Self::from_state(state).map_err(|reason| loader.invalid(reason))?;

        if let Some(label) = model.classes.iter().find(|l| !l.is_binary()) {
            tracing::warn!(
                path = %loader.path.display(),
                %label,
                "classifier declares a label outside {{0, 1}}; it will be reported as negative"
            );
        }
        tracing::info!(
            path = %loader.path.display(),
            classes = model.classes.len(),
            n_features = model.n_features,
            "loaded naive bayes classifier"
        );
        Ok(model)
    }

    /// Validate exported state and build the classifier.
    pub fn from_state(state: NaiveBayesState) -> Result<Self, String> {
        let n_classes = state.classes.len();
        if n_classes == 0 {
            return Err("classifier has no classes".to_string());
        }
        if state.class_log_prior.len() != n_classes {
            return Err(format!(
                "class_log_prior has {} entries for {n_classes} classes",
                state.class_log_prior.len()
            ));
        }
        if state.feature_log_prob.len() != n_classes {
            return Err(format!(
                "feature_log_prob has {} rows for {n_classes} classes",
                state.feature_log_prob.len()
            ));
        }

        let n_features = state.feature_log_prob[0].len();
        if let Some(row) = state
            .feature_log_prob
            .iter()
            .position(|row| row.len() != n_features)
        {
            return Err(format!(
                "feature_log_prob row {row} has {} weights, expected {n_features}",
                state.feature_log_prob[row].len()
            ));
        }
        if state
            .feature_log_prob
            .iter()
            .flatten()
            .chain(&state.class_log_prior)
            .any(|w| w.is_nan())
        {
            return Err("classifier weights contain NaN".to_string());
        }

        Ok(Self {
            classes: state.classes,
            class_log_prior: state.class_log_prior,
            feature_log_prob: state.feature_log_prob,
            n_features,
        })
    }

    pub fn classes(&self) -> &[Label] {
        &self.classes
    }

    /// Joint log likelihood of `features` under every class.
    pub fn joint_log_likelihood(&self, features: &FeatureVector) -> anyhow::Result<Vec<f64>> {
        anyhow::ensure!(
            features.len() == self.n_features,
            "feature vector has width {}, classifier expects {}",
            features.len(),
            self.n_features
        );
        Ok(self
            .feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(weights, prior)| features.dot(weights) + prior)
            .collect())
    }

    fn predict_one(&self, features: &FeatureVector) -> anyhow::Result<Label> {
        let jll = self.joint_log_likelihood(features)?;
        // First maximum wins on ties.
        let mut best = 0;
        for (i, score) in jll.iter().enumerate().skip(1) {
            if *score > jll[best] {
                best = i;
            }
        }
        Ok(self.classes[best])
    }
}

impl Classifier for MultinomialNaiveBayes {
    fn predict(&self, features: &[FeatureVector]) -> anyhow::Result<Vec<Label>> {
        features.iter().map(|f| self.predict_one(f)).collect()
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Features: ["bad", "good"]
    fn model() -> MultinomialNaiveBayes {
        MultinomialNaiveBayes::from_state(NaiveBayesState {
            classes: vec![Label(0), Label(1)],
            class_log_prior: vec![0.5f64.ln(), 0.5f64.ln()],
            feature_log_prob: vec![
                vec![0.8f64.ln(), 0.2f64.ln()],
                vec![0.2f64.ln(), 0.8f64.ln()],
            ],
        })
        .unwrap()
    }

    #[test]
    fn predicts_class_with_highest_likelihood() {
        let m = model();
        let labels = m
            .predict(&[
                FeatureVector::from_dense(&[0.0, 2.0]),
                FeatureVector::from_dense(&[3.0, 1.0]),
            ])
            .unwrap();
        assert_eq!(labels, vec![Label(1), Label(0)]);
    }

    #[test]
    fn empty_vector_falls_back_to_prior_and_first_class_on_tie() {
        let m = model();
        let labels = m.predict(&[FeatureVector::zeros(2)]).unwrap();
        assert_eq!(labels, vec![Label(0)]);
    }

    #[test]
    fn rejects_wrong_width() {
        let m = model();
        assert!(m.predict(&[FeatureVector::zeros(3)]).is_err());
    }

    #[test]
    fn rejects_ragged_weights() {
        let err = MultinomialNaiveBayes::from_state(NaiveBayesState {
            classes: vec![Label(0), Label(1)],
            class_log_prior: vec![0.0, 0.0],
            feature_log_prob: vec![vec![0.0, 0.0], vec![0.0]],
        })
        .unwrap_err();
        assert!(err.contains("row 1"));
    }

    #[test]
    fn rejects_missing_classes() {
        assert!(MultinomialNaiveBayes::from_state(NaiveBayesState {
            classes: vec![],
            class_log_prior: vec![],
            feature_log_prob: vec![],
        })
        .is_err());
    }
}
