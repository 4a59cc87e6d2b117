use std::sync::Arc;

use super::report::AnalysisReport;
use super::sentiment::Prediction;
use super::table::ReviewTable;
use crate::core::{ArtifactError, UploadError};
use crate::models::{Classifier, CountVectorizer, MultinomialNaiveBayes, Vectorizer};
use crate::text::TextNormalizer;

/// Normalize → vectorize → classify over batches of reviews.
///
/// The vectorizer and classifier are shared read-only; cloning the pipeline
/// is cheap and every clone scores against the same loaded artifacts.
pub struct SentimentAnalysisPipeline<V = CountVectorizer, C = MultinomialNaiveBayes> {
    pub(crate) vectorizer: Arc<V>,
    pub(crate) classifier: Arc<C>,
    pub(crate) normalizer: TextNormalizer,
}

impl<V, C> Clone for SentimentAnalysisPipeline<V, C> {
    fn clone(&self) -> Self {
        Self {
            vectorizer: Arc::clone(&self.vectorizer),
            classifier: Arc::clone(&self.classifier),
            normalizer: self.normalizer,
        }
    }
}

impl<V: Vectorizer, C: Classifier> SentimentAnalysisPipeline<V, C> {
    /// Assemble a pipeline from already constructed capabilities.
    pub fn from_parts(vectorizer: V, classifier: C) -> Result<Self, ArtifactError> {
        Self::from_shared(Arc::new(vectorizer), Arc::new(classifier))
    }

    pub(crate) fn from_shared(vectorizer: Arc<V>, classifier: Arc<C>) -> Result<Self, ArtifactError> {
        if vectorizer.n_features() != classifier.n_features() {
            return Err(ArtifactError::FeatureMismatch {
                vectorizer: vectorizer.n_features(),
                classifier: classifier.n_features(),
            });
        }
        Ok(Self {
            vectorizer,
            classifier,
            normalizer: TextNormalizer::new(),
        })
    }

    pub fn vectorizer(&self) -> &V {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Score a single review.
    pub fn predict(&self, text: &str) -> anyhow::Result<Prediction> {
        let mut out = self.score(&[text])?;
        out.pop()
            .ok_or_else(|| anyhow::anyhow!("classifier returned no prediction"))
    }

    /// Score every review; `result[i]` belongs to `rows[i]`.
    pub fn score<S: AsRef<str>>(&self, rows: &[S]) -> anyhow::Result<Vec<Prediction>> {
        let cleaned = self.normalizer.normalize_batch(rows);
        self.score_cleaned(&cleaned)
    }

    /// Score text that has already been through the normalizer.
    pub fn score_cleaned(&self, cleaned: &[String]) -> anyhow::Result<Vec<Prediction>> {
        let features = self.vectorizer.transform(cleaned)?;
        anyhow::ensure!(
            features.len() == cleaned.len(),
            "vectorizer returned {} vectors for {} documents",
            features.len(),
            cleaned.len()
        );

        let labels = self.classifier.predict(&features)?;
        anyhow::ensure!(
            labels.len() == features.len(),
            "classifier returned {} labels for {} vectors",
            labels.len(),
            features.len()
        );

        let unexpected = labels.iter().filter(|l| !l.is_binary()).count();
        if unexpected > 0 {
            tracing::warn!(
                unexpected,
                total = labels.len(),
                "classifier emitted labels outside {{0, 1}}; treating them as negative"
            );
        }
        tracing::debug!(rows = labels.len(), "scored batch");

        Ok(labels.into_iter().map(Prediction::from_label).collect())
    }

    /// Score the `column` of an uploaded table and build the report.
    pub fn analyze(&self, table: ReviewTable, column: &str) -> anyhow::Result<AnalysisReport> {
        let column_index = table.column_index(column)?;
        if table.is_empty() {
            return Err(UploadError::NoRows.into());
        }

        let cleaned: Vec<String> = table
            .rows()
            .iter()
            .map(|row| self.normalizer.normalize(&row[column_index]))
            .collect();
        let predictions = self.score_cleaned(&cleaned)?;

        let report = AnalysisReport::new(
            table,
            column.to_string(),
            column_index,
            cleaned,
            predictions,
        );
        let summary = report.summary();
        tracing::info!(
            column,
            total = summary.total,
            positives = summary.positives,
            negatives = summary.negatives,
            "analysis completed"
        );
        Ok(report)
    }
}
