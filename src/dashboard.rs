//! Request/response boundary for the review dashboard.
//!
//! A [`Dashboard`] can only exist once both artifacts have loaded, so a failed
//! startup leaves nothing to analyze with. Each "analyze" action is a single
//! call; any error raised while handling it is caught here and turned into a
//! user-facing message, and the dashboard stays ready for the next upload.

use crate::core::{ArtifactConfig, UploadError};
use crate::models::{Classifier, CountVectorizer, MultinomialNaiveBayes, Vectorizer};
use crate::pipelines::sentiment_analysis_pipeline::{
    AnalysisReport, ReviewTable, SentimentAnalysisPipeline, SentimentAnalysisPipelineBuilder,
};

/// Prefix of the message shown when an analysis action fails.
pub const ERROR_PREFIX: &str = "Error al procesar el archivo";

/// Result of one analysis action.
#[derive(Debug)]
pub enum ActionOutcome {
    Completed(AnalysisReport),
    Failed { message: String },
}

impl ActionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionOutcome::Completed(_))
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            ActionOutcome::Completed(report) => Some(report),
            ActionOutcome::Failed { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<AnalysisReport> {
        match self {
            ActionOutcome::Completed(report) => Some(report),
            ActionOutcome::Failed { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ActionOutcome::Completed(_) => None,
            ActionOutcome::Failed { message } => Some(message),
        }
    }
}

pub struct Dashboard<V = CountVectorizer, C = MultinomialNaiveBayes> {
    pipeline: SentimentAnalysisPipeline<V, C>,
}

impl Dashboard {
    /// Load the artifacts described by `config`. An error here is fatal: the
    /// caller must not serve any analysis.
    pub fn start(config: ArtifactConfig) -> anyhow::Result<Self> {
        let pipeline = SentimentAnalysisPipelineBuilder::new(config).build()?;
        Ok(Self::new(pipeline))
    }
}

impl<V: Vectorizer, C: Classifier> Dashboard<V, C> {
    pub fn new(pipeline: SentimentAnalysisPipeline<V, C>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &SentimentAnalysisPipeline<V, C> {
        &self.pipeline
    }

    /// Columns a user can pick from in `upload`.
    pub fn columns(&self, upload: &[u8]) -> Result<Vec<String>, UploadError> {
        Ok(ReviewTable::from_bytes(upload)?.columns().to_vec())
    }

    /// Analyze `column` of the uploaded CSV, propagating any error.
    pub fn try_analyze(&self, upload: &[u8], column: &str) -> anyhow::Result<AnalysisReport> {
        let table = ReviewTable::from_bytes(upload)?;
        self.pipeline.analyze(table, column)
    }

    /// Analyze `column` of the uploaded CSV. Never fails: errors come back as
    /// [`ActionOutcome::Failed`] carrying the error text.
    pub fn analyze_upload(&self, upload: &[u8], column: &str) -> ActionOutcome {
        match self.try_analyze(upload, column) {
            Ok(report) => ActionOutcome::Completed(report),
            Err(err) => {
                tracing::error!(error = %format!("{err:#}"), column, "analysis failed");
                ActionOutcome::Failed {
                    message: format!("{ERROR_PREFIX}: {err:#}"),
                }
            }
        }
    }
}
