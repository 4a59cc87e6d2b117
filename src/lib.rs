pub mod core;
pub mod dashboard;
mod loaders;
pub mod models;
pub mod pipelines;
pub mod text;

// Re-export core types
pub use crate::core::{ArtifactConfig, ArtifactError, UploadError};

pub use crate::dashboard::{ActionOutcome, Dashboard};

// Re-export model types for easier access
pub use crate::models::{Classifier, CountVectorizer, FeatureVector, Label, MultinomialNaiveBayes, Vectorizer};

pub use crate::pipelines::sentiment_analysis_pipeline::{
    AnalysisReport, Prediction, ReviewTable, Sentiment, SentimentAnalysisPipeline,
    SentimentAnalysisPipelineBuilder,
};

pub use crate::text::normalize;
