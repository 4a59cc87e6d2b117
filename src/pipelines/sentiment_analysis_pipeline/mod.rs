//! Sentiment analysis pipeline for classifying reviews as positive or negative.
//!
//! Reviews are cleaned with [`crate::text::normalize`], turned into
//! bag-of-words vectors by a pre-fitted vectorizer and labelled by a
//! pre-trained Naive Bayes classifier. Label `1` is positive, everything else
//! is negative.
//!
//! ## Main Types
//!
//! - [`SentimentAnalysisPipeline`] - Batch scorer over loaded artifacts
//! - [`SentimentAnalysisPipelineBuilder`] - Loads the artifacts and builds the pipeline
//! - [`ReviewTable`] - An uploaded CSV table
//! - [`AnalysisReport`] - Per-row predictions, counts and CSV export
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use review_sentiment::pipelines::sentiment_analysis_pipeline::*;
//!
//! let pipeline = SentimentAnalysisPipelineBuilder::naive_bayes().build()?;
//!
//! let result = pipeline.predict("I love this product!")?;
//! println!("Sentiment: {} (label {})", result.sentiment, result.label);
//!
//! let table = ReviewTable::from_path("reviews.csv")?;
//! let report = pipeline.analyze(table, "review")?;
//! println!("{} positive of {}", report.positives(), report.total());
//! # anyhow::Ok(())
//! ```

pub mod builder;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod table;

pub use builder::SentimentAnalysisPipelineBuilder;
pub use pipeline::SentimentAnalysisPipeline;
pub use report::{
    AnalysisReport, ReportSummary, ReviewRow, DEFAULT_EXPORT_FILE_NAME, SENTIMENT_COLUMN,
};
pub use sentiment::{Prediction, Sentiment};
pub use table::ReviewTable;

pub use crate::models::Label;

pub use anyhow::Result;
