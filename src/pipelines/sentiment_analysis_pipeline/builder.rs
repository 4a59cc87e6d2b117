use std::path::PathBuf;

use super::pipeline::SentimentAnalysisPipeline;
use crate::core::{global_cache, ArtifactConfig, ModelOptions};
use crate::models::{CountVectorizer, MultinomialNaiveBayes};

pub struct SentimentAnalysisPipelineBuilder {
    config: ArtifactConfig,
}

impl SentimentAnalysisPipelineBuilder {
    pub fn new(config: ArtifactConfig) -> Self {
        Self { config }
    }

    /// Count vectorizer + multinomial Naive Bayes from the default artifact
    /// files in the working directory.
    pub fn naive_bayes() -> Self {
        Self::new(ArtifactConfig::default())
    }

    pub fn vectorizer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.vectorizer_path = path.into();
        self
    }

    pub fn classifier_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.classifier_path = path.into();
        self
    }

    /// Look for both artifacts, under their default names, inside `dir`.
    pub fn artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config = ArtifactConfig::in_dir(dir.into());
        self
    }

    pub fn config(&self) -> &ArtifactConfig {
        &self.config
    }

    /// Load both artifacts and assemble the pipeline.
    ///
    /// Fails if either artifact is missing, corrupt, or the two disagree on
    /// the feature space. Artifacts are loaded once per configuration and
    /// shared by every pipeline built from it.
    pub fn build(self) -> anyhow::Result<SentimentAnalysisPipeline> {
        let key = self.config.cache_key();
        let vectorizer_path = self.config.vectorizer_path;
        let classifier_path = self.config.classifier_path;

        let vectorizer = global_cache()
            .get_or_create(&key, || Ok(CountVectorizer::load(&vectorizer_path)?))?;
        let classifier = global_cache()
            .get_or_create(&key, || Ok(MultinomialNaiveBayes::load(&classifier_path)?))?;

        Ok(SentimentAnalysisPipeline::from_shared(vectorizer, classifier)?)
    }
}
