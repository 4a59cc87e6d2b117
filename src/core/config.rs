use std::path::{Path, PathBuf};

use crate::core::ModelOptions;

/// File name of the serialized vectorizer, relative to the working directory.
pub const DEFAULT_VECTORIZER_FILE: &str = "vectorizador.json";
/// File name of the serialized classifier, relative to the working directory.
pub const DEFAULT_CLASSIFIER_FILE: &str = "modelo_naive_bayes.json";

/// Locations of the two pre-trained artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    pub vectorizer_path: PathBuf,
    pub classifier_path: PathBuf,
}

impl ArtifactConfig {
    pub fn new(vectorizer_path: impl Into<PathBuf>, classifier_path: impl Into<PathBuf>) -> Self {
        Self {
            vectorizer_path: vectorizer_path.into(),
            classifier_path: classifier_path.into(),
        }
    }

    /// Both artifacts under `dir`, using the default file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(DEFAULT_VECTORIZER_FILE),
            dir.join(DEFAULT_CLASSIFIER_FILE),
        )
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self::new(DEFAULT_VECTORIZER_FILE, DEFAULT_CLASSIFIER_FILE)
    }
}

impl ModelOptions for ArtifactConfig {
    fn cache_key(&self) -> String {
        format!(
            "{}|{}",
            self.vectorizer_path.display(),
            self.classifier_path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_working_directory() {
        let config = ArtifactConfig::default();
        assert_eq!(config.vectorizer_path, PathBuf::from("vectorizador.json"));
        assert_eq!(
            config.classifier_path,
            PathBuf::from("modelo_naive_bayes.json")
        );
    }

    #[test]
    fn cache_key_differs_per_location() {
        let a = ArtifactConfig::in_dir("a");
        let b = ArtifactConfig::in_dir("b");
        assert_ne!(a.cache_key(), b.cache_key());
    }
}
