//! Artifact loading from the local filesystem.
//!
//! The vectorizer and classifier are trained elsewhere and exported as JSON
//! documents. [`ArtifactLoader`] reads one such document and maps every failure
//! onto an [`ArtifactError`] that names the offending file.

use crate::core::ArtifactError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    pub path: PathBuf,
}

impl ArtifactLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read and deserialize the artifact document.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, ArtifactError> {
        let bytes = std::fs::read(&self.path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ArtifactError::Missing {
                    path: self.path.clone(),
                }
            } else {
                ArtifactError::Unreadable {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Build an [`ArtifactError::Invalid`] for this file.
    pub fn invalid(&self, reason: impl Into<String>) -> ArtifactError {
        ArtifactError::Invalid {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[derive(Debug, serde::Deserialize)]
    struct Doc {
        value: u32,
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ArtifactLoader::new(dir.path().join("nope.json"));
        let err = loader.load::<Doc>().unwrap_err();
        assert!(matches!(err, ArtifactError::Missing { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn garbage_is_reported_as_corrupt() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x80\x04\x95 not json").unwrap();
        let err = ArtifactLoader::new(file.path()).load::<Doc>().unwrap_err();
        assert!(matches!(err, ArtifactError::Corrupt { .. }));
    }

    #[test]
    fn valid_document_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"value": 3}"#).unwrap();
        let doc: Doc = ArtifactLoader::new(file.path()).load().unwrap();
        assert_eq!(doc.value, 3);
    }
}
