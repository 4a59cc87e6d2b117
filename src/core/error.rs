use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading the pre-trained artifacts at startup.
///
/// Every variant is fatal: a pipeline is never built from a partially loaded
/// vectorizer/classifier pair.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file does not exist at the configured location.
    #[error("artifact file not found: {}", path.display())]
    Missing { path: PathBuf },

    /// The file exists but could not be read.
    #[error("failed to read artifact {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a valid artifact document.
    #[error("corrupt artifact {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but its contents are inconsistent.
    #[error("invalid artifact {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },

    /// Vectorizer and classifier were trained against different feature spaces.
    #[error(
        "vectorizer produces {vectorizer} features but classifier expects {classifier}"
    )]
    FeatureMismatch { vectorizer: usize, classifier: usize },
}

/// Problems with a single uploaded table. These never take the application
/// down; they are reported back to whoever triggered the analysis.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The upload has no header row at all.
    #[error("no columns to parse from file")]
    NoColumns,

    /// A header row exists but no data rows follow it.
    #[error("the uploaded table has no rows")]
    NoRows,

    /// The selected text column is not part of the header.
    #[error("column '{column}' not found; available columns: {}", available.join(", "))]
    UnknownColumn {
        column: String,
        available: Vec<String>,
    },

    /// A data row has more fields than the header.
    #[error("malformed CSV: line {line} has {found} fields, expected {expected}")]
    ExtraFields {
        line: u64,
        found: usize,
        expected: usize,
    },

    /// The upload is not valid comma-separated text.
    #[error("malformed CSV")]
    Malformed(#[from] csv::Error),
}
