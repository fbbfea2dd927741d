use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlfigError {
    #[error("Failed to read {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot load {path}: file must have .yaml/.yml extension")]
    UnsupportedExtension { path: PathBuf },

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Ambiguous key '{key}' in {path}: several keys fold to the same lowercase name")]
    AmbiguousKey { path: PathBuf, key: String },

    #[error("{provider}: field has no '{tag}' tag")]
    MissingTag { provider: String, tag: String },

    #[error("{provider}: no value found at '{path}'")]
    ValueNotFound { provider: String, path: String },

    #[error("{provider}: provider used before init()")]
    NotInitialized { provider: String },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

impl YamlfigError {
    /// Whether a host engine should move on to the next provider instead of
    /// aborting the whole configuration load.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            YamlfigError::MissingTag { .. } | YamlfigError::ValueNotFound { .. }
        )
    }
}
