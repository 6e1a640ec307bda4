use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the segmenter and by document loading.
#[derive(Error, Debug)]
pub enum SegmentError {
    /// The document has no usable titles, so there is nothing to segment.
    #[error("title backlog is empty, nothing to segment")]
    EmptyBacklog,

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SegmentError>;
