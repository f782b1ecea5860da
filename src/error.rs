//! Error types for building and reading YMO blobs.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::encoding::{
    TextEncoding,
    UnencodableChar,
};

/// Fatal errors that abort a build. No partial output is ever produced.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Key or translated text is not representable in the configured encoding
    #[error("Cannot encode {text:?} as {encoding}: {cause}")]
    Encoding { text: String, encoding: TextEncoding, cause: UnencodableChar },

    /// Entry count or a payload offset does not fit in its 16-bit field
    #[error(transparent)]
    Capacity(#[from] CapacityError),

    /// Catalog or override source could not be read
    #[error("Translation source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),

    /// Build settings failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The directory uses `u16` for both the entry count and payload offsets.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    #[error("{count} entries exceed the format limit of {}", u16::MAX)]
    TooManyEntries { count: usize },

    #[error("Payload #{index} starts at byte {offset}, beyond the 16-bit offset limit of {}", u16::MAX)]
    OffsetOverflow { index: usize, offset: usize },
}

/// Failure to obtain units or rows from a collaborator.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse overrides: {0}")]
    Csv(#[from] csv::Error),
}

/// An override row that was skipped. Never aborts a build.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedOverrideRow {
    #[error("Override row {row}: expected 2 fields, found {found}")]
    FieldCount { row: usize, found: usize },

    #[error("Override row {row}: source or target is empty")]
    EmptyField { row: usize },
}

/// A blob that does not follow the YMO layout.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    #[error("Blob truncated: need {needed} bytes, have {len}")]
    Truncated { needed: usize, len: usize },

    #[error("Entry #{index} points at offset {offset}, outside the {len}-byte blob")]
    OffsetOutOfBounds { index: usize, offset: usize, len: usize },

    #[error("Payload at offset {offset} has no terminator")]
    UnterminatedPayload { offset: usize },
}
