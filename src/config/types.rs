use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::encoding::{
    ByteOrder,
    TextEncoding,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "encoding")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Order of records in the directory.
///
/// `Insertion` is what existing runtimes expect. `Hash` sorts ascending so a
/// runtime may binary-search the directory instead of loading it into a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryOrder {
    #[default]
    Insertion,
    Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildSettings {
    /// Include fuzzy units that have a non-empty target.
    pub include_fuzzy: bool,

    /// Encoding name for keys and payloads (e.g. "utf-8", "latin-1").
    pub encoding: String,

    pub byte_order: ByteOrder,

    pub directory_order: DirectoryOrder,

    /// Log a warning when two distinct keys hash to the same value.
    pub warn_on_collision: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            include_fuzzy: false,
            encoding: TextEncoding::Utf8.name().to_string(),
            byte_order: ByteOrder::Little,
            directory_order: DirectoryOrder::Insertion,
            warn_on_collision: true,
        }
    }
}

impl BuildSettings {
    /// Resolves the `encoding` name.
    ///
    /// # Errors
    /// Empty or unsupported encoding name
    pub fn text_encoding(&self) -> Result<TextEncoding, ValidationError> {
        if self.encoding.is_empty() {
            return Err(ValidationError::new(
                "encoding",
                "The encoding cannot be empty. Example: \"utf-8\"",
            ));
        }

        self.encoding.parse().map_err(|e| ValidationError::new("encoding", format!("{e}")))
    }

    /// # Errors
    /// - Empty or unsupported encoding
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.text_encoding() {
            errors.push(e);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
