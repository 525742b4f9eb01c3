//! Error types for the converter.
//!
//! `ConvertError` covers both the core conditions (structural mismatch,
//! missing keys, unsupported markup) and the failures of the surrounding
//! collaborators (file access, XML and PDF parsing).

use thiserror::Error;

/// Main error type for the converter library.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The document tree has a shape the transformation does not expect.
    #[error("Unexpected document structure: {0}")]
    StructuralMismatch(String),

    /// A field is absent from the generic structure.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A markup tag outside the supported subset (a, ul, li).
    #[error("Unsupported markup tag <{0}>")]
    UnsupportedMarkup(String),

    /// The document root is not the expected element.
    #[error("Unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot { expected: String, found: String },

    /// Input file type is neither XML nor PDF.
    #[error("Unsupported input file '{0}'. Expected a .xml or .pdf file")]
    UnsupportedInput(String),

    /// A PDF container must carry exactly one attachment.
    #[error("Expected exactly one embedded attachment in PDF, found {count}")]
    AttachmentCount { count: usize },

    /// Invalid accent color for the LaTeX preamble.
    #[error("Invalid accent color: '{0}'. Expected 6 hex digits (e.g., 0e4194)")]
    InvalidAccentColor(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// PDF parsing failed.
    #[error("PDF parsing failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Treat a missing key as an absent value.
///
/// Only `KeyNotFound` becomes `Ok(None)`; every other error is passed on.
pub trait OptionalField<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalField<T> for Result<T> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(ConvertError::KeyNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
