//! Unified error type for deck generation.
//!
//! The OPC and PresentationML layers keep their own error enums; this one
//! covers the domain layer (records, configuration, orchestration) and
//! wraps the lower tiers.
use thiserror::Error;

/// Main error type for deck generation.
#[derive(Error, Debug)]
pub enum Error {
    /// PresentationML layer error
    #[error(transparent)]
    Pptx(#[from] crate::pptx::PptxError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record failed validation before rendering
    #[error("Invalid record: {0}")]
    Validation(String),

    /// A language code other than the two supported ones
    #[error("Unsupported language '{0}' (expected 'fr' or 'en')")]
    UnsupportedLanguage(String),

    /// Batch configuration could not be parsed
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for deck generation.
pub type Result<T> = std::result::Result<T, Error>;
