//! Error types for markdown-to-PowerPoint conversion.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or writing a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The template presentation could not be used.
    #[error("Template error: {0}")]
    TemplateError(String),

    /// ZIP archive error (reading templates or writing the package).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML error (reading templates or generating parts).
    #[error("XML error: {0}")]
    XmlError(String),
}
