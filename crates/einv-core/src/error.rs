//! Error types for the einv-core library.

use thiserror::Error;

/// Main error type for the einv library.
#[derive(Error, Debug)]
pub enum EinvError {
    /// Business term extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a record or configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of an [`ExtractionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The record carries no encoded invoice.
    MissingPayload,
    /// The payload is not valid base64 or not valid UTF-8.
    DecodeFailure,
    /// The decoded payload is not well-formed XML.
    ParseFailure,
    /// The requested business term id has no matching element.
    ElementNotFound,
}

/// Errors raised while reading a business term out of an encoded invoice.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Encoded invoice is empty or absent.
    #[error("invoice data not available")]
    MissingPayload,

    /// Payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Decoded payload is not UTF-8 text.
    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Decoded payload is not well-formed XML.
    #[error("malformed invoice XML: {0}")]
    Parse(#[from] roxmltree::Error),

    /// No `cbc:ID` element carries the requested text.
    #[error("no cbc:ID element with value '{id}'")]
    IdNotFound { id: String },

    /// The matching `cbc:ID` is the document element and has no parent to walk from.
    #[error("cbc:ID element with value '{id}' has no enclosing element")]
    DetachedId { id: String },
}

impl ExtractionError {
    /// Tag used by callers that branch on the failure instead of its text.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractionError::MissingPayload => ErrorKind::MissingPayload,
            ExtractionError::Decode(_) | ExtractionError::Utf8(_) => ErrorKind::DecodeFailure,
            ExtractionError::Parse(_) => ErrorKind::ParseFailure,
            ExtractionError::IdNotFound { .. } | ExtractionError::DetachedId { .. } => {
                ErrorKind::ElementNotFound
            }
        }
    }
}

/// Result type for the einv library.
pub type Result<T> = std::result::Result<T, EinvError>;
