//! Error types for conversion operations

use std::fmt;

/// Errors that abort a whole conversion.
///
/// Recoverable omissions (unknown node kinds, unresolved images, malformed inline
/// styles) are never reported through this type; they are logged and the affected
/// unit simply produces no output.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The BoxNote input is structurally invalid (missing `doc`, `content`, a node
    /// `type`, or a required attribute)
    MalformedDocument(String),
    /// The BoxNote input is not valid JSON
    InvalidJson(String),
    /// Markup could not be re-serialized for a table cell
    Markup(String),
    /// Writer not found in registry
    WriterNotFound(String),
    /// A document writer reported a failure
    Writer(String),
}

impl ConvertError {
    pub(crate) fn malformed(path: &str, reason: &str) -> Self {
        ConvertError::MalformedDocument(format!("{path}: {reason}"))
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::MalformedDocument(msg) => write!(f, "Invalid BoxNote content: {msg}"),
            ConvertError::InvalidJson(msg) => {
                write!(f, "Invalid BoxNote content: JSON parse failed: {msg}")
            }
            ConvertError::Markup(msg) => write!(f, "Markup error: {msg}"),
            ConvertError::WriterNotFound(name) => write!(f, "Writer '{name}' not found"),
            ConvertError::Writer(msg) => write!(f, "Writer error: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<serde_json::Error> for ConvertError {
    fn from(e: serde_json::Error) -> Self {
        ConvertError::InvalidJson(e.to_string())
    }
}
