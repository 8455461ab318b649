//! Error taxonomy for the configuration store.
//!
//! Every fallible operation in this crate returns [`IniError`].  Parse-time
//! variants carry the 1-based line number of the offending input line so the
//! caller can point the user at the exact spot in the file.
//!
//! # Propagation
//!
//! Nothing in the crate swallows an error or downgrades it to a log record:
//! a failure aborts the single operation that produced it and is handed back
//! to the caller unchanged.  Whether a failure is fatal is the caller's call.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::domain::sniff::DataType;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IniError>;

/// The textual conversion that failed after the type tag already matched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NumberParseError {
    /// Integer conversion failed (overflow, bare sign, ...).
    #[error(transparent)]
    Int(#[from] ParseIntError),

    /// Floating point conversion failed (more than one `.`, bare `.`, ...).
    #[error(transparent)]
    Float(#[from] ParseFloatError),
}

/// Errors produced by the configuration store.
#[derive(Debug, Error)]
pub enum IniError {
    /// A file could not be opened, read, or written.
    #[error("I/O error on {target}: {source}")]
    Io {
        /// Path (or sink description) the operation was working on.
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// A section header has no closing `]` (or no name at all).
    #[error("line {line}: malformed section header: {reason}")]
    MalformedSection { line: usize, reason: String },

    /// A property line appeared before any `[section]` header.
    #[error("line {line}: property must belong to a section")]
    PropertyOutsideSection { line: usize },

    /// The key of a property line contains an embedded space.
    #[error("line {line}: key contains white space: {key:?}")]
    InvalidKey { line: usize, key: String },

    /// The line is neither blank, a comment, a section header nor a property.
    #[error("line {line}: not a valid ini component: {content:?}")]
    MalformedLine { line: usize, content: String },

    /// The requested section does not exist.
    #[error("section not found: {0}")]
    SectionNotFound(String),

    /// The requested key does not exist within its section.
    #[error("key not found: [{section}] {key}")]
    KeyNotFound { section: String, key: String },

    /// The stored value's inferred type differs from the requested type.
    #[error("type mismatch: requested {expected}, stored value is {found}")]
    TypeMismatch { expected: DataType, found: DataType },

    /// The type tag matched but the text could not be converted.
    #[error("cannot convert {text:?}: {source}")]
    ParseFailure {
        text: String,
        #[source]
        source: NumberParseError,
    },

    /// A value could not be given a canonical textual form.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
}

impl IniError {
    /// Returns the 1-based source line for parse-time errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            IniError::MalformedSection { line, .. }
            | IniError::PropertyOutsideSection { line }
            | IniError::InvalidKey { line, .. }
            | IniError::MalformedLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub(crate) fn io(target: impl Into<String>, source: std::io::Error) -> Self {
        IniError::Io {
            target: target.into(),
            source,
        }
    }

    pub(crate) fn parse_failure(text: &str, source: impl Into<NumberParseError>) -> Self {
        IniError::ParseFailure {
            text: text.to_string(),
            source: source.into(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
