//! Error types for corpus and stopword loading.

use thiserror::Error;

/// Errors raised while reading or writing corpus data.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Malformed corpus or stopword input
    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// Underlying file or stream failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CorpusError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        CorpusError::Format { line, message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, CorpusError>;
