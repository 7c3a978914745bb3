//! Error types for voltaic-parser.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A value token could not be converted to a number.
    #[error("invalid value at line {line}: '{content}'")]
    InvalidValue {
        line: usize,
        content: String,
        #[source]
        source: voltaic_core::Error,
    },

    /// A line that is neither a comment nor an element, in strict mode.
    #[error("unrecognized line {line}: '{content}'")]
    UnrecognizedLine { line: usize, content: String },

    #[error("cannot read netlist '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// The 1-based line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::InvalidValue { line, .. } | Error::UnrecognizedLine { line, .. } => Some(*line),
            Error::Io { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
