#![allow(missing_docs)]

use std::{error::Error, fmt, io, num::ParseFloatError, path::PathBuf, sync::Arc};

/// An error while parsing a single trace line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    FieldCount { found: usize },
    InvalidNumber { token: String, error: ParseFloatError },
}

impl fmt::Display for RecordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordParseError::FieldCount { found } => {
                write!(f, "expected 4 fields (iteration mass x y), found {}", found)
            }
            RecordParseError::InvalidNumber { token, error } => {
                write!(f, "invalid number {:?}: {}", token, error)
            }
        }
    }
}

impl Error for RecordParseError {}

/// An error while reading a trace file.
#[derive(Debug, Clone)]
pub enum TraceError {
    OpenFailed {
        path: PathBuf,
        error: Arc<io::Error>,
    },
    ReadFailed {
        line: usize,
        error: Arc<io::Error>,
    },
    Parse {
        line: usize,
        error: RecordParseError,
    },
}

impl TraceError {
    /// The 1-based line number that caused the error, if it came from a line.
    pub fn line(&self) -> Option<usize> {
        match self {
            TraceError::OpenFailed { .. } => None,
            TraceError::ReadFailed { line, .. } | TraceError::Parse { line, .. } => Some(*line),
        }
    }
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::OpenFailed { path, error } => {
                write!(f, "failed to open trace {}: {}", path.display(), error)
            }
            TraceError::ReadFailed { line, error } => {
                write!(f, "failed to read trace line {}: {}", line, error)
            }
            TraceError::Parse { line, error } => write!(f, "trace line {}: {}", line, error),
        }
    }
}

impl Error for TraceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TraceError::OpenFailed { error, .. } | TraceError::ReadFailed { error, .. } => {
                Some(error.as_ref())
            }
            TraceError::Parse { error, .. } => Some(error),
        }
    }
}
