#![allow(missing_docs)]

use std::{error::Error, fmt, io, path::Path, sync::Arc};

#[derive(Debug, Clone)]
pub enum SimError {
    Context {
        context: String,
        error: Box<SimError>,
    },
    Io(Arc<io::Error>),
    FieldCount {
        line: usize,
        found: usize,
    },
    InvalidNumber {
        line: usize,
        token: String,
    },
    NotEnoughBodies {
        requested: usize,
        found: usize,
    },
    NoBodies,
}

impl SimError {
    /// Wraps the error with a description of what was being done.
    pub fn context(self, context: impl Into<String>) -> Self {
        SimError::Context {
            context: context.into(),
            error: Box::new(self),
        }
    }

    pub(crate) fn file(self, action: &str, path: &Path) -> Self {
        self.context(format!("failed to {} {}", action, path.display()))
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Context { context, error } => write!(f, "{}:\n  {}", context, error),
            SimError::Io(error) => write!(f, "{}", error),
            SimError::FieldCount { line, found } => write!(
                f,
                "line {}: expected 5 fields (mass x y vx vy), found {}",
                line, found
            ),
            SimError::InvalidNumber { line, token } => {
                write!(f, "line {}: invalid number {:?}", line, token)
            }
            SimError::NotEnoughBodies { requested, found } => write!(
                f,
                "requested {} bodies but the input only has {}",
                requested, found
            ),
            SimError::NoBodies => write!(f, "the input has no bodies"),
        }
    }
}

impl Error for SimError {}

impl From<io::Error> for SimError {
    fn from(v: io::Error) -> Self {
        Self::Io(Arc::new(v))
    }
}
