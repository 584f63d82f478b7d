use std::{error::Error, fmt};

use nbody_sim::SimError;
use nbody_trace::TraceError;
use nbody_window::WindowError;

#[derive(Debug, Clone)]
pub(crate) enum AppError {
    Trace(TraceError),
    Sim(SimError),
    Window(WindowError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Trace(error) => write!(f, "{}", error),
            AppError::Sim(error) => write!(f, "{}", error),
            AppError::Window(error) => write!(f, "{}", error),
        }
    }
}

impl Error for AppError {}

impl From<TraceError> for AppError {
    fn from(v: TraceError) -> Self {
        Self::Trace(v)
    }
}

impl From<SimError> for AppError {
    fn from(v: SimError) -> Self {
        Self::Sim(v)
    }
}

impl From<WindowError> for AppError {
    fn from(v: WindowError) -> Self {
        Self::Window(v)
    }
}
