#![allow(missing_docs)]

use std::{error::Error, fmt, io, path::PathBuf, sync::Arc};

use winit::error::{EventLoopError, OsError};

#[derive(Debug, Clone)]
pub enum WindowError {
    LogFile {
        path: PathBuf,
        error: Arc<io::Error>,
    },
    LoggingAlreadySet,
    EventLoop(Arc<EventLoopError>),
    CreateWindow(Arc<OsError>),
    CreateSurface(Arc<wgpu::CreateSurfaceError>),
    NoCompatibleAdapter,
    RequestDevice(Arc<wgpu::RequestDeviceError>),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::LogFile { path, error } => {
                write!(f, "failed to open log file {}: {}", path.display(), error)
            }
            WindowError::LoggingAlreadySet => {
                write!(f, "a different global logger was already installed")
            }
            WindowError::EventLoop(error) => write!(f, "event loop error: {}", error),
            WindowError::CreateWindow(error) => write!(f, "failed to create window: {}", error),
            WindowError::CreateSurface(error) => {
                write!(f, "failed to create surface: {}", error)
            }
            WindowError::NoCompatibleAdapter => write!(f, "no compatible GPU adapter"),
            WindowError::RequestDevice(error) => {
                write!(f, "failed to request GPU device: {}", error)
            }
        }
    }
}

impl Error for WindowError {}

impl From<EventLoopError> for WindowError {
    fn from(v: EventLoopError) -> Self {
        Self::EventLoop(Arc::new(v))
    }
}

impl From<OsError> for WindowError {
    fn from(v: OsError) -> Self {
        Self::CreateWindow(Arc::new(v))
    }
}

impl From<wgpu::CreateSurfaceError> for WindowError {
    fn from(v: wgpu::CreateSurfaceError) -> Self {
        Self::CreateSurface(Arc::new(v))
    }
}

impl From<wgpu::RequestDeviceError> for WindowError {
    fn from(v: wgpu::RequestDeviceError) -> Self {
        Self::RequestDevice(Arc::new(v))
    }
}
