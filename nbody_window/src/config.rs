use std::{
    env,
    path::{Path, PathBuf},
};

/// Configuration for the window and application environment.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct WindowConfig {
    root_dir: PathBuf,
    relative_log_file_path: PathBuf,

    title: String,
    inner_size: [f32; 2],
    resizable: bool,
    always_on_top: bool,
}

static_assertions::assert_impl_all!(WindowConfig: Send, Sync);

impl Default for WindowConfig {
    fn default() -> Self {
        let root_dir = if cfg!(debug_assertions) {
            env::current_dir().ok()
        } else {
            env::current_exe()
                .ok()
                .and_then(|path| path.parent().map(Path::to_path_buf))
        };

        Self {
            root_dir: root_dir.unwrap_or_else(|| PathBuf::from(".")),
            relative_log_file_path: "log.txt".into(),

            title: String::new(),
            inner_size: [800.0, 600.0],
            resizable: true,
            always_on_top: false,
        }
    }
}

impl WindowConfig {
    /// Returns the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the directory that log files should be saved in.
    ///
    /// By default:
    /// - In debug mode, this is the current working directory.
    /// - In release mode, this is the directory containing the executable.
    pub fn root_dir(&self) -> &Path {
        self.root_dir.as_path()
    }

    /// Sets the directory that log files should be saved in.
    pub fn with_root_dir(mut self, root_dir: impl AsRef<Path>) -> Self {
        self.root_dir = root_dir.as_ref().to_path_buf();
        self
    }

    /// Gets the log file path relative to the root directory.
    pub fn relative_log_file_path(&self) -> &Path {
        self.relative_log_file_path.as_path()
    }

    /// Sets the log file path relative to the root directory.
    pub fn with_relative_log_file_path(mut self, path: impl AsRef<Path>) -> Self {
        self.relative_log_file_path = path.as_ref().to_path_buf();
        self
    }

    /// Returns the absolute log file path.
    pub fn log_file_path(&self) -> PathBuf {
        self.root_dir.join(&self.relative_log_file_path)
    }

    /// Returns the window title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Returns the initial size of the drawable area, in logical pixels.
    pub fn inner_size(&self) -> [f32; 2] {
        self.inner_size
    }

    /// Sets the initial size of the drawable area, in logical pixels.
    pub fn with_inner_size(mut self, inner_size: [f32; 2]) -> Self {
        self.inner_size = inner_size;
        self
    }

    /// Returns whether the user can resize the window.
    pub fn resizable(&self) -> bool {
        self.resizable
    }

    /// Sets whether the user can resize the window.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Returns whether the window should stay on top of other windows.
    pub fn always_on_top(&self) -> bool {
        self.always_on_top
    }

    /// Sets whether the window should stay on top of other windows.
    pub fn with_always_on_top(mut self, always_on_top: bool) -> Self {
        self.always_on_top = always_on_top;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_log_file_path() {
        let config = WindowConfig::new()
            .with_root_dir("some/dir")
            .with_relative_log_file_path("logs/viz.txt");
        assert_eq!(
            config.log_file_path(),
            Path::new("some/dir").join("logs/viz.txt")
        );
    }

    #[test]
    fn test_builder() {
        let config = WindowConfig::new()
            .with_title("N-body Visualization")
            .with_inner_size([1900.0, 1000.0])
            .with_resizable(false);
        assert_eq!(config.title(), "N-body Visualization");
        assert_eq!(config.inner_size(), [1900.0, 1000.0]);
        assert!(!config.resizable());
        assert!(!config.always_on_top());
    }
}
