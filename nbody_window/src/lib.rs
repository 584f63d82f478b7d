//! A crate for opening a fixed-size window and drawing into it with egui on
//! top of wgpu.
//!
//! This crate also initializes logging to a file and stderr.
//!
//! # Example
//! ```no_run
//! let config = nbody_window::WindowConfig::new().with_title("Minimal example");
//!
//! nbody_window::run(&config, move |env| {
//!     let ctx = env.egui_ctx();
//!
//!     egui::CentralPanel::default().show(ctx, |ui| {
//!         ui.label(format!("{:#?}", env.config()));
//!         ui.label(format!("{:.3} mspf = {:.1} fps", env.mspf(), env.fps()));
//!     });
//! })
//! .unwrap();
//! ```

#![warn(rust_2018_idioms, missing_debug_implementations, missing_docs)]
#![allow(clippy::too_many_arguments)]

pub use config::*;
pub use error::*;
pub use input::*;
pub use window_env::*;
pub use winit::keyboard::KeyCode;

mod config;
mod container;
mod egui_state;
mod error;
mod fps_counter;
mod input;
mod logging;
mod window;
mod window_env;

/// Initializes logging to stderr and to the configured log file.
///
/// Calling this more than once has no effect after the first successful call.
pub fn init_logging(config: &WindowConfig) -> Result<(), WindowError> {
    let log_file_path = config.log_file_path();
    if !logging::init(&log_file_path)? {
        return Ok(());
    }

    logging::print_to_log_file(&"-".repeat(80));
    if !config.title().is_empty() {
        tracing::info!("{}", config.title());
    }
    tracing::info!(
        "Platform: {} {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    tracing::info!("Logging to {}", log_file_path.display());
    Ok(())
}

/// Initializes logging if needed, opens a window and runs the application
/// until the window is closed.
///
/// `draw` is called once per rendered frame.
pub fn run(
    config: &WindowConfig,
    draw: impl FnMut(&dyn WindowEnv) + 'static,
) -> Result<(), WindowError> {
    init_logging(config)?;
    window::open_window_and_run(config, draw)
}
