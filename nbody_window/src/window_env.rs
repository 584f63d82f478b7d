use std::time::Instant;

use crate::{Input, WindowConfig};

/// Trait defining the interaction between a windowed application and the window.
pub trait WindowEnv {
    /// The config that was used when running the application.
    fn config(&self) -> &WindowConfig;

    /// A recent fps measurement.
    fn fps(&self) -> f32;

    /// A recent mspf measurement.
    fn mspf(&self) -> f32;

    /// The keyboard input state.
    fn input(&self) -> &Input;

    /// The egui context.
    fn egui_ctx(&self) -> &egui::Context;

    /// Asks for the draw callback to run again no later than `at`.
    ///
    /// The window otherwise sleeps until the next input event. The earliest
    /// request made during a frame wins. A time in the past means "as soon as
    /// possible".
    fn request_redraw_at(&self, at: Instant);

    /// Closes the window after this frame.
    fn request_close(&self);
}
