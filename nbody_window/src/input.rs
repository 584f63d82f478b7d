use indexmap::IndexSet;
use winit::{
    event::{ElementState, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Access to keyboard state.
///
/// "Pressed" is relative to the previous call of the draw callback.
#[derive(Debug, Default)]
pub struct Input {
    prev_keys_down: IndexSet<KeyCode>,
    keys_down: IndexSet<KeyCode>,
}

impl Input {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn handle_event(&mut self, event: &WindowEvent, egui_consumed: bool) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    self.set_key(key_code, event.state, egui_consumed);
                }
            }
            WindowEvent::Focused(false) => {
                self.keys_down.clear();
            }
            _ => {}
        }
    }

    fn set_key(&mut self, key_code: KeyCode, state: ElementState, egui_consumed: bool) {
        match state {
            ElementState::Pressed => {
                if !egui_consumed {
                    self.keys_down.insert(key_code);
                }
            }
            ElementState::Released => {
                self.keys_down.swap_remove(&key_code);
            }
        }
    }

    pub(crate) fn end_frame(&mut self) {
        self.prev_keys_down = self.keys_down.clone();
    }

    /// Returns true if the physical key was pressed this frame.
    pub fn key_pressed(&self, key_code: KeyCode) -> bool {
        !self.prev_keys_down.contains(&key_code) && self.keys_down.contains(&key_code)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_key_press_lasts_one_frame() {
        let mut input = Input::new();
        input.set_key(KeyCode::Space, ElementState::Pressed, false);
        assert!(input.key_pressed(KeyCode::Space));

        // Held across frames, the key counts as pressed only once.
        input.end_frame();
        assert!(!input.key_pressed(KeyCode::Space));

        input.set_key(KeyCode::Space, ElementState::Released, false);
        input.end_frame();
        input.set_key(KeyCode::Space, ElementState::Pressed, false);
        assert!(input.key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut input = Input::new();
        input.set_key(KeyCode::Space, ElementState::Pressed, false);
        input.end_frame();
        input.handle_event(&WindowEvent::Focused(false), false);
        input.end_frame();
        input.set_key(KeyCode::Space, ElementState::Pressed, false);
        assert!(input.key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_consumed_press_is_ignored() {
        let mut input = Input::new();
        input.set_key(KeyCode::ArrowRight, ElementState::Pressed, true);
        assert!(!input.key_pressed(KeyCode::ArrowRight));
    }
}
