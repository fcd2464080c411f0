use std::collections::HashSet;

/// Re-exported key and mouse enums from `winit` for convenience.
// winit 0.30 moved physical key codes under `winit::keyboard`; callers only
// see the alias.
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// State of the keyboard and mouse at a given moment.
///
/// The runner is responsible for driving this structure by feeding it the
/// events coming from `winit`.  Once populated, the rest of the program can
/// query the state using the helpers defined below.  Edge queries
/// (`just_pressed`, `just_released`) are valid until [`end_frame`] is called.
///
/// [`end_frame`]: InputState::end_frame
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    mouse_buttons: HashSet<MouseButton>,
    mouse_pos: (f64, f64),
    /// raw device motion accumulated since the last `consume_mouse_motion`
    mouse_motion: (f32, f32),
}

impl InputState {
    /// Creates a fresh, empty input state.
    pub fn new() -> Self {
        Default::default()
    }

    /// Called by the event loop when a keyboard event arrives.
    ///
    /// OS key repeat sends `pressed = true` again for a held key; that is not
    /// reported as a new press.
    pub fn update_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.keys_down.insert(key) {
                self.keys_pressed.insert(key);
            }
        } else if self.keys_down.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    /// Returns true if the given key is currently held down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// True only on the frame the key went down.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// True only on the frame the key went up.
    pub fn just_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Keys currently held, in no particular order.
    pub fn held_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_down.iter().copied()
    }

    /// Called by the event loop when a mouse button event arrives.
    pub fn update_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.mouse_buttons.insert(button);
        } else {
            self.mouse_buttons.remove(&button);
        }
    }

    /// Returns true if the given mouse button is currently held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Update the current mouse cursor position (window coordinates).
    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        self.mouse_pos = (x, y);
    }

    /// Retrieve the last recorded mouse position.
    pub fn mouse_position(&self) -> (f64, f64) {
        self.mouse_pos
    }

    /// Accumulate raw device motion.  Unlike cursor position this keeps
    /// arriving while the pointer is locked.
    pub fn add_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.mouse_motion.0 += dx as f32;
        self.mouse_motion.1 += dy as f32;
    }

    /// Retrieve and reset the accumulated mouse motion since the last call.
    pub fn consume_mouse_motion(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.mouse_motion)
    }

    /// Drops every held key and button, e.g. when the window loses focus and
    /// the matching release events will never arrive.  Returns the keys that
    /// were held so the caller can emit synthetic releases.
    pub fn release_all(&mut self) -> Vec<KeyCode> {
        let held: Vec<KeyCode> = self.keys_down.drain().collect();
        self.keys_released.extend(held.iter().copied());
        self.mouse_buttons.clear();
        held
    }

    /// Clears per-frame edge state.  Call once at the end of every frame.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
    }
}

// simple unit tests for the input state implementation
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_tracking() {
        let mut state = InputState::new();
        assert!(!state.is_key_pressed(KeyCode::KeyA));
        state.update_key(KeyCode::KeyA, true);
        assert!(state.is_key_pressed(KeyCode::KeyA));
        state.update_key(KeyCode::KeyA, false);
        assert!(!state.is_key_pressed(KeyCode::KeyA));
    }

    #[test]
    fn edges_last_one_frame() {
        let mut state = InputState::new();
        state.update_key(KeyCode::KeyW, true);
        assert!(state.just_pressed(KeyCode::KeyW));
        state.end_frame();
        assert!(!state.just_pressed(KeyCode::KeyW));

        // repeat while held is not a new press
        state.update_key(KeyCode::KeyW, true);
        assert!(!state.just_pressed(KeyCode::KeyW));

        state.update_key(KeyCode::KeyW, false);
        assert!(state.just_released(KeyCode::KeyW));
        state.end_frame();
        assert!(!state.just_released(KeyCode::KeyW));
    }

    #[test]
    fn releasing_unheld_key_is_not_an_edge() {
        let mut state = InputState::new();
        state.update_key(KeyCode::KeyD, false);
        assert!(!state.just_released(KeyCode::KeyD));
        assert_eq!(state.held_keys().count(), 0);
    }

    #[test]
    fn mouse_tracking() {
        let mut state = InputState::new();
        assert!(!state.is_button_down(MouseButton::Left));
        state.update_mouse_button(MouseButton::Left, true);
        assert!(state.is_button_down(MouseButton::Left));
        state.update_mouse_button(MouseButton::Left, false);
        assert!(!state.is_button_down(MouseButton::Left));
        state.set_mouse_position(10.0, 20.0);
        assert_eq!(state.mouse_position(), (10.0, 20.0));
        state.add_mouse_motion(3.0, -1.0);
        state.add_mouse_motion(2.0, 6.0);
        assert_eq!(state.consume_mouse_motion(), (5.0, 5.0));
        // consumption resets
        assert_eq!(state.consume_mouse_motion(), (0.0, 0.0));
    }

    #[test]
    fn release_all_reports_held_keys() {
        let mut state = InputState::new();
        state.update_key(KeyCode::KeyW, true);
        state.update_mouse_button(MouseButton::Left, true);
        let released = state.release_all();
        assert_eq!(released, vec![KeyCode::KeyW]);
        assert!(!state.is_key_pressed(KeyCode::KeyW));
        assert!(!state.is_button_down(MouseButton::Left));
        assert!(state.just_released(KeyCode::KeyW));
    }
}
