use vitrine_core::{Camera, InputState, KeyboardHub, Time};
use winit::window::Window;

/// Per-frame context passed to every [`VitrineApp`](crate::VitrineApp) callback.
///
/// `AppContext` bundles together all the access an app typically needs in
/// one place, so method signatures stay simple:
///
/// ```rust,ignore
/// fn update(&mut self, ctx: &mut AppContext) {
///     self.player.update(ctx.camera, ctx.time.delta);
///     if ctx.input.just_pressed(KeyCode::Escape) {
///         ctx.request_exit();
///     }
/// }
/// ```
pub struct AppContext<'a> {
    // ── Read-only ──────────────────────────────────────────────────────────
    /// Frame timing: delta, elapsed, FPS.
    pub time: Time,

    /// Current window size in physical pixels.
    pub window_size: (u32, u32),

    /// The native window handle.
    pub window: &'a Window,

    /// Key listener registry.  Subscribe in `setup`; the runner dispatches
    /// every physical key press and release through it.
    pub keyboard: &'a KeyboardHub,

    // ── Read-write ─────────────────────────────────────────────────────────
    /// Keyboard and mouse state for this frame.  Mutable so callbacks can
    /// consume accumulated mouse motion.
    pub input: &'a mut InputState,

    /// The walkthrough camera.
    pub camera: &'a mut Camera,

    pub(crate) pointer_locked: bool,
    pub(crate) pointer_lock_request: Option<bool>,
    pub(crate) exit_requested: bool,
}

impl<'a> AppContext<'a> {
    /// Signal the event loop to shut down after the current callback.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Ask the runner to capture (`true`) or release (`false`) the pointer.
    /// Applied right after the current callback; check
    /// [`pointer_locked`](Self::pointer_locked) on the next one.
    pub fn request_pointer_lock(&mut self, lock: bool) {
        self.pointer_lock_request = Some(lock);
    }

    /// Whether the cursor is currently captured by the window.  The runner
    /// releases it on focus loss.
    #[inline]
    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    /// Shortcut: window width in physical pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.window_size.0
    }

    /// Shortcut: window height in physical pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.window_size.1
    }

    /// Aspect ratio (width / height). Returns 1.0 if height is zero.
    #[inline]
    pub fn aspect(&self) -> f32 {
        aspect_of(self.window_size)
    }
}

pub(crate) fn aspect_of((w, h): (u32, u32)) -> f32 {
    if h == 0 {
        1.0
    } else {
        w as f32 / h as f32
    }
}

#[cfg(test)]
mod tests {
    use super::aspect_of;

    #[test]
    fn aspect_handles_zero_height() {
        assert_eq!(aspect_of((1280, 720)), 1280.0 / 720.0);
        assert_eq!(aspect_of((800, 0)), 1.0);
    }
}
