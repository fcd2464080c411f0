use crate::context::AppContext;

/// The trait every Vitrine application implements.
///
/// All methods have empty default implementations so you only override what
/// you need.  A walkthrough usually overrides `setup` (to subscribe its
/// controllers to `ctx.keyboard`) and `update` (to step them).
///
/// ```rust,ignore
/// struct Walk { player: Player }
///
/// impl VitrineApp for Walk {
///     fn setup(&mut self, ctx: &mut AppContext) {
///         self.player.activate(ctx.keyboard);
///     }
///
///     fn update(&mut self, ctx: &mut AppContext) {
///         self.player.update(ctx.camera, ctx.time.delta);
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait VitrineApp {
    /// Called once after the window is ready.
    fn setup(&mut self, ctx: &mut AppContext) {}

    /// Called once per frame.  Input events received since the previous frame
    /// have already been applied.
    fn update(&mut self, ctx: &mut AppContext) {}

    /// Called whenever the window is resized.  The runner already updated
    /// the camera aspect before calling this.
    fn on_resize(&mut self, new_size: (u32, u32), ctx: &mut AppContext) {}

    /// Called for every raw winit `WindowEvent`, before the runner's own
    /// handling.
    fn on_window_event(&mut self, event: &winit::event::WindowEvent, ctx: &mut AppContext) {}

    /// Called once when the event loop is shutting down.
    fn on_exit(&mut self) {}
}
