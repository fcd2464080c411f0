use std::sync::Arc;
use std::time::{Duration, Instant};

use vitrine_core::{Camera, InputState, KeyCode, KeyEvent, KeyPhase, KeyboardHub, Time, TimeClock};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window, WindowId},
};

use crate::config::AppConfig;
use crate::context::{aspect_of, AppContext};
use crate::traits::VitrineApp;

/// What a callback asked the runner to do once it returned.
#[derive(Debug, Default)]
struct Requests {
    exit: bool,
    pointer_lock: Option<bool>,
}

struct Runner<A: VitrineApp> {
    app: A,
    config: AppConfig,
    window: Option<Arc<Window>>,
    input: InputState,
    keyboard: KeyboardHub,
    camera: Camera,
    clock: TimeClock,
    window_size: (u32, u32),
    pointer_locked: bool,
    frame_interval: Option<Duration>,
    next_frame: Instant,
    error: Option<anyhow::Error>,
}

impl<A: VitrineApp> Runner<A> {
    fn new(app: A, config: AppConfig) -> Self {
        let window_size = (config.window.width, config.window.height);
        Self {
            app,
            window: None,
            input: InputState::new(),
            keyboard: KeyboardHub::new(),
            camera: config.camera.build(aspect_of(window_size)),
            clock: TimeClock::with_max_delta(config.clock.max_delta),
            window_size,
            pointer_locked: false,
            frame_interval: frame_interval(config.clock.target_fps),
            next_frame: Instant::now(),
            error: None,
            config,
        }
    }

    /// Hands `f` a fresh context and collects its requests.
    fn with_context(
        &mut self,
        window: &Window,
        time: Time,
        f: impl FnOnce(&mut A, &mut AppContext),
    ) -> Requests {
        let mut ctx = AppContext {
            time,
            window_size: self.window_size,
            window,
            keyboard: &self.keyboard,
            input: &mut self.input,
            camera: &mut self.camera,
            pointer_locked: self.pointer_locked,
            pointer_lock_request: None,
            exit_requested: false,
        };
        f(&mut self.app, &mut ctx);
        Requests {
            exit: ctx.exit_requested,
            pointer_lock: ctx.pointer_lock_request,
        }
    }

    /// Applies `req`; returns `true` when the loop is shutting down.
    fn apply(&mut self, event_loop: &ActiveEventLoop, window: &Window, req: Requests) -> bool {
        if let Some(lock) = req.pointer_lock {
            self.set_pointer_lock(window, lock);
        }
        if req.exit {
            log::info!("exit requested by app");
            event_loop.exit();
        }
        req.exit
    }

    fn set_pointer_lock(&mut self, window: &Window, lock: bool) {
        if lock == self.pointer_locked {
            return;
        }

        if lock {
            // not every platform can lock; confining still gives usable raw motion
            let grabbed = window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
            match grabbed {
                Ok(()) => {
                    window.set_cursor_visible(false);
                    self.pointer_locked = true;
                    log::debug!("pointer captured");
                }
                Err(e) => log::warn!("pointer lock refused: {e}"),
            }
        } else {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                log::debug!("releasing cursor grab failed: {e}");
            }
            window.set_cursor_visible(true);
            self.pointer_locked = false;
            log::debug!("pointer released");
        }
    }

    fn dispatch_key(&mut self, code: KeyCode, pressed: bool, repeat: bool) {
        self.input.update_key(code, pressed);
        let phase = if pressed { KeyPhase::Down } else { KeyPhase::Up };
        self.keyboard.dispatch(KeyEvent { code, phase, repeat });
    }

    /// Focus loss: the matching key-up events will never arrive, so emit
    /// them ourselves.
    fn release_keys(&mut self) {
        for code in self.input.release_all() {
            self.keyboard.dispatch(KeyEvent::up(code));
        }
    }
}

impl<A: VitrineApp> ApplicationHandler for Runner<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_cfg = &self.config.window;
        let attributes = Window::default_attributes()
            .with_title(&window_cfg.title)
            .with_resizable(window_cfg.resizable)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                window_cfg.width,
                window_cfg.height,
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(anyhow::anyhow!("create window: {e}"));
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.window_size = (size.width, size.height);
        self.camera.set_aspect(aspect_of(self.window_size));
        log::info!("window created ({}x{})", size.width, size.height);

        let time = self.clock.peek();
        let req = self.with_context(&window, time, |app, ctx| app.setup(ctx));
        self.window = Some(window.clone());
        self.apply(event_loop, &window, req);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // Input bookkeeping first so the app callback sees the new state
        match &event {
            WindowEvent::KeyboardInput { event: key, .. } => {
                if let PhysicalKey::Code(code) = key.physical_key {
                    self.dispatch_key(code, key.state == ElementState::Pressed, key.repeat);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input
                    .update_mouse_button(*button, *state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.set_mouse_position(position.x, position.y);
            }
            WindowEvent::Focused(false) => {
                self.release_keys();
                self.set_pointer_lock(&window, false);
            }
            _ => {}
        }

        // Forward to user callback
        let time = self.clock.peek();
        let req = self.with_context(&window, time, |app, ctx| app.on_window_event(&event, ctx));
        if self.apply(event_loop, &window, req) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let new_size = (size.width, size.height);
                self.window_size = new_size;
                self.camera.set_aspect(aspect_of(new_size));
                let req = self.with_context(&window, time, |app, ctx| app.on_resize(new_size, ctx));
                self.apply(event_loop, &window, req);
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        // raw motion only counts while captured, like browser pointer lock
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.pointer_locked {
                self.input.add_mouse_motion(dx, dy);
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };

        let now = Instant::now();
        if now < self.next_frame {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
            return;
        }

        // ── frame ───────────────────────────────────────────────────────────
        let time = self.clock.tick();
        let req = self.with_context(&window, time, |app, ctx| app.update(ctx));
        if self.apply(event_loop, &window, req) {
            return;
        }

        // Must happen AFTER update has read just_pressed etc.
        self.input.end_frame();

        match self.frame_interval {
            Some(interval) => {
                self.next_frame = now + interval;
                event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
            }
            None => event_loop.set_control_flow(ControlFlow::Poll),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.clone() {
            self.set_pointer_lock(&window, false);
        }
        self.app.on_exit();
        log::info!("event loop finished after {} frames", self.clock.peek().frame_count);
    }
}

/// Pacing for `target_fps`; `None` means run unthrottled.
fn frame_interval(target_fps: u32) -> Option<Duration> {
    (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(target_fps)))
}

pub(crate) fn run_internal<A: VitrineApp + 'static>(config: AppConfig, app: A) -> anyhow::Result<()> {
    let mut runner = Runner::new(app, config);
    let event_loop = EventLoop::new().map_err(|e| anyhow::anyhow!("create event loop: {e}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop
        .run_app(&mut runner)
        .map_err(|e| anyhow::anyhow!("event loop failed: {e}"))?;

    match runner.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
