use vitrine_app::{AppConfig, AppContext, VitrineApp};
use vitrine_core::{
    Camera, InputState, KeyCode, KeyboardHub, LookConfig, MouseButton, Player, PointerLook,
};

/// Seconds between position reports in the log.
const REPORT_INTERVAL: f64 = 2.0;

/// What a frame of the walkthrough wants from the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub pointer_lock: Option<bool>,
    pub exit: bool,
}

/// The museum room walkthrough: keyboard walking plus pointer-lock look.
pub struct Museum {
    player: Player,
    look: PointerLook,
    look_config: LookConfig,
    next_report: f64,
}

impl Museum {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            player: Player::new(config.player),
            look: PointerLook::new(config.look),
            look_config: config.look,
            next_report: 0.0,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn look(&self) -> &PointerLook {
        &self.look
    }

    /// Subscribes the player to `keyboard` and seeds the look angles from
    /// the starting camera.
    pub fn attach(&mut self, keyboard: &KeyboardHub, camera: &Camera) {
        self.player.activate(keyboard);
        self.look = PointerLook::from_camera(self.look_config, camera);
    }

    pub fn detach(&mut self) {
        self.player.deactivate();
    }

    /// One frame: pointer-lock bookkeeping, mouse look, then movement.
    pub fn step(
        &mut self,
        input: &mut InputState,
        camera: &mut Camera,
        pointer_locked: bool,
        delta: f32,
    ) -> Intent {
        let mut intent = Intent::default();

        if pointer_locked {
            self.look.lock();
        } else {
            self.look.unlock();
        }

        if input.just_pressed(KeyCode::Escape) {
            if pointer_locked {
                intent.pointer_lock = Some(false);
            } else {
                intent.exit = true;
            }
        } else if !pointer_locked && input.is_button_down(MouseButton::Left) {
            intent.pointer_lock = Some(true);
        }

        let (dx, dy) = input.consume_mouse_motion();
        self.look.apply_motion(dx, dy);
        self.look.apply_to(camera);

        self.player.update(camera, delta);
        intent
    }
}

impl VitrineApp for Museum {
    fn setup(&mut self, ctx: &mut AppContext) {
        self.attach(ctx.keyboard, ctx.camera);
        log::info!("click to look around, WASD or arrows to walk, Esc to release the pointer");
    }

    fn update(&mut self, ctx: &mut AppContext) {
        let intent = self.step(ctx.input, ctx.camera, ctx.pointer_locked(), ctx.time.delta);
        if let Some(lock) = intent.pointer_lock {
            ctx.request_pointer_lock(lock);
        }
        if intent.exit {
            ctx.request_exit();
        }

        if ctx.time.elapsed >= self.next_report {
            self.next_report = ctx.time.elapsed + REPORT_INTERVAL;
            let p = ctx.camera.position();
            log::debug!(
                "at ({:.2}, {:.2}, {:.2}) yaw {:.2} pitch {:.2}, {:.0} fps",
                p.x,
                p.y,
                p.z,
                self.look.yaw(),
                self.look.pitch(),
                ctx.time.fps
            );
        }
    }

    fn on_exit(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{KeyEvent, KeyPhase};

    const DT: f32 = 1.0 / 60.0;

    struct Rig {
        hub: KeyboardHub,
        input: InputState,
        camera: Camera,
        museum: Museum,
    }

    impl Rig {
        fn new() -> Self {
            let config = AppConfig::default();
            let hub = KeyboardHub::new();
            let camera = config.camera.build(16.0 / 9.0);
            let mut museum = Museum::new(&config);
            museum.attach(&hub, &camera);
            Self { hub, input: InputState::new(), camera, museum }
        }

        // mirrors what the runner does with a winit key event
        fn key(&mut self, code: KeyCode, pressed: bool) {
            self.input.update_key(code, pressed);
            let phase = if pressed { KeyPhase::Down } else { KeyPhase::Up };
            self.hub.dispatch(KeyEvent { code, phase, repeat: false });
        }

        fn frame(&mut self, locked: bool) -> Intent {
            let intent = self.museum.step(&mut self.input, &mut self.camera, locked, DT);
            self.input.end_frame();
            intent
        }
    }

    #[test]
    fn walks_toward_the_cabinets() {
        let mut rig = Rig::new();
        let start = rig.camera.position();
        rig.key(KeyCode::KeyW, true);
        for _ in 0..60 {
            rig.frame(false);
        }
        let end = rig.camera.position();
        assert!(end.z < start.z - 1.0);
        assert_eq!(end.y, 1.8);
        assert!((end.x - start.x).abs() < 1e-4);
    }

    #[test]
    fn click_locks_and_escape_releases() {
        let mut rig = Rig::new();
        rig.input.update_mouse_button(MouseButton::Left, true);
        assert_eq!(rig.frame(false).pointer_lock, Some(true));

        rig.input.update_mouse_button(MouseButton::Left, false);
        assert_eq!(rig.frame(true), Intent::default());
        assert!(rig.museum.look().is_locked());

        rig.key(KeyCode::Escape, true);
        let intent = rig.frame(true);
        assert_eq!(intent.pointer_lock, Some(false));
        assert!(!intent.exit);
    }

    #[test]
    fn escape_while_unlocked_exits() {
        let mut rig = Rig::new();
        rig.key(KeyCode::Escape, true);
        assert!(rig.frame(false).exit);
    }

    #[test]
    fn mouse_turns_only_while_locked() {
        let mut rig = Rig::new();
        rig.input.add_mouse_motion(300.0, 0.0);
        rig.frame(false);
        assert_eq!(rig.museum.look().yaw(), 0.0);

        rig.input.add_mouse_motion(300.0, 0.0);
        rig.frame(true);
        assert!(rig.museum.look().yaw() < 0.0);

        // walking now follows the new heading (turned right: +X)
        let before = rig.camera.position();
        rig.key(KeyCode::ArrowUp, true);
        for _ in 0..30 {
            rig.frame(true);
        }
        let moved = rig.camera.position() - before;
        assert!(moved.x > 0.0);
        assert_eq!(moved.y, 0.0);
    }

    #[test]
    fn detach_stops_listening() {
        let mut rig = Rig::new();
        assert_eq!(rig.hub.listener_count(KeyPhase::Down), 1);
        rig.museum.detach();
        assert_eq!(rig.hub.listener_count(KeyPhase::Down), 0);
        assert_eq!(rig.hub.listener_count(KeyPhase::Up), 0);
        assert!(!rig.museum.player().is_active());
    }
}
