//! First-person walkthrough movement.
//!
//! [`Player`] turns four directional key flags into damped, momentum-carrying
//! translation of a [`Camera`], locked to a fixed eye height.  Orientation is
//! left alone; see [`PointerLook`](crate::PointerLook) for that half.
//!
//! Each frame runs the same five steps:
//!
//! 1. friction: `v -= v * friction * dt` (explicit Euler, per axis)
//! 2. direction from the held keys, normalised unless zero
//! 3. acceleration along the axes whose keys are held
//! 4. camera translation along its local X and Z axes
//! 5. `position.y = eye_height`
//!
//! Velocity and direction use `Vec2` with `.x` for the camera's X axis and
//! `.y` for its Z axis.
//!
//! ```rust,ignore
//! let hub = KeyboardHub::new();
//! let mut player = Player::new(PlayerConfig::default());
//! player.activate(&hub);
//! // host loop:
//! hub.dispatch(KeyEvent::down(KeyCode::KeyW));
//! player.update(&mut camera, time.delta);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::events::{KeyEvent, KeyPhase, KeyboardHub, ListenerGuard};
use crate::scene::{Camera, KeyBindings};

/// Velocity decay rate per second.  Not a percentage; higher damps faster.
pub const FRICTION: f32 = 10.0;
/// Acceleration applied while a movement key is held, units per second².
pub const ACCELERATION: f32 = 40.0;
/// Height the camera is pinned to every frame.
pub const EYE_HEIGHT: f32 = 1.8;

/// One of the four walkthrough directions a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAction {
    Forward,
    Backward,
    Left,
    Right,
}

/// The four movement flags.  Only key events change them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
}

impl MoveInput {
    /// Sets the flag for `action`.  Returns whether anything changed;
    /// re-pressing a held key or releasing an unheld one is a no-op.
    pub fn apply(&mut self, action: MoveAction, pressed: bool) -> bool {
        let flag = match action {
            MoveAction::Forward => &mut self.forward,
            MoveAction::Backward => &mut self.backward,
            MoveAction::Left => &mut self.left,
            MoveAction::Right => &mut self.right,
        };
        let changed = *flag != pressed;
        *flag = pressed;
        changed
    }

    pub fn is_held(&self, action: MoveAction) -> bool {
        match action {
            MoveAction::Forward => self.forward,
            MoveAction::Backward => self.backward,
            MoveAction::Left => self.left,
            MoveAction::Right => self.right,
        }
    }

    /// No flag is set.
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// Unit direction of the held keys: `x = right − left`,
    /// `y = forward − backward`.  Opposing keys cancel to zero, which stays
    /// zero instead of normalising to NaN.
    pub fn direction(&self) -> Vec2 {
        let axis = |pos: bool, neg: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Vec2::new(axis(self.right, self.left), axis(self.forward, self.backward))
            .normalize_or_zero()
    }
}

/// Tuning for [`Player`].
///
/// Deserialised from the `[player]` table of the app config; missing keys
/// fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub friction: f32,
    pub acceleration: f32,
    pub eye_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            acceleration: ACCELERATION,
            eye_height: EYE_HEIGHT,
        }
    }
}

impl PlayerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::non_negative("player.friction", self.friction)?;
        ConfigError::non_negative("player.acceleration", self.acceleration)?;
        ConfigError::finite("player.eye_height", self.eye_height)
    }
}

/// Steps 1–3 of the frame: friction, direction, acceleration.
///
/// Friction is a plain Euler step, so a `delta` larger than
/// `1 / friction` pushes the velocity past zero.
pub fn integrate(velocity: Vec2, input: &MoveInput, delta: f32, config: &PlayerConfig) -> Vec2 {
    let mut v = velocity;
    v -= v * config.friction * delta;

    let dir = input.direction();
    if input.forward || input.backward {
        v.y -= dir.y * config.acceleration * delta;
    }
    if input.left || input.right {
        v.x -= dir.x * config.acceleration * delta;
    }
    v
}

/// Keyboard-driven first-person mover.
///
/// While active the player holds two listener registrations on a
/// [`KeyboardHub`], one for key-down and one for key-up.  They are released
/// by [`deactivate`](Self::deactivate), by re-activation and on drop.
#[derive(Debug)]
pub struct Player {
    config: PlayerConfig,
    bindings: Rc<KeyBindings>,
    input: Rc<RefCell<MoveInput>>,
    velocity: Vec2,
    listeners: Option<[ListenerGuard; 2]>,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            bindings: Rc::new(KeyBindings::default()),
            input: Rc::new(RefCell::new(MoveInput::default())),
            velocity: Vec2::ZERO,
            listeners: None,
        }
    }

    /// Replaces the key layout.  Takes effect on the next `activate`.
    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = Rc::new(bindings);
        self
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Current velocity, `x` along camera X and `y` along camera Z.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Snapshot of the movement flags.
    pub fn input(&self) -> MoveInput {
        *self.input.borrow()
    }

    pub fn is_active(&self) -> bool {
        self.listeners.is_some()
    }

    /// Subscribes to key-down and key-up on `hub`.  Any previous
    /// subscription is released first.
    pub fn activate(&mut self, hub: &KeyboardHub) {
        self.deactivate();

        let down = self.listener(hub, KeyPhase::Down, true);
        let up = self.listener(hub, KeyPhase::Up, false);
        self.listeners = Some([down, up]);
        log::debug!("player activated");
    }

    /// Drops both listener registrations and clears the movement flags.
    /// Velocity is kept, so a player that is still updated coasts to a stop.
    pub fn deactivate(&mut self) {
        if let Some(listeners) = self.listeners.take() {
            drop(listeners);
            *self.input.borrow_mut() = MoveInput::default();
            log::debug!("player deactivated");
        }
    }

    fn listener(&self, hub: &KeyboardHub, phase: KeyPhase, pressed: bool) -> ListenerGuard {
        let input = Rc::clone(&self.input);
        let bindings = Rc::clone(&self.bindings);
        hub.listen(phase, move |event: &KeyEvent| {
            if let Some(action) = bindings.action(event.code) {
                if input.borrow_mut().apply(action, pressed) {
                    log::trace!("{action:?} -> {pressed}");
                }
            }
        })
    }

    /// Advances one frame of `delta` seconds and moves `camera`.
    ///
    /// Only the camera position is written; its rotation is read (for the
    /// local axes) but never changed.
    pub fn update(&mut self, camera: &mut Camera, delta: f32) {
        debug_assert!(delta >= 0.0, "negative frame delta {delta}");

        let input = self.input();
        self.velocity = integrate(self.velocity, &input, delta, &self.config);

        camera.translate_x(-self.velocity.x * delta);
        camera.translate_z(self.velocity.y * delta);
        camera.position_mut().y = self.config.eye_height;

        log::trace!(
            "velocity ({:.3}, {:.3}) position {:?}",
            self.velocity.x,
            self.velocity.y,
            camera.position()
        );
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}
