// vitrine_core: pose, input and movement for the museum walkthrough

pub mod error;

// keyboard listener registration with scoped cleanup
pub mod events;

// input helper for keyboard / mouse state
pub mod input;

pub mod look;
pub mod player;
pub mod scene;
pub mod time;
pub mod transform;

pub use error::ConfigError;
pub use events::{KeyEvent, KeyPhase, KeyboardHub, ListenerGuard};
// re-export common input types so callers don't need to depend on winit
pub use input::{InputState, KeyCode, MouseButton};
pub use look::{LookConfig, PointerLook};
pub use player::{integrate, MoveAction, MoveInput, Player, PlayerConfig};
pub use scene::{Camera, KeyBindings};
pub use time::{Time, TimeClock};
pub use transform::Transform;

pub use glam;
