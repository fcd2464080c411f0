//! Camera pose and the key layout that drives it.

pub mod bindings;
pub mod camera;

pub use bindings::KeyBindings;
pub use camera::Camera;
