//! The museum room walkthrough, as a [`VitrineApp`](vitrine_app::VitrineApp).

pub mod museum;

pub use museum::{Intent, Museum};
