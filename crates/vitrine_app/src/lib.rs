//! Host framework for Vitrine walkthrough applications.
//!
//! Opens a window, feeds keyboard and mouse events into the shared input
//! state and key listener hub, and calls the app once per frame.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vitrine_app::{App, AppContext, VitrineApp};
//! use vitrine_core::Player;
//!
//! struct Walk {
//!     player: Player,
//! }
//!
//! impl VitrineApp for Walk {
//!     fn setup(&mut self, ctx: &mut AppContext) {
//!         self.player.activate(ctx.keyboard);
//!     }
//!
//!     fn update(&mut self, ctx: &mut AppContext) {
//!         self.player.update(ctx.camera, ctx.time.delta);
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     App::new(Walk { player: Player::default() })
//!         .with_title("Walk")
//!         .run()
//! }
//! ```

pub mod builder;
pub mod config;
pub mod context;
pub mod logging;
mod runner;
pub mod traits;

pub use builder::App;
pub use config::{AppConfig, CameraConfig, ClockConfig, LogConfig, WindowConfig};
pub use context::AppContext;
pub use traits::VitrineApp;

// ── Re-export the most-used vitrine_core primitives ─────────────────────────
pub use vitrine_core::{Camera, InputState, KeyCode, KeyboardHub, MouseButton, Time};
