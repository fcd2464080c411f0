//! TOML configuration for the host and the walkthrough controllers.
//!
//! Every table and key is optional; anything missing keeps its default.
//!
//! ```toml
//! [window]
//! title = "Museum"
//! width = 1600
//!
//! [player]
//! friction = 8.0
//!
//! [log]
//! level = "debug"
//! ```

use std::path::Path;

use anyhow::Context as _;
use glam::Vec3;
use serde::Deserialize;
use vitrine_core::{Camera, LookConfig, PlayerConfig};

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub player: PlayerConfig,
    pub look: LookConfig,
    pub clock: ClockConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Vitrine".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
        }
    }
}

/// Where the camera starts and how wide it sees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 1.8, 6.0],
            fov_degrees: 60.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl CameraConfig {
    /// Builds the initial camera, looking down `−Z`.
    pub fn build(&self, aspect: f32) -> Camera {
        Camera {
            fovy: self.fov_degrees.to_radians(),
            aspect,
            znear: self.znear,
            zfar: self.zfar,
            ..Camera::at(Vec3::from_array(self.position))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Upper bound for a frame delta, seconds.
    pub max_delta: f32,
    /// Frame rate the runner paces itself to.  `0` spins as fast as possible.
    pub target_fps: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_delta: vitrine_core::time::DEFAULT_MAX_DELTA,
            target_fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `error`, `warn`, `info`, `debug`, `trace` or `off`.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text).context("parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("load {}", path.display()))
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.player.validate().context("invalid [player] table")?;
        self.look.validate().context("invalid [look] table")?;
        anyhow::ensure!(
            self.clock.max_delta.is_finite() && self.clock.max_delta > 0.0,
            "clock.max_delta must be a positive number, got {}",
            self.clock.max_delta
        );
        anyhow::ensure!(
            self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0,
            "camera.fov_degrees must be in (0, 180), got {}",
            self.camera.fov_degrees
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [window]
            title = "Museum"

            [player]
            friction = 8.0

            [log]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.window.title, "Museum");
        assert_eq!(cfg.window.width, 1280);
        assert_eq!(cfg.player.friction, 8.0);
        assert_eq!(cfg.player.acceleration, 40.0);
        assert_eq!(cfg.player.eye_height, 1.8);
        assert_eq!(cfg.log.level, "debug");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = AppConfig::from_toml_str("[player]\nacceleration = -3.0\n").unwrap_err();
        assert!(format!("{err:#}").contains("player.acceleration"));

        assert!(AppConfig::from_toml_str("[clock]\nmax_delta = 0.0\n").is_err());
        assert!(AppConfig::from_toml_str("[camera]\nfov_degrees = 200.0\n").is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(AppConfig::from_toml_str("[player\nfriction = 1").is_err());
        assert!(AppConfig::from_toml_str("[player]\nfriction = \"fast\"").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = AppConfig::load_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert!(AppConfig::load("definitely/not/here.toml").is_err());
    }

    #[test]
    fn shipped_museum_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../museum.toml");
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.window.title, "Museum");
        assert_eq!(cfg.player, PlayerConfig::default());
        assert_eq!(cfg.look, LookConfig::default());
    }

    #[test]
    fn camera_starts_at_configured_pose() {
        let cam = CameraConfig::default().build(16.0 / 9.0);
        assert_eq!(cam.position(), Vec3::new(0.0, 1.8, 6.0));
        assert!((cam.fovy - 60f32.to_radians()).abs() < 1e-6);
    }
}
