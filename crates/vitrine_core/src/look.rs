//! Pointer-lock mouse look.
//!
//! `PointerLook` owns the camera orientation.  It accumulates yaw and pitch
//! from raw mouse motion while the pointer is locked and writes the result
//! into the camera rotation; it never touches the position.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Quat};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::scene::Camera;

/// Mouse look tuning, deserialised from the `[look]` config table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Radians per raw mouse count.
    pub sensitivity: f32,
    /// Lowest pitch in radians (looking down).
    pub min_pitch: f32,
    /// Highest pitch in radians (looking up).
    pub max_pitch: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.002,
            min_pitch: -FRAC_PI_2,
            max_pitch: FRAC_PI_2,
        }
    }
}

impl LookConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::finite("look.sensitivity", self.sensitivity)?;
        ConfigError::finite("look.min_pitch", self.min_pitch)?;
        ConfigError::finite("look.max_pitch", self.max_pitch)?;
        if self.min_pitch > self.max_pitch {
            return Err(ConfigError::EmptyPitchRange {
                min: self.min_pitch,
                max: self.max_pitch,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PointerLook {
    pub config: LookConfig,
    yaw: f32,
    pitch: f32,
    locked: bool,
}

impl PointerLook {
    pub fn new(config: LookConfig) -> Self {
        Self {
            config,
            yaw: 0.0,
            pitch: 0.0,
            locked: false,
        }
    }

    /// Seeds yaw and pitch from the camera's current rotation so the first
    /// mouse movement does not snap the view.
    pub fn from_camera(config: LookConfig, camera: &Camera) -> Self {
        let (yaw, pitch, _) = camera.transform.rotation.to_euler(EulerRot::YXZ);
        let mut look = Self::new(config);
        look.yaw = yaw;
        look.pitch = pitch.clamp(config.min_pitch, config.max_pitch);
        look
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Marks the pointer as captured; the host grabs the cursor.
    pub fn lock(&mut self) {
        if !self.locked {
            log::debug!("pointer locked");
        }
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        if self.locked {
            log::debug!("pointer unlocked");
        }
        self.locked = false;
    }

    /// Turns by a raw mouse delta.  Ignored while unlocked.
    pub fn apply_motion(&mut self, dx: f32, dy: f32) {
        if !self.locked {
            return;
        }
        let sens = self.config.sensitivity;
        self.yaw -= dx * sens;
        self.pitch = (self.pitch - dy * sens).clamp(self.config.min_pitch, self.config.max_pitch);
    }

    /// The orientation for the current yaw and pitch.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Writes the orientation into `camera`.  Position is untouched.
    pub fn apply_to(&self, camera: &mut Camera) {
        camera.transform.rotation = self.rotation();
    }
}

impl Default for PointerLook {
    fn default() -> Self {
        Self::new(LookConfig::default())
    }
}
