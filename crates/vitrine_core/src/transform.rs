//! World-space transform: position, rotation (quaternion), scale.
//!
//! `Transform` is `Copy` and `Default`, making it easy to embed in any
//! struct.  The local-axis translations follow the usual right-handed camera
//! convention: `+X` is right, `+Y` is up and the camera looks down `−Z`.

use glam::{Mat4, Quat, Vec3};

/// World-space transform component.
///
/// # Example
/// ```rust,ignore
/// use vitrine_core::Transform;
/// use glam::Vec3;
///
/// let mut t = Transform::from_position(Vec3::new(0.0, 1.8, 5.0));
/// t.translate_local_z(-1.0); // one unit forward, wherever it faces
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec3,
    /// Orientation as a unit quaternion.
    pub rotation: Quat,
    /// Non-uniform scale factor.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform: no translation or rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Construct with a world-space position, identity rotation and scale.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Construct with a position and a look-at rotation.
    ///
    /// `target` is the point to face, `up` the world-up hint (usually `Vec3::Y`).
    /// If `target == position` the rotation stays identity.
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let dir = target - position;
        let rotation = if dir.length_squared() < 1e-10 {
            Quat::IDENTITY
        } else {
            // the view matrix holds the inverse camera rotation
            Quat::from_mat4(&Mat4::look_at_rh(position, target, up)).inverse()
        };
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Build the TRS model matrix (`T * R * S`).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Apply a translation offset in world space.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Move `distance` along the local `+X` axis.
    pub fn translate_local_x(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    /// Move `distance` along the local `+Z` axis.  Negative values move
    /// forward.
    pub fn translate_local_z(&mut self, distance: f32) {
        self.position += self.rotation * Vec3::Z * distance;
    }

    /// Rotate by `angle` radians around the given world-space axis.
    pub fn rotate_axis(&mut self, axis: Vec3, angle: f32) {
        self.rotation = Quat::from_axis_angle(axis, angle) * self.rotation;
    }

    /// Rotate around the world Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotate_axis(Vec3::Y, angle);
    }

    /// Forward direction in world space (`−Z` rotated by the quaternion).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Right direction in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Up direction in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_matrix() {
        let t = Transform::default();
        assert!(t.matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn translation_only() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let (_, _, pos) = t.matrix().to_scale_rotation_translation();
        assert!(pos.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
    }

    #[test]
    fn local_translation_follows_rotation() {
        let mut t = Transform::default();
        // quarter turn left: forward becomes −X, right becomes −Z
        t.rotate_y(FRAC_PI_2);
        t.translate_local_z(-1.0);
        assert!(t.position.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), 1e-5));

        t.translate_local_x(2.0);
        assert!(t.position.abs_diff_eq(Vec3::new(-1.0, 0.0, -2.0), 1e-5));
    }

    #[test]
    fn looking_at_faces_target() {
        let t = Transform::looking_at(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0), Vec3::Y);
        assert!(t.forward().abs_diff_eq(Vec3::X, 1e-5));

        let same = Transform::looking_at(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert_eq!(same.rotation, Quat::IDENTITY);
    }
}
