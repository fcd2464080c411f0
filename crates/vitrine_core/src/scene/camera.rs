use glam::{Mat4, Vec3};

use crate::transform::Transform;

/// First-person camera pose plus projection parameters.
///
/// Position and orientation live in `transform`.  In the walkthrough the two
/// halves have different owners: [`Player`](crate::Player) moves the position,
/// [`PointerLook`](crate::PointerLook) turns the rotation.
#[derive(Debug, Clone)]
pub struct Camera {
    // --- pose ---------------------------------------------------------------
    pub transform: Transform,
    // --- projection parameters ----------------------------------------------
    pub fovy: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            fovy: 75.0f32.to_radians(),
            aspect: 1.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Camera {
    /// Camera standing at `position`, looking down `−Z`.
    pub fn at(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            ..Default::default()
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[inline]
    pub fn position_mut(&mut self) -> &mut Vec3 {
        &mut self.transform.position
    }

    /// Translate along the camera's local right axis.
    #[inline]
    pub fn translate_x(&mut self, distance: f32) {
        self.transform.translate_local_x(distance);
    }

    /// Translate along the camera's local `+Z` axis (backwards).
    #[inline]
    pub fn translate_z(&mut self, distance: f32) {
        self.transform.translate_local_z(distance);
    }

    pub fn view_matrix(&self) -> Mat4 {
        let t = &self.transform;
        Mat4::look_to_rh(t.position, t.forward(), t.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// Build the combined view-projection matrix from the current parameters.
    pub fn build_view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio when viewport dimensions change.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_matrix_moves_world_opposite_to_camera() {
        let cam = Camera::at(Vec3::new(0.0, 1.8, 5.0));
        let origin_in_view = cam.view_matrix().transform_point3(Vec3::new(0.0, 1.8, 0.0));
        // five units straight ahead
        assert!(origin_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 1e-5));
    }

    #[test]
    fn translate_z_negative_is_forward() {
        let mut cam = Camera::default();
        cam.translate_z(-2.0);
        assert!(cam.position().abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-6));
    }
}
