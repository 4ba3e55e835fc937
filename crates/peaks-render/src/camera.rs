//! Orbit camera: drag-accumulated rotation angles viewed from a fixed eye.
//!
//! The lattice is rotated about the X axis first, then the Y axis — the
//! rotation order determines the orbit's visual feel and is fixed.

use glam::{Mat4, Vec3};

/// Camera state for the orbiting height-field view.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Accumulated rotation about the X axis, in degrees.
    pub rotation_x: f32,
    /// Accumulated rotation about the Y axis, in degrees.
    pub rotation_y: f32,
    /// Eye distance from the lattice center along -Z.
    pub distance: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

impl OrbitCamera {
    /// Camera at the reference eye position with no rotation applied.
    pub fn new(distance: f32, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            distance,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.01,
            far: 1000.0,
        }
    }

    /// The model rotation: identity, rotate X, then rotate Y.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation_x.to_radians())
            * Mat4::from_rotation_y(self.rotation_y.to_radians())
    }

    /// The view matrix: eye on -Z looking at the lattice center, +Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, -self.distance), Vec3::ZERO, Vec3::Y)
    }

    /// The projection matrix with reverse-Z (near and far swapped; pairs
    /// with a GreaterEqual depth compare and a 0.0 depth clear).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.far, self.near)
    }

    /// The combined transform uploaded to the vertex shader each frame.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix() * self.model_matrix()
    }

    /// Update the aspect ratio after a window resize.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        self.aspect = width / height.max(1.0);
    }
}
