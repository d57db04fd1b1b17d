//! First-person camera with planar reflection support

use stillwater_core::{mat4_mul, Vec3};

/// A first-person 3D camera.
///
/// The pose is position + yaw/pitch; the render pipeline takes cameras by
/// value per pass, so a frame works with immutable snapshots rather than a
/// shared mutable camera.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    /// Camera position
    pub position: Vec3,
    /// Horizontal angle in radians
    pub yaw: f32,
    /// Vertical angle in radians
    pub pitch: f32,
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 100.0, -100.0),
            yaw: 0.0,
            pitch: 0.0,
            fov: 60.0,
            near: 0.1,
            far: 2000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get camera position as an array for GPU upload
    pub fn position_array(&self) -> [f32; 3] {
        self.position.to_array()
    }

    /// Forward direction computed from yaw/pitch
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Right direction (world space, horizontal)
    pub fn right(&self) -> Vec3 {
        self.forward().cross(&Vec3::UP).normalized()
    }

    /// This camera's pose mirrored across the horizontal plane at `plane_height`.
    ///
    /// The mirrored position is y' = 2h - y and the pitch is negated; yaw is
    /// unaffected because the plane is horizontal. Reflecting twice restores
    /// the original pose.
    pub fn reflected(&self, plane_height: f32) -> Self {
        Self {
            position: Vec3::new(
                self.position.x,
                2.0 * plane_height - self.position.y,
                self.position.z,
            ),
            pitch: -self.pitch,
            ..*self
        }
    }

    /// Get the view matrix (4x4, column-major)
    pub fn view_matrix(&self) -> [[f32; 4]; 4] {
        let f = self.forward().normalized();
        let s = f.cross(&Vec3::UP).normalized();
        let u = s.cross(&f);

        [
            [s.x, u.x, -f.x, 0.0],
            [s.y, u.y, -f.y, 0.0],
            [s.z, u.z, -f.z, 0.0],
            [
                -s.dot(&self.position),
                -u.dot(&self.position),
                f.dot(&self.position),
                1.0,
            ],
        ]
    }

    /// Get the perspective projection matrix (4x4, column-major)
    pub fn projection_matrix(&self) -> [[f32; 4]; 4] {
        let fov_rad = self.fov.to_radians();
        let f = 1.0 / (fov_rad / 2.0).tan();
        let depth = self.far - self.near;

        [
            [f / self.aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, -(self.far + self.near) / depth, -1.0],
            [0.0, 0.0, -(2.0 * self.far * self.near) / depth, 0.0],
        ]
    }

    /// Get combined view-projection matrix
    pub fn view_projection_matrix(&self) -> [[f32; 4]; 4] {
        let view = self.view_matrix();
        let proj = self.projection_matrix();
        mat4_mul(&proj, &view)
    }
}
