use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Host-owned 2D camera that fills the shader's camera uniform.
///
/// The projection maps the pixel-space viewport (origin at the top-left
/// corner, y pointing down) to clip space. The view matrix stays identity:
/// sprite geometry is emitted directly in the space the projection expects,
/// and the vertex stage applies the projection only.
#[derive(Clone, Debug)]
pub struct Camera2d {
    pub position: Vec2,
    pub view: Mat4,
    pub proj: Mat4,
}

impl Camera2d {
    /// Creates a camera for the given viewport size in pixels.
    pub fn new(viewport: Vec2) -> Self {
        let mut camera = Self {
            position: Vec2::ZERO,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
        };
        camera.set_viewport(viewport);
        camera
    }

    /// Rebuilds the projection after the viewport changed.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        let width = viewport.x.max(1.0);
        let height = viewport.y.max(1.0);
        self.proj = Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0);
    }

    /// Snapshot consumed by the renderer's uniform buffer.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: self.position.extend(0.0).extend(1.0).into(),
            view: self.view.to_cols_array_2d(),
            proj: self.proj.to_cols_array_2d(),
        }
    }
}

/// GPU-side camera record; layout must match the WGSL `CameraUniform`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Identity transforms; clip space equals input space.
    pub fn identity() -> Self {
        Self {
            view_position: [0.0, 0.0, 0.0, 1.0],
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn uniform_layout_matches_wgsl_struct() {
        // vec4 + mat4x4 + mat4x4, tightly packed.
        assert_eq!(std::mem::size_of::<CameraUniform>(), 144);

        let uniform = CameraUniform {
            view_position: [1.0, 2.0, 3.0, 4.0],
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
        };
        let bytes = bytemuck::bytes_of(&uniform);
        let head: &[f32] = bytemuck::cast_slice(&bytes[..16]);
        assert_eq!(head, &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn projection_maps_viewport_corners_to_clip_corners() {
        let camera = Camera2d::new(Vec2::new(800.0, 600.0));

        let top_left = camera.proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((top_left.x + 1.0).abs() < 1e-6);
        assert!((top_left.y - 1.0).abs() < 1e-6);

        let bottom_right = camera.proj * Vec4::new(800.0, 600.0, 0.0, 1.0);
        assert!((bottom_right.x - 1.0).abs() < 1e-6);
        assert!((bottom_right.y + 1.0).abs() < 1e-6);

        let center = camera.proj * Vec4::new(400.0, 300.0, 0.0, 1.0);
        assert!(center.x.abs() < 1e-6);
        assert!(center.y.abs() < 1e-6);
    }

    #[test]
    fn view_matrix_stays_identity() {
        let camera = Camera2d::new(Vec2::new(640.0, 480.0));
        assert_eq!(camera.view, Mat4::IDENTITY);
        assert_eq!(
            camera.uniform().view,
            Mat4::IDENTITY.to_cols_array_2d()
        );
    }

    #[test]
    fn zero_viewport_is_clamped() {
        let camera = Camera2d::new(Vec2::ZERO);
        for value in camera.proj.to_cols_array() {
            assert!(value.is_finite());
        }
    }
}
