//! CPU reference for the sprite shader stages.
//!
//! These functions state the exact semantics of the WGSL embedded in
//! [`crate::render::pipeline`]: the vertex stage applies the camera's
//! projection matrix only, and the fragment stage modulates the sampled
//! texel with the interpolated tint while leaving texture alpha alone.
//! The GPU path never calls into this module; the test suite runs the
//! stages here because the properties they must hold are not observable
//! through a live pipeline.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::camera::CameraUniform;
use crate::render::Vertex2d;

/// Per-vertex output: the clip position consumed by rasterization plus the
/// attributes the rasterizer interpolates across each primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Varyings {
    pub clip_position: Vec4,
    pub uv: Vec2,
    pub color: Vec3,
}

/// Vertex stage: lift the 2D position to homogeneous coordinates and apply
/// the projection matrix. The camera's view matrix and view position are
/// deliberately not applied; geometry is treated as pre-transformed into
/// the space the projection expects.
pub fn vertex_stage(vertex: &Vertex2d, camera: &CameraUniform) -> Varyings {
    let proj = Mat4::from_cols_array_2d(&camera.proj);
    let position = Vec4::new(vertex.position[0], vertex.position[1], 0.0, 1.0);
    Varyings {
        clip_position: proj * position,
        uv: Vec2::from(vertex.uv),
        color: Vec3::from(vertex.color),
    }
}

/// Fragment stage: `vec4(tint, 1.0) * texel`. The tint scales the texel's
/// RGB channels and, with its implicit alpha of 1.0, passes the texture's
/// native alpha through unchanged. No clamping happens here; out-of-range
/// values survive until output quantization.
pub fn fragment_stage(tint: Vec3, texel: Vec4) -> Vec4 {
    tint.extend(1.0) * texel
}

/// Linear interpolation of varyings over a triangle, as the rasterizer
/// performs it. `weights` are barycentric coordinates and are assumed to
/// sum to one.
pub fn interpolate(a: &Varyings, b: &Varyings, c: &Varyings, weights: Vec3) -> Varyings {
    Varyings {
        clip_position: a.clip_position * weights.x
            + b.clip_position * weights.y
            + c.clip_position * weights.z,
        uv: a.uv * weights.x + b.uv * weights.y + c.uv * weights.z,
        color: a.color * weights.x + b.color * weights.y + c.color * weights.z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, y: f32) -> Vertex2d {
        Vertex2d {
            position: [x, y],
            uv: [0.25, 0.75],
            color: [0.2, 0.4, 0.6],
        }
    }

    #[test]
    fn clip_position_is_projection_times_lifted_position() {
        let mut camera = CameraUniform::identity();
        camera.proj = Mat4::from_scale(Vec3::new(2.0, 3.0, 1.0)).to_cols_array_2d();

        let out = vertex_stage(&vertex(0.5, -1.0), &camera);
        assert_eq!(out.clip_position, Vec4::new(1.0, -3.0, 0.0, 1.0));
    }

    #[test]
    fn identity_projection_passes_position_through() {
        let out = vertex_stage(&vertex(0.5, 0.5), &CameraUniform::identity());
        assert_eq!(out.clip_position, Vec4::new(0.5, 0.5, 0.0, 1.0));
    }

    #[test]
    fn view_matrix_and_view_position_do_not_affect_output() {
        let base = vertex_stage(&vertex(0.3, -0.7), &CameraUniform::identity());

        let mut skewed = CameraUniform::identity();
        skewed.view = Mat4::from_translation(Vec3::new(10.0, -4.0, 2.0)).to_cols_array_2d();
        skewed.view_position = [99.0, 98.0, 97.0, 1.0];

        assert_eq!(vertex_stage(&vertex(0.3, -0.7), &skewed), base);
    }

    #[test]
    fn uv_and_color_are_forwarded_unmodified() {
        let input = vertex(0.0, 0.0);
        let out = vertex_stage(&input, &CameraUniform::identity());
        assert_eq!(out.uv, Vec2::new(0.25, 0.75));
        assert_eq!(out.color, Vec3::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn interpolation_weight_one_reproduces_vertex_attributes() {
        let camera = CameraUniform::identity();
        let a = vertex_stage(
            &Vertex2d {
                position: [0.0, 0.0],
                uv: [0.0, 0.0],
                color: [1.0, 0.0, 0.0],
            },
            &camera,
        );
        let b = vertex_stage(
            &Vertex2d {
                position: [1.0, 0.0],
                uv: [1.0, 0.0],
                color: [0.0, 1.0, 0.0],
            },
            &camera,
        );
        let c = vertex_stage(
            &Vertex2d {
                position: [0.0, 1.0],
                uv: [0.0, 1.0],
                color: [0.0, 0.0, 1.0],
            },
            &camera,
        );

        let at_b = interpolate(&a, &b, &c, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(at_b, b);

        let midpoint = interpolate(&a, &b, &c, Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(midpoint.uv, Vec2::new(0.5, 0.0));
        assert_eq!(midpoint.color, Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn white_texel_with_white_tint_is_the_raw_texel() {
        let texel = Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(fragment_stage(Vec3::ONE, texel), texel);
    }

    #[test]
    fn tint_scales_rgb_and_preserves_alpha() {
        let out = fragment_stage(Vec3::new(0.5, 0.0, 1.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(out, Vec4::new(0.5, 0.0, 1.0, 1.0));

        let translucent = fragment_stage(Vec3::new(0.5, 0.5, 0.5), Vec4::new(0.8, 0.6, 0.4, 0.3));
        assert_eq!(translucent, Vec4::new(0.4, 0.3, 0.2, 0.3));
    }

    #[test]
    fn out_of_range_tint_is_not_clamped() {
        let out = fragment_stage(Vec3::splat(2.0), Vec4::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(out, Vec4::new(1.0, 1.0, 1.0, 1.0));

        let hot = fragment_stage(Vec3::splat(4.0), Vec4::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(hot, Vec4::new(2.0, 2.0, 2.0, 1.0));
    }

    #[test]
    fn singular_projection_propagates_silently() {
        let mut camera = CameraUniform::identity();
        camera.proj = Mat4::ZERO.to_cols_array_2d();

        let out = vertex_stage(&vertex(0.5, 0.5), &camera);
        assert_eq!(out.clip_position, Vec4::ZERO);
    }
}
