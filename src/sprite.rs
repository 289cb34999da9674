use glam::{Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::render::{Renderer, Texture, Vertex2d};

/// Indices for the two triangles of a sprite quad.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// A textured, tinted quad positioned in pixel space.
///
/// The tint is three components on purpose: the fragment stage fixes the
/// tint's alpha at 1.0 so the texture's own alpha always wins.
pub struct Sprite2d {
    pub position: Vec2,
    pub size: Vec2,
    pub tint: Vec3,
    texture: Texture,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

impl Sprite2d {
    /// Creates a sprite and its GPU resources.
    pub fn new(
        renderer: &Renderer,
        texture: Texture,
        position: Vec2,
        size: Vec2,
        tint: Vec3,
    ) -> Self {
        let bind_group = renderer.create_sprite_bind_group(&texture);

        let vertices = quad_vertices(position, size, tint);
        let vertex_buffer =
            renderer
                .device()
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("sprite-vertices"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                });
        let index_buffer =
            renderer
                .device()
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("sprite-indices"),
                    contents: bytemuck::cast_slice(&QUAD_INDICES),
                    usage: wgpu::BufferUsages::INDEX,
                });

        Self {
            position,
            size,
            tint,
            texture,
            bind_group,
            vertex_buffer,
            index_buffer,
        }
    }

    /// Moves the sprite and rewrites its vertex buffer.
    pub fn set_position(&mut self, queue: &wgpu::Queue, position: Vec2) {
        self.position = position;
        self.write_vertices(queue);
    }

    /// Changes the per-vertex tint and rewrites the vertex buffer.
    pub fn set_tint(&mut self, queue: &wgpu::Queue, tint: Vec3) {
        self.tint = tint;
        self.write_vertices(queue);
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub(crate) fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub(crate) fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    fn write_vertices(&self, queue: &wgpu::Queue) {
        let vertices = quad_vertices(self.position, self.size, self.tint);
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
    }
}

/// Builds the four quad vertices for a sprite. Texture coordinates cover
/// the full image; every vertex carries the same tint.
pub fn quad_vertices(position: Vec2, size: Vec2, tint: Vec3) -> [Vertex2d; 4] {
    let min = position;
    let max = position + size;
    let color = tint.to_array();
    [
        Vertex2d {
            position: [min.x, min.y],
            uv: [0.0, 0.0],
            color,
        },
        Vertex2d {
            position: [min.x, max.y],
            uv: [0.0, 1.0],
            color,
        },
        Vertex2d {
            position: [max.x, max.y],
            uv: [1.0, 1.0],
            color,
        },
        Vertex2d {
            position: [max.x, min.y],
            uv: [1.0, 0.0],
            color,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_spans_position_to_position_plus_size() {
        let vertices = quad_vertices(
            Vec2::new(10.0, 20.0),
            Vec2::new(100.0, 50.0),
            Vec3::new(1.0, 0.5, 0.25),
        );

        assert_eq!(vertices[0].position, [10.0, 20.0]);
        assert_eq!(vertices[2].position, [110.0, 70.0]);
        assert_eq!(vertices[0].uv, [0.0, 0.0]);
        assert_eq!(vertices[2].uv, [1.0, 1.0]);
        assert!(vertices.iter().all(|v| v.color == [1.0, 0.5, 0.25]));
    }

    #[test]
    fn indices_form_two_triangles_over_four_vertices() {
        assert_eq!(QUAD_INDICES.len(), 6);
        assert!(QUAD_INDICES.iter().all(|&i| i < 4));
    }
}
