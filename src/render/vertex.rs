use bytemuck::{Pod, Zeroable};

/// Per-vertex input consumed by the sprite pipeline.
///
/// Tightly packed: position at location 0, texture coordinate at
/// location 1, tint color at location 2.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex2d {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 3],
}

impl Vertex2d {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 0,
            shader_location: 0,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: (2 * std::mem::size_of::<f32>()) as u64,
            shader_location: 1,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: (4 * std::mem::size_of::<f32>()) as u64,
            shader_location: 2,
        },
    ];

    /// Buffer layout matching the shader's vertex inputs.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex2d>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_tightly_packed() {
        let desc = Vertex2d::desc();
        assert_eq!(desc.array_stride, 28);
        assert_eq!(desc.step_mode, wgpu::VertexStepMode::Vertex);

        let attrs = desc.attributes;
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0].shader_location, 0);
        assert_eq!(attrs[0].offset, 0);
        assert_eq!(attrs[0].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(attrs[1].shader_location, 1);
        assert_eq!(attrs[1].offset, 8);
        assert_eq!(attrs[1].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(attrs[2].shader_location, 2);
        assert_eq!(attrs[2].offset, 16);
        assert_eq!(attrs[2].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn casts_to_bytes_in_declaration_order() {
        let vertex = Vertex2d {
            position: [1.0, 2.0],
            uv: [3.0, 4.0],
            color: [5.0, 6.0, 7.0],
        };
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&vertex));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }
}
