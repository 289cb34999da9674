use crate::camera::CameraUniform;
use crate::render::Vertex2d;

/// The sprite shader. The binding contract here is observable interface:
/// group 0 binding 0 is the camera uniform (vertex stage), group 1 holds
/// the texture/sampler pair (fragment stage), and the vertex inputs sit at
/// locations 0..=2. The vertex stage applies the projection matrix only;
/// the view matrix and view position ride along in the uniform unused.
pub(crate) const SHADER: &str = r#"
struct CameraUniform {
    view_position: vec4<f32>,
    view: mat4x4<f32>,
    proj: mat4x4<f32>,
}

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) color: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec3<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.uv = input.uv;
    output.color = input.color;
    output.clip_position = camera.proj * vec4<f32>(input.position, 0.0, 1.0);
    return output;
}

@group(1) @binding(0)
var sprite_texture: texture_2d<f32>;
@group(1) @binding(1)
var sprite_sampler: sampler;

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(input.color, 1.0) * textureSample(sprite_texture, sprite_sampler, input.uv);
}
"#;

/// Render pipeline for tinted sprites plus the layouts needed to bind
/// resources to it.
pub struct SpritePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub camera_layout: wgpu::BindGroupLayout,
    pub texture_layout: wgpu::BindGroupLayout,
}

impl SpritePipeline {
    /// Builds the sprite pipeline for the given color target format.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprite-shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera-bind-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(
                        std::num::NonZeroU64::new(std::mem::size_of::<CameraUniform>() as u64)
                            .unwrap(),
                    ),
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite-texture-bind-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite-pipeline-layout"),
            bind_group_layouts: &[&camera_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprite-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex2d::desc()],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                ..Default::default()
            },
            // Single color attachment, no depth; sprites draw in submission
            // order and composite through the blend state below.
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            camera_layout,
            texture_layout,
        }
    }
}

/// Human-readable summary of the binding contract and vertex layout,
/// printed by the binary's `--describe` mode.
pub fn describe() -> String {
    let mut out = String::new();
    out.push_str("sprite pipeline bindings:\n");
    out.push_str("  group 0 binding 0: camera uniform, 144 bytes (vertex)\n");
    out.push_str("  group 1 binding 0: texture 2d<f32> (fragment)\n");
    out.push_str("  group 1 binding 1: sampler, filtering (fragment)\n");

    let desc = Vertex2d::desc();
    out.push_str(&format!("vertex buffer, stride {} bytes:\n", desc.array_stride));
    let names = ["position", "uv", "color"];
    for (attribute, name) in desc.attributes.iter().zip(names) {
        out.push_str(&format!(
            "  location {}: {name}, {:?} at offset {}\n",
            attribute.shader_location, attribute.format, attribute.offset
        ));
    }
    out.push_str("fragment output: location 0, rgba\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    static MODULE: Lazy<naga::Module> =
        Lazy::new(|| naga::front::wgsl::parse_str(SHADER).expect("sprite shader parses"));

    #[test]
    fn shader_validates() {
        let info = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&MODULE);
        if let Err(err) = info {
            panic!("sprite shader validation failed: {err:?}");
        }
    }

    #[test]
    fn shader_exposes_both_entry_points() {
        let stages: Vec<_> = MODULE
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect();
        assert!(stages.contains(&("vs_main", naga::ShaderStage::Vertex)));
        assert!(stages.contains(&("fs_main", naga::ShaderStage::Fragment)));
    }

    #[test]
    fn shader_declares_the_binding_contract() {
        let mut bindings = Vec::new();
        for (_, variable) in MODULE.global_variables.iter() {
            if let Some(binding) = &variable.binding {
                bindings.push((binding.group, binding.binding));
            }
        }
        bindings.sort_unstable();
        assert_eq!(bindings, vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn describe_names_every_binding() {
        let text = describe();
        assert!(text.contains("group 0 binding 0"));
        assert!(text.contains("group 1 binding 0"));
        assert!(text.contains("group 1 binding 1"));
        assert!(text.contains("stride 28"));
    }
}
