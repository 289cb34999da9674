use std::path::Path;

use thiserror::Error;

/// Errors produced while getting image data onto the GPU.
///
/// The shading stages themselves have no error taxonomy; everything here
/// happens before a single draw is recorded.
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read texture file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),
    #[error("pixel data is {actual} bytes, expected {expected}")]
    PixelSizeMismatch { expected: usize, actual: usize },
}

/// A 2D texture with its view and sampler, ready to bind at group 1.
///
/// The sampler uses linear filtering and clamp-to-edge addressing; texture
/// coordinates outside `[0, 1]` are resolved here, never by the shader.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl Texture {
    /// Reads and decodes an image file, then uploads it.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let image = decode_rgba(&bytes)?;
        log::info!(
            "loaded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_image(device, queue, &image, &path.to_string_lossy()))
    }

    /// Uploads an already-decoded RGBA image.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &image::RgbaImage,
        label: &str,
    ) -> Self {
        Self::upload(device, queue, image.width(), image.height(), image, label)
    }

    /// Uploads raw RGBA8 pixel data.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        pixels: &[u8],
        label: &str,
    ) -> Result<Self, TextureError> {
        let expected = (width as usize) * (height as usize) * 4;
        if pixels.len() != expected {
            return Err(TextureError::PixelSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self::upload(device, queue, width, height, pixels, label))
    }

    /// Procedural two-tone checkerboard used by the demo when no image is
    /// supplied.
    pub fn checkerboard(device: &wgpu::Device, queue: &wgpu::Queue, size: u32, cell: u32) -> Self {
        let pixels = checkerboard_pixels(size, cell);
        Self::upload(device, queue, size, size, &pixels, "checkerboard")
    }

    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        pixels: &[u8],
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * size.width),
                rows_per_image: Some(size.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size: (size.width, size.height),
        }
    }
}

/// Decodes image bytes into RGBA8.
pub fn decode_rgba(bytes: &[u8]) -> Result<image::RgbaImage, TextureError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

pub(crate) fn checkerboard_pixels(size: u32, cell: u32) -> Vec<u8> {
    let cell = cell.max(1);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let even = ((x / cell) + (y / cell)) % 2 == 0;
            let value = if even { 220 } else { 96 };
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
    }
    pixels
}
