pub mod pipeline;
pub mod renderer;
pub mod texture;
pub mod vertex;

pub use pipeline::{describe, SpritePipeline};
pub use renderer::Renderer;
pub use texture::{decode_rgba, Texture, TextureError};
pub use vertex::Vertex2d;
