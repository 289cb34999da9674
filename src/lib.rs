//! Tinted 2D sprite shading pipeline built on wgpu.
//!
//! The crate is organized around one render pipeline with two stages: a
//! vertex stage that projects pixel-space quad vertices into clip space,
//! and a fragment stage that modulates a sampled texture with a
//! per-vertex tint.  The host-side modules (camera, texture, sprite,
//! renderer) exist to bind resources to those stages; the stage semantics
//! themselves live in the embedded shader and are mirrored one-to-one by
//! the pure functions in [`shading`].

pub mod camera;
pub mod render;
pub mod shading;
pub mod sprite;

pub use camera::{Camera2d, CameraUniform};
pub use render::{Renderer, Texture, TextureError, Vertex2d};
pub use shading::{fragment_stage, interpolate, vertex_stage, Varyings};
pub use sprite::{quad_vertices, Sprite2d};
