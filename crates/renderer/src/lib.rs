//! wgpu renderer for the still-life scene.

pub mod camera;
pub mod error;
pub mod lighting;
pub mod materials;
pub mod mesh;
pub mod pipeline;
pub mod projection;
pub mod renderer;
pub mod texture;
pub mod vertex;

pub use camera::*;
pub use error::*;
pub use lighting::*;
pub use materials::*;
pub use mesh::*;
pub use pipeline::*;
pub use projection::*;
pub use renderer::*;
pub use texture::*;
pub use vertex::*;
