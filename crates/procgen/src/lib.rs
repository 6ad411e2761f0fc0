//! Procedural generation of the still-life scene geometry.
//!
//! Every shape is tessellated on the CPU into one shared vertex/index buffer.
//! Nothing here touches the GPU; the renderer uploads the finished
//! [`CompositeMesh`] once at startup.

pub mod builder;
pub mod mesh;
pub mod scene;
pub mod surfaces;

pub use builder::*;
pub use mesh::*;
pub use scene::*;
pub use surfaces::*;
