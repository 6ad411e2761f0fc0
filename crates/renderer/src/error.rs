//! Renderer error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::materials::Material;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode image {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("{path} has {channels} channels, only RGB and RGBA images are supported")]
    UnsupportedChannels { path: PathBuf, channels: u8 },
}

/// Failures while setting up or driving the GPU.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("failed to create surface")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to request device")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("shader failed validation: {0}")]
    Shader(String),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error("no texture loaded for material {0:?}")]
    MissingMaterial(Material),
    #[error("surface error")]
    Surface(#[from] wgpu::SurfaceError),
}
