//! GPU-resident composite mesh.

use procgen::{CompositeMesh, PrimitivePart};
use wgpu::util::DeviceExt;

/// Vertex and index buffers for the whole scene plus the part table that
/// slices them into draws.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub parts: Vec<PrimitivePart>,
}

impl GpuMesh {
    /// Upload a finished mesh once. The CPU-side arrays are dropped on return.
    pub fn upload(device: &wgpu::Device, mesh: CompositeMesh) -> Self {
        let CompositeMesh {
            vertices,
            indices,
            parts,
        } = mesh;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::info!(
            "Uploaded scene mesh: {} vertices ({} bytes), {} indices ({} bytes), {} parts",
            vertices.len(),
            vertex_buffer.size(),
            indices.len(),
            index_buffer.size(),
            parts.len()
        );

        Self {
            vertex_buffer,
            index_buffer,
            parts,
        }
    }
}
