//! Shared vertex/index storage that all surface generators append into.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Interleaved vertex: position followed by texture coordinates (5 floats, 20 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, tex_coords: Vec2) -> Self {
        Self {
            position: position.into(),
            tex_coords: tex_coords.into(),
        }
    }
}

/// What a single generator call added to a [`MeshBuffers`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Appended {
    pub vertices: u32,
    pub indices: u32,
}

/// Growing vertex and index sequences shared by every primitive in the scene.
///
/// Indices are absolute: a generator reads [`MeshBuffers::base`] before pushing
/// its first vertex and offsets every index it emits by that value.
#[derive(Debug, Clone, Default)]
pub struct MeshBuffers {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next pushed vertex will have.
    pub fn base(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn push_vertex(&mut self, position: Vec3, tex_coords: Vec2) {
        self.vertices.push(Vertex::new(position, tex_coords));
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Counts added since a snapshot taken with [`MeshBuffers::counts`].
    /// `None` if either buffer shrank in between.
    pub fn appended_since(&self, before: Appended) -> Option<Appended> {
        let now = self.counts();
        Some(Appended {
            vertices: now.vertices.checked_sub(before.vertices)?,
            indices: now.indices.checked_sub(before.indices)?,
        })
    }

    /// Growth of a generator that only appends.
    pub(crate) fn grown_since(&self, before: Appended) -> Appended {
        self.appended_since(before).unwrap_or_default()
    }

    pub fn counts(&self) -> Appended {
        Appended {
            vertices: self.vertices.len() as u32,
            indices: self.indices.len() as u32,
        }
    }

    /// Append `(stacks + 1) * (sectors + 1)` grid vertices.
    ///
    /// `surface(i, j)` yields the position for stack `i` and sector `j`; texture
    /// coordinates are `(j / sectors, i / stacks)`.
    pub fn push_grid_vertices(
        &mut self,
        stacks: u32,
        sectors: u32,
        mut surface: impl FnMut(u32, u32) -> Vec3,
    ) {
        self.vertices
            .reserve(((stacks + 1) * (sectors + 1)) as usize);
        for i in 0..=stacks {
            for j in 0..=sectors {
                let uv = Vec2::new(j as f32 / sectors as f32, i as f32 / stacks as f32);
                self.push_vertex(surface(i, j), uv);
            }
        }
    }

    /// Connect a `stacks x sectors` vertex grid starting at absolute index `base`.
    ///
    /// Each cell becomes two triangles `(k1, k2, k1+1)` and `(k1+1, k2, k2+1)`
    /// where `k1` is on stack `i` and `k2` directly below it on stack `i+1`.
    /// With `poles` set, the first triangle is dropped on stack 0 and the second
    /// on the last stack, where one edge of the cell collapses to a point.
    pub fn push_grid_indices(&mut self, base: u32, stacks: u32, sectors: u32, poles: PoleSkip) {
        for i in 0..stacks {
            let mut k1 = base + i * (sectors + 1);
            let mut k2 = k1 + sectors + 1;
            for _ in 0..sectors {
                if poles == PoleSkip::None || i != 0 {
                    self.push_triangle(k1, k2, k1 + 1);
                }
                if poles == PoleSkip::None || i != stacks - 1 {
                    self.push_triangle(k1 + 1, k2, k2 + 1);
                }
                k1 += 1;
                k2 += 1;
            }
        }
    }
}

/// Whether a stack/sector grid drops the triangles touching its end stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoleSkip {
    /// Connect every cell (tori, tubes).
    None,
    /// Skip the collapsed triangles on the first and last stack.
    Ends,
}

/// Number of indices [`MeshBuffers::push_grid_indices`] emits.
pub fn grid_index_count(stacks: u32, sectors: u32, poles: PoleSkip) -> u32 {
    let triangles = match poles {
        PoleSkip::None => 2 * stacks * sectors,
        // A single stack is both the first and the last, so both halves drop.
        PoleSkip::Ends if stacks < 2 => 0,
        PoleSkip::Ends => 2 * (stacks - 2) * sectors + 2 * sectors,
    };
    triangles * 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_five_packed_floats() {
        assert_eq!(std::mem::size_of::<Vertex>(), 5 * std::mem::size_of::<f32>());
        let v = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec2::new(0.25, 0.75));
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.25, 0.75]);
    }

    #[test]
    fn grid_indices_are_offset_by_base() {
        let mut buffers = MeshBuffers::new();
        buffers.push_grid_indices(100, 1, 1, PoleSkip::None);
        assert_eq!(buffers.indices, vec![100, 102, 101, 101, 102, 103]);
    }

    #[test]
    fn pole_skip_count_matches_emitted() {
        for (stacks, sectors) in [(1, 4), (2, 3), (5, 8), (100, 100)] {
            let mut buffers = MeshBuffers::new();
            buffers.push_grid_indices(0, stacks, sectors, PoleSkip::Ends);
            assert_eq!(
                buffers.indices.len() as u32,
                grid_index_count(stacks, sectors, PoleSkip::Ends)
            );
        }
    }

    #[test]
    fn grid_tex_coords_span_unit_square() {
        let mut buffers = MeshBuffers::new();
        buffers.push_grid_vertices(2, 4, |_, _| Vec3::ZERO);
        assert_eq!(buffers.vertices.len(), 15);
        assert_eq!(buffers.vertices[0].tex_coords, [0.0, 0.0]);
        assert_eq!(buffers.vertices[4].tex_coords, [1.0, 0.0]);
        assert_eq!(buffers.vertices[14].tex_coords, [1.0, 1.0]);
    }

    #[test]
    fn appended_since_reports_growth() {
        let mut buffers = MeshBuffers::new();
        buffers.push_vertex(Vec3::ZERO, Vec2::ZERO);
        let before = buffers.counts();
        buffers.push_vertex(Vec3::X, Vec2::X);
        buffers.push_vertex(Vec3::Y, Vec2::Y);
        buffers.push_triangle(0, 1, 2);
        assert_eq!(
            buffers.appended_since(before),
            Some(Appended { vertices: 2, indices: 3 })
        );
    }

    #[test]
    fn appended_since_is_none_after_truncation() {
        let mut buffers = MeshBuffers::new();
        buffers.push_vertex(Vec3::ZERO, Vec2::ZERO);
        buffers.push_vertex(Vec3::X, Vec2::X);
        let before = buffers.counts();
        buffers.vertices.truncate(1);
        assert_eq!(buffers.appended_since(before), None);
    }
}
