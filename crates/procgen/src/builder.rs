//! Composite mesh assembly.
//!
//! A [`MeshBuilder`] runs an ordered list of [`GenerationStep`]s against one
//! shared [`MeshBuffers`] and records where each step's indices landed. Offsets
//! are taken from how much the buffers actually grew, never from constants.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

use crate::mesh::{Appended, MeshBuffers, Vertex};
use crate::scene::PartName;

/// Broken composite mesh invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("index {index} at position {position} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds {
        position: usize,
        index: u32,
        vertex_count: u32,
    },
    #[error("part `{part}` starts at index {found}, expected {expected}")]
    PartGap {
        part: PartName,
        expected: u32,
        found: u32,
    },
    #[error("parts cover {covered} of {total} indices")]
    PartsIncomplete { covered: u32, total: u32 },
}

/// A named contiguous slice of the shared index sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitivePart {
    pub name: PartName,
    pub index_offset: u32,
    pub index_count: u32,
    pub vertex_offset: u32,
    pub vertex_count: u32,
}

impl PrimitivePart {
    /// Index range for an indexed draw of this part alone.
    pub fn index_range(&self) -> Range<u32> {
        self.index_offset..self.index_offset + self.index_count
    }

    pub fn vertex_range(&self) -> Range<u32> {
        self.vertex_offset..self.vertex_offset + self.vertex_count
    }
}

/// Finished geometry: one vertex sequence, one index sequence, and the parts
/// that partition the indices in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub parts: Vec<PrimitivePart>,
}

impl CompositeMesh {
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn part(&self, name: PartName) -> Option<&PrimitivePart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Check that every index is in bounds and that the parts cover the index
    /// sequence back to back with no gap or overlap.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertex_count();
        if let Some((position, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index >= vertex_count)
        {
            return Err(MeshError::IndexOutOfBounds {
                position,
                index,
                vertex_count,
            });
        }

        let mut expected = 0;
        for part in &self.parts {
            if part.index_offset != expected {
                return Err(MeshError::PartGap {
                    part: part.name,
                    expected,
                    found: part.index_offset,
                });
            }
            expected += part.index_count;
        }

        let total = self.index_count();
        if expected != total {
            return Err(MeshError::PartsIncomplete {
                covered: expected,
                total,
            });
        }
        Ok(())
    }
}

/// One entry in the build order: a part name plus the generator that emits it.
///
/// The generator must only append to the buffers and return what it appended.
pub struct GenerationStep {
    pub part: PartName,
    generate: Box<dyn Fn(&mut MeshBuffers) -> Appended>,
}

impl GenerationStep {
    pub fn new(part: PartName, generate: impl Fn(&mut MeshBuffers) -> Appended + 'static) -> Self {
        Self {
            part,
            generate: Box::new(generate),
        }
    }
}

impl fmt::Debug for GenerationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationStep")
            .field("part", &self.part)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct MeshBuilder {
    steps: Vec<GenerationStep>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<GenerationStep>) -> Self {
        Self { steps }
    }

    pub fn push(&mut self, step: GenerationStep) -> &mut Self {
        self.steps.push(step);
        self
    }

    /// Run every step in order and validate the assembled mesh.
    pub fn build(self) -> Result<CompositeMesh, MeshError> {
        let mut buffers = MeshBuffers::new();
        let mut parts = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let before = buffers.counts();
            let reported = (step.generate)(&mut buffers);
            let grown = buffers.appended_since(before);

            debug_assert_eq!(
                Some(reported),
                grown,
                "generator for `{}` misreported what it appended",
                step.part
            );
            // A shrinking step leaves the part misaligned, and validate() reports it.
            let grown = grown.unwrap_or(reported);
            debug_assert!(
                buffers.indices[before.indices as usize..]
                    .iter()
                    .all(|&i| i >= before.vertices && i < buffers.base()),
                "generator for `{}` emitted an index outside its own vertices",
                step.part
            );

            log::debug!(
                "Generated {}: {} vertices, {} indices at offset {}",
                step.part,
                grown.vertices,
                grown.indices,
                before.indices
            );
            parts.push(PrimitivePart {
                name: step.part,
                index_offset: before.indices,
                index_count: grown.indices,
                vertex_offset: before.vertices,
                vertex_count: grown.vertices,
            });
        }

        let mesh = CompositeMesh {
            vertices: buffers.vertices,
            indices: buffers.indices,
            parts,
        };
        mesh.validate()?;

        log::info!(
            "Built composite mesh: {} vertices, {} indices, {} parts",
            mesh.vertex_count(),
            mesh.index_count(),
            mesh.parts.len()
        );
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneLayout;
    use glam::{Vec2, Vec3};

    fn full_scene() -> CompositeMesh {
        SceneLayout::default().build().expect("default scene is valid")
    }

    #[test]
    fn last_part_ends_at_index_count() {
        let mesh = full_scene();
        let last = mesh.parts.last().expect("scene has parts");
        assert_eq!(last.index_offset + last.index_count, mesh.index_count());
    }

    #[test]
    fn offsets_are_cumulative_counts() {
        let mesh = full_scene();
        let mut running = 0;
        let mut running_vertices = 0;
        for part in &mesh.parts {
            assert_eq!(part.index_offset, running, "{}", part.name);
            assert_eq!(part.vertex_offset, running_vertices, "{}", part.name);
            running += part.index_count;
            running_vertices += part.vertex_count;
        }
        assert_eq!(running_vertices, mesh.vertex_count());
    }

    #[test]
    fn every_index_is_in_bounds() {
        let mesh = full_scene();
        let count = mesh.vertex_count();
        assert!(mesh.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn parts_only_reference_their_own_vertices() {
        let mesh = full_scene();
        for part in &mesh.parts {
            let vertices = part.vertex_range();
            let slice = &mesh.indices[part.index_offset as usize..part.index_range().end as usize];
            assert!(slice.iter().all(|i| vertices.contains(i)), "{}", part.name);
        }
    }

    #[test]
    fn default_scene_part_sizes() {
        let mesh = full_scene();
        let expected = [
            (PartName::Hemisphere, 59_400),
            (PartName::Torus, 12_000),
            (PartName::Plane, 6),
            (PartName::OuterCylinder, 2_400),
            (PartName::FirstHandle, 2_400),
            (PartName::SecondHandle, 2_400),
            (PartName::OuterTopCap, 60),
            (PartName::OuterBottomCap, 60),
            (PartName::InnerTopCap, 60),
            (PartName::InnerBottomCap, 60),
            (PartName::FirstEgg, 2_280),
            (PartName::SecondEgg, 2_280),
        ];
        assert_eq!(mesh.parts.len(), expected.len());
        for (name, count) in expected {
            let part = mesh.part(name).expect("part exists");
            assert_eq!(part.index_count, count, "{}", name);
        }
    }

    #[test]
    fn rebuild_is_byte_identical() {
        let a = full_scene();
        let b = full_scene();
        assert_eq!(
            bytemuck::cast_slice::<Vertex, u8>(&a.vertices),
            bytemuck::cast_slice::<Vertex, u8>(&b.vertices)
        );
        assert_eq!(a.indices, b.indices);
        assert_eq!(a.parts, b.parts);
    }

    #[test]
    fn second_egg_lies_on_its_side() {
        let mesh = full_scene();
        let extent = |name: PartName, axis: usize| {
            let part = mesh.part(name).expect("egg exists");
            let values = mesh.vertices[part.vertex_offset as usize..part.vertex_range().end as usize]
                .iter()
                .map(|v| v.position[axis]);
            let (lo, hi) = values.fold((f32::MAX, f32::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
            hi - lo
        };
        // Long axis is Y for the upright egg and Z for the rotated one.
        assert!((extent(PartName::FirstEgg, 1) - 0.48).abs() < 1e-4);
        assert!((extent(PartName::SecondEgg, 2) - 0.48).abs() < 1e-4);
        assert!(extent(PartName::SecondEgg, 1) < 0.31);
    }

    #[test]
    fn builder_accumulates_custom_steps() {
        let mut builder = MeshBuilder::new();
        builder
            .push(GenerationStep::new(PartName::Plane, |b| {
                crate::surfaces::quad(b, &crate::surfaces::QuadParams { half_size: 1.0, z: 0.0 })
            }))
            .push(GenerationStep::new(PartName::Torus, |b| {
                let base = b.base();
                b.push_vertex(Vec3::ZERO, Vec2::ZERO);
                b.push_vertex(Vec3::X, Vec2::X);
                b.push_vertex(Vec3::Y, Vec2::Y);
                b.push_triangle(base, base + 1, base + 2);
                Appended { vertices: 3, indices: 3 }
            }));
        let mesh = builder.build().expect("valid");
        let second = mesh.part(PartName::Torus).expect("present");
        assert_eq!(second.index_offset, 6);
        assert_eq!(second.vertex_offset, 4);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "misreported what it appended")]
    fn truncating_step_trips_debug_check() {
        let mut builder = MeshBuilder::new();
        builder
            .push(GenerationStep::new(PartName::Plane, |b| {
                b.push_vertex(Vec3::ZERO, Vec2::ZERO);
                b.push_vertex(Vec3::X, Vec2::X);
                b.push_vertex(Vec3::Y, Vec2::Y);
                b.push_triangle(0, 1, 2);
                Appended { vertices: 3, indices: 3 }
            }))
            .push(GenerationStep::new(PartName::Torus, |b| {
                b.vertices.clear();
                b.indices.clear();
                Appended::default()
            }));
        let _ = builder.build();
    }

    #[test]
    fn validate_reports_out_of_bounds_index() {
        let mut mesh = full_scene();
        let count = mesh.vertex_count();
        mesh.indices[10] = count;
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IndexOutOfBounds {
                position: 10,
                index: count,
                vertex_count: count
            })
        );
    }

    #[test]
    fn validate_reports_gap_and_shortfall() {
        let mut mesh = full_scene();
        mesh.parts[1].index_offset += 3;
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::PartGap { part: PartName::Torus, .. })
        ));

        let mut mesh = full_scene();
        let total = mesh.index_count();
        let dropped = mesh.parts.pop().expect("non-empty").index_count;
        assert_eq!(
            mesh.validate(),
            Err(MeshError::PartsIncomplete {
                covered: total - dropped,
                total
            })
        );
    }
}
