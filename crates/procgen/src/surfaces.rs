//! Parametric surface generators.
//!
//! Each generator appends vertices and absolute indices to a [`MeshBuffers`]
//! and reports what it added. None of them look at anything already in the
//! buffers except [`MeshBuffers::base`], so they can run in any order.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use engine_core::Transform;
use glam::{Vec2, Vec3};

use crate::mesh::{Appended, MeshBuffers, PoleSkip};

/// Open hemisphere whose apex points along +Z from `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomeParams {
    pub radius: f32,
    pub stacks: u32,
    pub sectors: u32,
    pub center: Vec3,
}

/// Ring torus lying in the XY plane around `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusParams {
    /// Distance from the center to the middle of the tube.
    pub major_radius: f32,
    /// Radius of the tube itself.
    pub minor_radius: f32,
    /// Subdivisions around the major circle.
    pub stacks: u32,
    /// Subdivisions around the tube.
    pub sectors: u32,
    pub center: Vec3,
}

/// Open tube along the Y axis, centred on `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellParams {
    pub radius: f32,
    pub height: f32,
    /// Subdivisions along the height.
    pub stacks: u32,
    /// Subdivisions around the circumference.
    pub sectors: u32,
    pub center: Vec3,
}

/// Which end of a Y-aligned tube a disc closes.
///
/// Bottom caps emit each triangle in the reverse order of top caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapFacing {
    Top,
    Bottom,
}

/// Flat disc in the XZ plane, one center vertex plus a perimeter ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscParams {
    pub radius: f32,
    pub sectors: u32,
    pub center: Vec3,
    pub facing: CapFacing,
}

/// Sphere of `radius` stretched per axis by `placement.scale`, then rotated
/// and translated by the rest of `placement`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipsoidParams {
    pub radius: f32,
    pub stacks: u32,
    pub sectors: u32,
    pub placement: Transform,
}

/// Axis-aligned square at height `z`, spanning `[-half_size, half_size]` in X and Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadParams {
    pub half_size: f32,
    pub z: f32,
}

/// Hemisphere: stack angle runs over `[0, π/2]` from the rim ring to the apex.
pub fn dome(buffers: &mut MeshBuffers, params: &DomeParams) -> Appended {
    debug_assert!(params.stacks >= 1 && params.sectors >= 1);
    let before = buffers.counts();
    let base = buffers.base();
    let DomeParams { radius, stacks, sectors, center } = *params;

    buffers.push_grid_vertices(stacks, sectors, |i, j| {
        let stack_angle = FRAC_PI_2 * i as f32 / stacks as f32;
        let sector_angle = TAU * j as f32 / sectors as f32;
        let ring = radius * stack_angle.cos();
        center
            + Vec3::new(
                ring * sector_angle.cos(),
                ring * sector_angle.sin(),
                radius * stack_angle.sin(),
            )
    });
    buffers.push_grid_indices(base, stacks, sectors, PoleSkip::Ends);

    buffers.grown_since(before)
}

/// Closed torus: both angles cover the full turn, so every cell is connected.
pub fn torus(buffers: &mut MeshBuffers, params: &TorusParams) -> Appended {
    debug_assert!(params.stacks >= 1 && params.sectors >= 1);
    let before = buffers.counts();
    let base = buffers.base();
    let TorusParams { major_radius, minor_radius, stacks, sectors, center } = *params;

    buffers.push_grid_vertices(stacks, sectors, |i, j| {
        let stack_angle = TAU * i as f32 / stacks as f32;
        let sector_angle = TAU * j as f32 / sectors as f32;
        let ring = major_radius + minor_radius * sector_angle.cos();
        center
            + Vec3::new(
                ring * stack_angle.cos(),
                ring * stack_angle.sin(),
                minor_radius * sector_angle.sin(),
            )
    });
    buffers.push_grid_indices(base, stacks, sectors, PoleSkip::None);

    buffers.grown_since(before)
}

/// Open cylindrical wall; the ends are left for [`disc`] to close.
pub fn cylinder_shell(buffers: &mut MeshBuffers, params: &ShellParams) -> Appended {
    debug_assert!(params.stacks >= 1 && params.sectors >= 1);
    let before = buffers.counts();
    let base = buffers.base();
    let ShellParams { radius, height, stacks, sectors, center } = *params;

    buffers.push_grid_vertices(stacks, sectors, |i, j| {
        let y = i as f32 / stacks as f32 * height - height / 2.0;
        let sector_angle = TAU * j as f32 / sectors as f32;
        center + Vec3::new(radius * sector_angle.cos(), y, radius * sector_angle.sin())
    });
    buffers.push_grid_indices(base, stacks, sectors, PoleSkip::None);

    buffers.grown_since(before)
}

/// Disc cap: a fan of `sectors` triangles around the center vertex.
///
/// The ring starts at angle `2π / sectors` and ends at `2π`, and texture
/// coordinates map the unit disc onto `[0, 1]²`.
pub fn disc(buffers: &mut MeshBuffers, params: &DiscParams) -> Appended {
    debug_assert!(params.sectors >= 3);
    let before = buffers.counts();
    let DiscParams { radius, sectors, center, facing } = *params;
    let hub = buffers.base();

    buffers.push_vertex(center, Vec2::splat(0.5));
    for j in 1..=sectors {
        let angle = TAU * j as f32 / sectors as f32;
        let (sin, cos) = angle.sin_cos();
        buffers.push_vertex(
            center + Vec3::new(radius * cos, 0.0, radius * sin),
            Vec2::new((cos + 1.0) * 0.5, (sin + 1.0) * 0.5),
        );
    }

    for j in 1..=sectors {
        let current = hub + j;
        // The last spoke wraps back to the first ring vertex.
        let next = if j == sectors { hub + 1 } else { current + 1 };
        match facing {
            CapFacing::Top => buffers.push_triangle(hub, current, next),
            CapFacing::Bottom => buffers.push_triangle(hub, next, current),
        }
    }

    buffers.grown_since(before)
}

/// Egg-shaped ellipsoid: stack angle covers the full `[0, π]` latitude.
///
/// Both stack ends collapse to a single point, so they use the same pole
/// skipping as [`dome`].
pub fn ellipsoid(buffers: &mut MeshBuffers, params: &EllipsoidParams) -> Appended {
    debug_assert!(params.stacks >= 1 && params.sectors >= 1);
    let before = buffers.counts();
    let base = buffers.base();
    let EllipsoidParams { radius, stacks, sectors, placement } = *params;

    buffers.push_grid_vertices(stacks, sectors, |i, j| {
        let stack_angle = PI * i as f32 / stacks as f32;
        let sector_angle = TAU * j as f32 / sectors as f32;
        let local = Vec3::new(
            radius * sector_angle.cos() * stack_angle.sin(),
            radius * stack_angle.cos(),
            radius * sector_angle.sin() * stack_angle.sin(),
        );
        placement.transform_point(local)
    });
    buffers.push_grid_indices(base, stacks, sectors, PoleSkip::Ends);

    buffers.grown_since(before)
}

/// Two-triangle square, counter-clockwise seen from +Z.
pub fn quad(buffers: &mut MeshBuffers, params: &QuadParams) -> Appended {
    let before = buffers.counts();
    let base = buffers.base();
    let QuadParams { half_size: s, z } = *params;

    buffers.push_vertex(Vec3::new(-s, -s, z), Vec2::new(0.0, 0.0));
    buffers.push_vertex(Vec3::new(s, -s, z), Vec2::new(1.0, 0.0));
    buffers.push_vertex(Vec3::new(s, s, z), Vec2::new(1.0, 1.0));
    buffers.push_vertex(Vec3::new(-s, s, z), Vec2::new(0.0, 1.0));
    buffers.push_triangle(base, base + 1, base + 2);
    buffers.push_triangle(base, base + 2, base + 3);

    buffers.grown_since(before)
}
