//! Part-to-texture grouping.

use std::collections::HashMap;
use std::ops::Range;

use procgen::{PartName, PrimitivePart};

use crate::error::RenderError;
use crate::texture::Texture;

/// Texture groups. Every part draws with exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Glass,
    Tabletop,
    Wood,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::Glass, Material::Tabletop, Material::Wood];
}

/// The single place parts are assigned to texture groups.
pub fn material_for(part: PartName) -> Material {
    match part {
        PartName::Hemisphere | PartName::Torus => Material::Glass,
        PartName::Plane => Material::Tabletop,
        PartName::OuterCylinder
        | PartName::FirstHandle
        | PartName::SecondHandle
        | PartName::OuterTopCap
        | PartName::OuterBottomCap
        | PartName::InnerTopCap
        | PartName::InnerBottomCap
        | PartName::FirstEgg
        | PartName::SecondEgg => Material::Wood,
    }
}

/// One indexed draw, with `bind` set when the texture must change first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCommand {
    pub part: PartName,
    pub material: Material,
    pub bind: bool,
    pub indices: Range<u32>,
}

/// Draw list for `parts` in order, rebinding only when the material changes.
pub fn plan_draws(parts: &[PrimitivePart]) -> Vec<DrawCommand> {
    let mut bound = None;
    parts
        .iter()
        .map(|part| {
            let material = material_for(part.name);
            let bind = bound != Some(material);
            bound = Some(material);
            DrawCommand {
                part: part.name,
                material,
                bind,
                indices: part.index_range(),
            }
        })
        .collect()
}

/// Fail if any part's material has no texture.
pub fn ensure_covered(
    parts: &[PrimitivePart],
    available: impl Fn(Material) -> bool,
) -> Result<(), RenderError> {
    match parts
        .iter()
        .map(|p| material_for(p.name))
        .find(|&m| !available(m))
    {
        Some(missing) => Err(RenderError::MissingMaterial(missing)),
        None => Ok(()),
    }
}

/// Texture bind groups keyed by material.
pub struct MaterialTextures {
    bind_groups: HashMap<Material, wgpu::BindGroup>,
}

impl MaterialTextures {
    /// Build bind groups for the given textures and check that every part is
    /// covered.
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        textures: &[(Material, Texture)],
        parts: &[PrimitivePart],
    ) -> Result<Self, RenderError> {
        let bind_groups: HashMap<Material, wgpu::BindGroup> = textures
            .iter()
            .map(|(material, texture)| {
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Material Bind Group"),
                    layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(&texture.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&texture.sampler),
                        },
                    ],
                });
                (*material, bind_group)
            })
            .collect();

        ensure_covered(parts, |m| bind_groups.contains_key(&m))?;
        Ok(Self { bind_groups })
    }

    pub fn get(&self, material: Material) -> Result<&wgpu::BindGroup, RenderError> {
        self.bind_groups
            .get(&material)
            .ok_or(RenderError::MissingMaterial(material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procgen::SceneLayout;

    fn scene_parts() -> Vec<PrimitivePart> {
        SceneLayout::default().build().expect("valid scene").parts
    }

    #[test]
    fn groups_match_scene_textures() {
        assert_eq!(material_for(PartName::Hemisphere), Material::Glass);
        assert_eq!(material_for(PartName::Torus), Material::Glass);
        assert_eq!(material_for(PartName::Plane), Material::Tabletop);
        for part in &PartName::ALL[3..] {
            assert_eq!(material_for(*part), Material::Wood, "{}", part);
        }
    }

    #[test]
    fn scene_binds_three_times() {
        let draws = plan_draws(&scene_parts());
        assert_eq!(draws.len(), PartName::ALL.len());
        let binds: Vec<Material> = draws.iter().filter(|d| d.bind).map(|d| d.material).collect();
        assert_eq!(binds, Material::ALL.to_vec());
        assert!(draws[0].bind && !draws[1].bind && draws[2].bind && draws[3].bind);
    }

    #[test]
    fn draws_use_part_ranges_back_to_back() {
        let parts = scene_parts();
        let draws = plan_draws(&parts);
        for pair in draws.windows(2) {
            assert_eq!(pair[0].indices.end, pair[1].indices.start);
        }
        assert_eq!(draws[0].indices.start, 0);
    }

    #[test]
    fn missing_wood_is_reported() {
        let parts = scene_parts();
        let result = ensure_covered(&parts, |m| m != Material::Wood);
        assert!(matches!(result, Err(RenderError::MissingMaterial(Material::Wood))));
        assert!(ensure_covered(&parts, |_| true).is_ok());
    }
}
