//! Scene lights and the per-frame uniform block.
//!
//! The CPU-side light types carry the same formulas the fragment shader uses,
//! so lighting behaviour can be checked without a GPU.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Fraction of the combined key and fill colour applied everywhere.
pub const AMBIENT_STRENGTH: f32 = 0.1;

/// Omnidirectional light contributing Lambert diffuse only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl PointLight {
    pub fn diffuse(&self, normal: Vec3, frag_pos: Vec3) -> Vec3 {
        let to_light = (self.position - frag_pos).normalize_or_zero();
        normal.dot(to_light).max(0.0) * self.color * self.intensity
    }
}

/// Cone light with a soft edge and distance falloff.
///
/// Cut-offs are stored as cosines of the half-angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spotlight {
    pub position: Vec3,
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub cut_off: f32,
    pub outer_cut_off: f32,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Spotlight {
    /// Build a spotlight from inner/outer half-angles in degrees, with the
    /// default attenuation terms.
    pub fn from_degrees(
        position: Vec3,
        direction: Vec3,
        color: Vec3,
        intensity: f32,
        inner_degrees: f32,
        outer_degrees: f32,
    ) -> Self {
        Self {
            position,
            direction,
            color,
            intensity,
            cut_off: inner_degrees.to_radians().cos(),
            outer_cut_off: outer_degrees.to_radians().cos(),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }

    /// 1 inside the inner cone, 0 outside the outer cone, linear in between.
    pub fn cone_factor(&self, frag_pos: Vec3) -> f32 {
        let to_light = (self.position - frag_pos).normalize_or_zero();
        let theta = to_light.dot(-self.direction.normalize_or_zero());
        let epsilon = self.cut_off - self.outer_cut_off;
        ((theta - self.outer_cut_off) / epsilon).clamp(0.0, 1.0)
    }

    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }

    /// Spot contribution. It does not depend on the surface normal.
    pub fn contribution(&self, frag_pos: Vec3) -> Vec3 {
        let distance = self.position.distance(frag_pos);
        self.attenuation(distance) * self.cone_factor(frag_pos) * self.color * self.intensity
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLights {
    pub key: PointLight,
    pub fill: PointLight,
    pub spot: Spotlight,
}

impl Default for SceneLights {
    fn default() -> Self {
        Self {
            key: PointLight {
                position: Vec3::new(10.0, 0.0, 0.0),
                color: Vec3::ONE,
                intensity: 1.0,
            },
            fill: PointLight {
                position: Vec3::new(-5.0, 10.0, 10.0),
                color: Vec3::ONE,
                intensity: 0.0,
            },
            spot: Spotlight::from_degrees(
                Vec3::new(1.0, 5.0, 6.0),
                Vec3::new(0.0, -1.0, -1.0),
                Vec3::new(0.5, 0.7, 1.0),
                1.0,
                12.5,
                15.0,
            ),
        }
    }
}

impl SceneLights {
    pub fn ambient(&self) -> Vec3 {
        AMBIENT_STRENGTH * (self.key.color + self.fill.color)
    }

    /// Light reaching a surface point, before multiplying by the texel colour.
    pub fn illuminate(&self, normal: Vec3, frag_pos: Vec3) -> Vec3 {
        self.ambient()
            + self.key.diffuse(normal, frag_pos)
            + self.fill.diffuse(normal, frag_pos)
            + self.spot.contribution(frag_pos)
    }
}

/// Point light uniform (must match scene.wgsl PointLight).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

impl From<&PointLight> for PointLightUniform {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.into(),
            intensity: light.intensity,
            color: light.color.into(),
            _pad: 0.0,
        }
    }
}

/// Spotlight uniform (must match scene.wgsl Spotlight).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SpotlightUniform {
    pub position: [f32; 3],
    pub intensity: f32,
    pub direction: [f32; 3],
    pub cut_off: f32,
    pub color: [f32; 3],
    pub outer_cut_off: f32,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub _pad: f32,
}

impl From<&Spotlight> for SpotlightUniform {
    fn from(spot: &Spotlight) -> Self {
        Self {
            position: spot.position.into(),
            intensity: spot.intensity,
            direction: spot.direction.into(),
            cut_off: spot.cut_off,
            color: spot.color.into(),
            outer_cut_off: spot.outer_cut_off,
            constant: spot.constant,
            linear: spot.linear,
            quadratic: spot.quadratic,
            _pad: 0.0,
        }
    }
}

/// Everything the shader reads, uploaded once per frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SceneUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// w unused, padding
    pub view_position: [f32; 4],
    pub key_light: PointLightUniform,
    pub fill_light: PointLightUniform,
    pub spotlight: SpotlightUniform,
}

impl SceneUniform {
    pub fn new(
        model: Mat4,
        view: Mat4,
        projection: Mat4,
        view_position: Vec3,
        lights: &SceneLights,
    ) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            view_position: view_position.extend(1.0).into(),
            key_light: (&lights.key).into(),
            fill_light: (&lights.fill).into(),
            spotlight: (&lights.spot).into(),
        }
    }
}

/// The whole scene is authored Z-up; this turns it upright.
pub fn default_model_matrix() -> Mat4 {
    Mat4::from_rotation_x(90f32.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_match_shader_layout() {
        assert_eq!(std::mem::size_of::<PointLightUniform>(), 32);
        assert_eq!(std::mem::size_of::<SpotlightUniform>(), 64);
        assert_eq!(std::mem::size_of::<SceneUniform>(), 336);
        assert_eq!(std::mem::size_of::<SceneUniform>() % 16, 0);
    }

    #[test]
    fn cone_is_full_inside_and_zero_outside() {
        let spot = SceneLights::default().spot;
        // Straight down the axis.
        let on_axis = spot.position + spot.direction.normalize() * 3.0;
        assert_eq!(spot.cone_factor(on_axis), 1.0);
        // Far off to the side.
        let outside = spot.position + Vec3::new(5.0, -1.0, 0.0);
        assert_eq!(spot.cone_factor(outside), 0.0);
    }

    #[test]
    fn cone_edge_is_linear_between_cutoffs() {
        let spot = Spotlight::from_degrees(Vec3::ZERO, -Vec3::Z, Vec3::ONE, 1.0, 10.0, 20.0);
        let angle = 15f32.to_radians();
        let frag = Vec3::new(angle.sin(), 0.0, -angle.cos()) * 2.0;
        let expected = (angle.cos() - spot.outer_cut_off) / (spot.cut_off - spot.outer_cut_off);
        assert!((spot.cone_factor(frag) - expected).abs() < 1e-5);
        assert!(expected > 0.0 && expected < 1.0);
    }

    #[test]
    fn attenuation_falls_off_quadratically() {
        let spot = SceneLights::default().spot;
        assert_eq!(spot.attenuation(0.0), 1.0);
        let at_ten = 1.0 / (1.0 + 0.9 + 3.2);
        assert!((spot.attenuation(10.0) - at_ten).abs() < 1e-6);
    }

    #[test]
    fn ambient_uses_key_and_fill_colours() {
        let lights = SceneLights::default();
        assert!(lights.ambient().abs_diff_eq(Vec3::splat(0.2), 1e-6));
    }

    #[test]
    fn surface_facing_key_light_is_brightest() {
        let lights = SceneLights::default();
        let point = Vec3::new(5.0, -20.0, 0.0);
        let toward_key = (lights.key.position - point).normalize();
        let lit = lights.illuminate(toward_key, point);
        let unlit = lights.illuminate(-toward_key, point);
        assert!(lit.x > unlit.x + 0.9);
        // Fill is off by default.
        assert_eq!(lights.fill.diffuse(Vec3::Y, point), Vec3::ZERO);
    }

    #[test]
    fn model_matrix_stands_scene_up() {
        let m = default_model_matrix();
        assert!(m.transform_vector3(Vec3::Z).abs_diff_eq(-Vec3::Y, 1e-6));
    }
}
