//! The still-life scene: which parts exist, where they sit, and in what
//! order they are generated.

use std::f32::consts::FRAC_PI_2;
use std::fmt;

use engine_core::Transform;
use glam::{Quat, Vec3};

use crate::builder::{CompositeMesh, GenerationStep, MeshBuilder, MeshError};
use crate::surfaces::{
    cylinder_shell, disc, dome, ellipsoid, quad, torus, CapFacing, DiscParams, DomeParams,
    EllipsoidParams, QuadParams, ShellParams, TorusParams,
};

/// Logical drawable regions of the composite mesh, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartName {
    Hemisphere,
    Torus,
    Plane,
    OuterCylinder,
    FirstHandle,
    SecondHandle,
    OuterTopCap,
    OuterBottomCap,
    InnerTopCap,
    InnerBottomCap,
    FirstEgg,
    SecondEgg,
}

impl PartName {
    pub const ALL: [PartName; 12] = [
        PartName::Hemisphere,
        PartName::Torus,
        PartName::Plane,
        PartName::OuterCylinder,
        PartName::FirstHandle,
        PartName::SecondHandle,
        PartName::OuterTopCap,
        PartName::OuterBottomCap,
        PartName::InnerTopCap,
        PartName::InnerBottomCap,
        PartName::FirstEgg,
        PartName::SecondEgg,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PartName::Hemisphere => "hemisphere",
            PartName::Torus => "torus",
            PartName::Plane => "plane",
            PartName::OuterCylinder => "outer cylinder",
            PartName::FirstHandle => "first handle",
            PartName::SecondHandle => "second handle",
            PartName::OuterTopCap => "outer top cap",
            PartName::OuterBottomCap => "outer bottom cap",
            PartName::InnerTopCap => "inner top cap",
            PartName::InnerBottomCap => "inner bottom cap",
            PartName::FirstEgg => "first egg",
            PartName::SecondEgg => "second egg",
        }
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape parameters for every part of the scene.
///
/// The rolling pin is a wood body along Y with a thin tube poking out of each
/// end. Each tube is its own shell so the two handles draw as separate parts.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub dome: DomeParams,
    pub torus: TorusParams,
    pub plane: QuadParams,
    pub body: ShellParams,
    /// First handle above the body, second below it.
    pub handles: [ShellParams; 2],
    /// Top then bottom.
    pub outer_caps: [DiscParams; 2],
    /// Top then bottom.
    pub inner_caps: [DiscParams; 2],
    pub eggs: [EllipsoidParams; 2],
}

impl Default for SceneLayout {
    fn default() -> Self {
        let bowl_center = Vec3::new(1.1, -0.5, 0.0);
        let pin_axis = Vec3::new(2.0, 0.0, 0.8);

        let body = ShellParams {
            radius: 0.2,
            height: 2.0,
            stacks: 20,
            sectors: 20,
            center: pin_axis,
        };
        let handle_radius = 0.05;
        let handle_reach = 1.5;
        let handle_length = handle_reach - body.height / 2.0;
        let handle = |sign: f32| ShellParams {
            radius: handle_radius,
            height: handle_length,
            stacks: 20,
            sectors: 20,
            center: pin_axis + Vec3::Y * sign * (body.height / 2.0 + handle_length / 2.0),
        };
        let cap = |radius: f32, y: f32, facing: CapFacing| DiscParams {
            radius,
            sectors: 20,
            center: pin_axis + Vec3::Y * y,
            facing,
        };

        let egg_scale = Vec3::new(0.75, 1.2, 0.75);
        let egg = |placement: Transform| EllipsoidParams {
            radius: 0.2,
            stacks: 20,
            sectors: 20,
            placement: Transform {
                scale: egg_scale,
                ..placement
            },
        };

        Self {
            dome: DomeParams {
                radius: 1.0,
                stacks: 100,
                sectors: 100,
                center: bowl_center,
            },
            torus: TorusParams {
                major_radius: 1.0,
                minor_radius: 0.1,
                stacks: 20,
                sectors: 100,
                center: bowl_center,
            },
            plane: QuadParams {
                half_size: 5.0,
                z: 1.0,
            },
            body,
            handles: [handle(1.0), handle(-1.0)],
            outer_caps: [
                cap(body.radius, body.height / 2.0, CapFacing::Top),
                cap(body.radius, -body.height / 2.0, CapFacing::Bottom),
            ],
            inner_caps: [
                cap(handle_radius, handle_reach, CapFacing::Top),
                cap(handle_radius, -handle_reach, CapFacing::Bottom),
            ],
            eggs: [
                egg(Transform::from_position(Vec3::new(2.35, 0.5, 0.85))),
                egg(Transform::from_position_rotation(
                    Vec3::new(2.345, 0.12, 0.75),
                    Quat::from_rotation_x(FRAC_PI_2),
                )),
            ],
        }
    }
}

impl SceneLayout {
    /// Ordered generation steps, one per [`PartName`], in [`PartName::ALL`] order.
    pub fn steps(&self) -> Vec<GenerationStep> {
        let Self {
            dome: dome_params,
            torus: torus_params,
            plane,
            body,
            handles: [first_handle, second_handle],
            outer_caps: [outer_top, outer_bottom],
            inner_caps: [inner_top, inner_bottom],
            eggs: [first_egg, second_egg],
        } = self.clone();

        vec![
            GenerationStep::new(PartName::Hemisphere, move |b| dome(b, &dome_params)),
            GenerationStep::new(PartName::Torus, move |b| torus(b, &torus_params)),
            GenerationStep::new(PartName::Plane, move |b| quad(b, &plane)),
            GenerationStep::new(PartName::OuterCylinder, move |b| cylinder_shell(b, &body)),
            GenerationStep::new(PartName::FirstHandle, move |b| cylinder_shell(b, &first_handle)),
            GenerationStep::new(PartName::SecondHandle, move |b| {
                cylinder_shell(b, &second_handle)
            }),
            GenerationStep::new(PartName::OuterTopCap, move |b| disc(b, &outer_top)),
            GenerationStep::new(PartName::OuterBottomCap, move |b| disc(b, &outer_bottom)),
            GenerationStep::new(PartName::InnerTopCap, move |b| disc(b, &inner_top)),
            GenerationStep::new(PartName::InnerBottomCap, move |b| disc(b, &inner_bottom)),
            GenerationStep::new(PartName::FirstEgg, move |b| ellipsoid(b, &first_egg)),
            GenerationStep::new(PartName::SecondEgg, move |b| ellipsoid(b, &second_egg)),
        ]
    }

    /// Run every step and validate the result.
    pub fn build(&self) -> Result<CompositeMesh, MeshError> {
        MeshBuilder::from_steps(self.steps()).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_follow_part_order() {
        let steps = SceneLayout::default().steps();
        let names: Vec<PartName> = steps.iter().map(|s| s.part).collect();
        assert_eq!(names, PartName::ALL.to_vec());
    }

    #[test]
    fn handles_meet_body_and_caps() {
        let layout = SceneLayout::default();
        let body_top = layout.body.center.y + layout.body.height / 2.0;
        let [first, second] = layout.handles;
        assert!((first.center.y - first.height / 2.0 - body_top).abs() < 1e-6);
        assert!((first.center.y + first.height / 2.0 - 1.5).abs() < 1e-6);
        assert!((second.center.y - second.height / 2.0 + 1.5).abs() < 1e-6);
        assert_eq!(layout.inner_caps[0].center.y, 1.5);
        assert_eq!(layout.inner_caps[1].center.y, -1.5);
        assert_eq!(layout.outer_caps[0].center.y, 1.0);
        assert_eq!(layout.outer_caps[1].facing, CapFacing::Bottom);
    }

    #[test]
    fn only_second_egg_is_rotated() {
        let [first, second] = SceneLayout::default().eggs;
        assert_eq!(first.placement.rotation, Quat::IDENTITY);
        assert_ne!(second.placement.rotation, Quat::IDENTITY);
        assert_eq!(first.placement.scale, second.placement.scale);
    }

    #[test]
    fn part_names_display_distinctly() {
        let mut names: Vec<String> = PartName::ALL.iter().map(|p| p.to_string()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), PartName::ALL.len());
    }
}
