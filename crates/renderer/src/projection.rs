//! Perspective / orthographic projection switching.

use glam::Mat4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

impl ProjectionMode {
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        }
    }
}

/// Projection settings. Only `mode` changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub mode: ProjectionMode,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Orthographic view box spans `[-extent, extent]` on both axes.
    pub ortho_half_extent: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::Perspective,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            ortho_half_extent: 10.0,
        }
    }
}

impl Projection {
    /// Projection matrix for a viewport with the given width / height ratio.
    ///
    /// The orthographic box is fixed and ignores the aspect ratio.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        match self.mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let e = self.ortho_half_extent;
                Mat4::orthographic_rh(-e, e, -e, e, self.near, self.far)
            }
        }
    }

    pub fn toggle(&mut self) {
        self.mode = self.mode.toggled();
        log::debug!("Projection switched to {:?}", self.mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn toggle_flips_mode_only() {
        let mut projection = Projection::default();
        let before = projection;
        projection.toggle();
        assert_eq!(projection.mode, ProjectionMode::Orthographic);
        assert_eq!(
            Projection {
                mode: before.mode,
                ..projection
            },
            before
        );
        projection.toggle();
        assert_eq!(projection, before);
    }

    #[test]
    fn perspective_uses_field_of_view_and_planes() {
        let projection = Projection::default();
        let m = projection.matrix(4.0 / 3.0);
        assert_eq!(m, Mat4::perspective_rh(45f32.to_radians(), 4.0 / 3.0, 0.1, 100.0));
        // Perspective divides by depth: w grows with distance.
        assert!((m * Vec4::new(0.0, 0.0, -5.0, 1.0)).w > 4.9);
    }

    #[test]
    fn orthographic_box_is_fixed() {
        let projection = Projection {
            mode: ProjectionMode::Orthographic,
            ..Projection::default()
        };
        let wide = projection.matrix(3.0);
        assert_eq!(wide, projection.matrix(0.5));
        assert_eq!(wide, Mat4::orthographic_rh(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0));
        let corner = wide.project_point3(Vec3::new(10.0, -10.0, -1.0));
        assert!((corner.x - 1.0).abs() < 1e-6 && (corner.y + 1.0).abs() < 1e-6);
    }
}
