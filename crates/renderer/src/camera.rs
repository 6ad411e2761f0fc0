//! Free-fly camera for inspecting the scene.

use engine_core::Transform;
use glam::{Mat4, Quat, Vec2, Vec3};

const MIN_SPEED: f32 = 0.1;
const MAX_SPEED: f32 = 20.0;
/// Speed change per scroll-wheel line.
const SCROLL_SPEED_STEP: f32 = 0.25;

/// Fly camera driven by yaw/pitch mouse look. Projection lives in
/// [`crate::Projection`].
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera transform (position and rotation).
    pub transform: Transform,
    /// Radians of rotation per pixel of mouse motion.
    pub sensitivity: f32,
    /// Movement speed in units per second.
    pub speed: f32,
    pitch: f32,
    yaw: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::from_position(Vec3::new(0.0, 0.0, 3.0)),
            sensitivity: 0.002,
            speed: 2.5,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl Camera {
    /// Process mouse movement for look controls.
    pub fn process_mouse(&mut self, delta_x: f32, delta_y: f32) {
        self.set_yaw_pitch(
            self.yaw - delta_x * self.sensitivity,
            self.pitch - delta_y * self.sensitivity,
        );
    }

    /// Noclip free-fly: move in camera space (forward/right/up).
    /// - move_xy: x = strafe, y = forward/back
    /// - move_y: vertical
    pub fn process_fly(&mut self, move_xy: Vec2, move_y: f32, dt: f32) {
        let forward = self.transform.forward();
        let right = self.transform.right();
        let up = self.transform.up();

        let mut velocity = Vec3::ZERO;
        velocity += forward * move_xy.y;
        velocity += right * move_xy.x;
        velocity += up * move_y;

        if velocity.length_squared() > 0.0 {
            velocity = velocity.normalize() * self.speed * dt;
            self.transform.translate(velocity);
        }
    }

    /// Scroll up to fly faster, down to slow down.
    pub fn adjust_speed(&mut self, scroll_lines: f32) {
        self.speed = (self.speed + scroll_lines * SCROLL_SPEED_STEP).clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.transform.position;
        let target = eye + self.transform.forward();
        Mat4::look_at_rh(eye, target, Vec3::Y)
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set yaw and pitch directly (in radians) and rebuild rotation.
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        // Clamp pitch to prevent flipping over the pole.
        let max_pitch = std::f32::consts::FRAC_PI_2 - 0.01;
        self.yaw = yaw;
        self.pitch = pitch.clamp(-max_pitch, max_pitch);
        self.transform.rotation = Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_behind_scene_looking_down_negative_z() {
        let camera = Camera::default();
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 3.0));
        assert!(camera.forward().abs_diff_eq(-Vec3::Z, 1e-6));
        let origin_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(origin_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), 1e-5));
    }

    #[test]
    fn fly_forward_moves_at_speed() {
        let mut camera = Camera::default();
        camera.process_fly(Vec2::new(0.0, 1.0), 0.0, 0.5);
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 1.75), 1e-5));
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let mut camera = Camera::default();
        camera.process_fly(Vec2::new(1.0, 1.0), 1.0, 1.0);
        let moved = camera.position() - Vec3::new(0.0, 0.0, 3.0);
        assert!((moved.length() - camera.speed).abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.process_mouse(0.0, -100_000.0);
        assert!(camera.pitch() < std::f32::consts::FRAC_PI_2);
        assert!(camera.forward().y > 0.99);
    }

    #[test]
    fn scroll_adjusts_speed_within_bounds() {
        let mut camera = Camera::default();
        camera.adjust_speed(2.0);
        assert!((camera.speed - 3.0).abs() < 1e-6);
        camera.adjust_speed(-1000.0);
        assert_eq!(camera.speed, MIN_SPEED);
        camera.adjust_speed(1000.0);
        assert_eq!(camera.speed, MAX_SPEED);
    }
}
