//! Application context: everything the event loop drives, built once at startup.

use std::sync::Arc;

use anyhow::{Context, Result};
use engine_core::Time;
use glam::Mat4;
use input::InputState;
use procgen::SceneLayout;
use renderer::{
    default_model_matrix, Camera, DecodedImage, Projection, RenderError, Renderer, SceneLights,
    SceneUniform,
};
use winit::window::{CursorGrabMode, Window};

use crate::config::AppConfig;

/// Longest frame step fed to the camera.
const MAX_FRAME_DELTA: f32 = 0.05;

pub struct AppContext {
    pub renderer: Renderer,
    pub camera: Camera,
    pub input: InputState,
    pub time: Time,
    pub projection: Projection,
    pub lights: SceneLights,
    pub model: Mat4,
    /// Cleared when the user asks to quit.
    pub running: bool,
}

impl AppContext {
    /// Build the mesh, decode textures and bring up the renderer.
    pub async fn new(window: Arc<Window>, config: &AppConfig) -> Result<Self> {
        let mesh = SceneLayout::default()
            .build()
            .context("generated scene mesh is inconsistent")?;

        let textures = config
            .textures
            .paths()
            .into_iter()
            .map(|(material, path)| {
                DecodedImage::load(path)
                    .map(|image| (material, image))
                    .with_context(|| format!("failed to load {:?} texture", material))
            })
            .collect::<Result<Vec<_>>>()?;

        let renderer = Renderer::new(window, mesh, &textures, config.vsync)
            .await
            .context("failed to initialise renderer")?;

        let mut camera = Camera::default();
        camera.sensitivity = config.sensitivity;
        camera.speed = config.move_speed;

        let mut context = Self {
            renderer,
            camera,
            input: InputState::new(),
            time: Time::new(),
            projection: config.projection(),
            lights: config.scene_lights(),
            model: default_model_matrix(),
            running: true,
        };
        context.lock_cursor();
        Ok(context)
    }

    pub fn lock_cursor(&mut self) {
        let window = &self.renderer.window;
        let _ = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        window.set_cursor_visible(false);
        self.input.set_cursor_locked(true);
    }

    /// Advance one frame of camera and projection state from the input gathered
    /// since the previous frame.
    pub fn update(&mut self) {
        self.time.update();
        let dt = self.time.delta_seconds().min(MAX_FRAME_DELTA);

        if let Some(fps) = self.time.take_report() {
            log::debug!("{:.1} fps", fps);
        }

        if self.input.is_quit_pressed() {
            self.running = false;
        }
        if self.input.is_projection_toggle_pressed() {
            self.projection.toggle();
        }
        for button in self.input.mouse_pressed() {
            log::debug!("{:?} mouse button pressed", button);
        }
        for button in self.input.mouse_released() {
            log::debug!("{:?} mouse button released", button);
        }

        let look = self.input.mouse_delta();
        // Screen y grows downward; moving the mouse up pitches up.
        self.camera.process_mouse(look.x, look.y);
        self.camera.adjust_speed(self.input.scroll_delta());
        self.camera.process_fly(
            self.input.get_movement_input(),
            self.input.get_vertical_input(),
            dt,
        );

        // Clear input for next frame
        self.input.begin_frame();
    }

    pub fn scene_uniform(&self) -> SceneUniform {
        SceneUniform::new(
            self.model,
            self.camera.view_matrix(),
            self.projection.matrix(self.renderer.aspect()),
            self.camera.position(),
            &self.lights,
        )
    }

    pub fn render(&mut self) -> Result<(), RenderError> {
        let uniform = self.scene_uniform();
        self.renderer.render(&uniform)
    }
}
