//! Window and device event handling.

use input::{ElementState, KeyCode};
use renderer::RenderError;
use winit::event::{DeviceEvent, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::state::AppContext;

impl AppContext {
    /// Handle a window event. Returns true when the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);
                    if key == KeyCode::Escape && event.state == ElementState::Pressed {
                        log::info!("Escape pressed, closing");
                    }
                }
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(button, state);
                if state.is_pressed() && !self.input.is_cursor_locked() {
                    self.lock_cursor();
                }
                false
            }
            WindowEvent::Focused(false) => {
                let _ = self
                    .renderer
                    .window
                    .set_cursor_grab(winit::window::CursorGrabMode::None);
                self.renderer.window.set_cursor_visible(true);
                self.input.set_cursor_locked(false);
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.input.process_scroll(delta);
                false
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if !self.running {
                    return true;
                }
                match self.render() {
                    Ok(()) => {}
                    Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                        log::error!("GPU out of memory, exiting");
                        self.running = false;
                        return true;
                    }
                    Err(e) => log::error!("Render error: {}", e),
                }
                self.renderer.window.request_redraw();
                false
            }
            _ => false,
        }
    }

    /// Handle device events (raw mouse motion).
    pub(crate) fn handle_device_event(&mut self, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.input.is_cursor_locked() {
                self.input.process_mouse_motion(delta);
            }
        }
    }
}
