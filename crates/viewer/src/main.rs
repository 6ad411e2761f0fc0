//! Still Life - a procedurally built glass bowl, rolling pin and eggs on a tabletop.

mod config;
mod events;
mod state;

use std::sync::Arc;

use anyhow::Result;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use config::AppConfig;
use state::AppContext;

#[derive(Default)]
struct App {
    state: Option<AppContext>,
    /// Startup failure, handed back to `main` once the loop has exited.
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new() -> Self {
        Self::default()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.init_error.is_some() {
            return;
        }

        let config = AppConfig::load();
        let window_attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window_width,
                config.window_height,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                self.init_error = Some(e.into());
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(AppContext::new(window.clone(), &config)) {
            Ok(s) => {
                self.state = Some(s);
                window.request_redraw();
            }
            Err(e) => {
                log::error!("Failed to initialize viewer: {:#}", e);
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════╗");
    println!("║                  Still Life                  ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                   ║");
    println!("║    WASD   - Move        │  Mouse  - Look     ║");
    println!("║    Q / E  - Up / Down   │  Scroll - Speed    ║");
    println!("║    P      - Perspective / orthographic       ║");
    println!("║    Click  - Capture cursor                   ║");
    println!("║    Escape - Quit                             ║");
    println!("╚══════════════════════════════════════════════╝");

    log::info!("Starting Still Life");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
