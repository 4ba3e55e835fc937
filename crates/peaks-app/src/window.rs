//! Window creation and the frame loop via winit.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use peaks_config::Config;
use peaks_input::OrbitController;
use peaks_render::{RenderContext, SurfaceError, init_render_context_blocking};
use peaks_scene::{SceneParams, SceneRenderer};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use peaks_render::HeightImage;

/// Returns [`WindowAttributes`] based on the given configuration.
fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Application state: window, GPU context, scene, and input.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    scene: Option<SceneRenderer>,
    orbit: OrbitController,
    cursor_position: Vec2,
    last_frame: Instant,
    config: Config,
    image_a: HeightImage,
    image_b: Option<HeightImage>,
}

impl App {
    fn new(config: Config, image_a: HeightImage, image_b: Option<HeightImage>) -> Self {
        let orbit = OrbitController::new(config.input.mouse_sensitivity);
        Self {
            window: None,
            gpu: None,
            scene: None,
            orbit,
            cursor_position: Vec2::ZERO,
            last_frame: Instant::now(),
            config,
            image_a,
            image_b,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(gpu), Some(scene)) = (&self.gpu, &mut self.scene) else {
            return;
        };

        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;

        scene.advance(elapsed_ms);
        let camera = scene.camera_mut();
        camera.rotation_x = self.orbit.rotation_x();
        camera.rotation_y = self.orbit.rotation_y();

        match scene.render(gpu) {
            Ok(()) => {}
            Err(SurfaceError::Timeout) => {
                warn!("Surface timeout, skipping frame");
            }
            Err(e @ (SurfaceError::Lost | SurfaceError::OutOfMemory)) => {
                error!("Unrecoverable surface error: {e}");
                event_loop.exit();
                return;
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let gpu = match init_render_context_blocking(window.clone()) {
            Ok(gpu) => gpu,
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let params = SceneParams {
            lattice_size: self.config.render.lattice_size,
            height_scale: self.config.render.height_scale,
            camera_distance: self.config.render.camera_distance,
            fov_y_degrees: self.config.render.fov_y_degrees,
        };
        let scene = match SceneRenderer::new(
            &gpu.device,
            &gpu.queue,
            gpu.surface_format,
            size.width,
            size.height,
            params,
            &self.image_a,
            self.image_b.as_ref(),
        ) {
            Ok(scene) => scene,
            Err(e) => {
                error!("Scene setup failed: {e}");
                event_loop.exit();
                return;
            }
        };

        info!("Window and scene initialized ({}x{})", size.width, size.height);
        self.last_frame = Instant::now();
        self.gpu = Some(gpu);
        self.scene = Some(scene);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
                if let (Some(scene), Some(gpu)) = (&mut self.scene, &self.gpu) {
                    scene.resize(&gpu.device, new_size.width, new_size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = Vec2::new(position.x as f32, position.y as f32);
                self.orbit.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.orbit.on_button(button, state, self.cursor_position);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run the event loop until the window closes.
pub fn run(
    config: Config,
    image_a: HeightImage,
    image_b: Option<HeightImage>,
) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, image_a, image_b);
    event_loop.run_app(&mut app)
}
