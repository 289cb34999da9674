use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use glam::{Vec2, Vec3};
use log::info;
use pollster::block_on;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use tinge::render::{decode_rgba, describe, Texture};
use tinge::{Renderer, Sprite2d};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;

    if options.describe {
        print!("{}", describe());
        if let Some(path) = &options.image {
            let bytes =
                std::fs::read(path).with_context(|| format!("failed to read {path}"))?;
            let image =
                decode_rgba(&bytes).with_context(|| format!("failed to decode {path}"))?;
            println!("texture: {}x{}", image.width(), image.height());
        }
        return Ok(());
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = DemoApp::new(options.image);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")?;

    if let Some(err) = app.last_error.take() {
        return Err(err);
    }
    Ok(())
}

struct CliOptions {
    image: Option<String>,
    describe: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut image = None;
        let mut describe = false;
        for arg in env::args().skip(1) {
            match arg.as_str() {
                "--describe" => describe = true,
                other if other.starts_with('-') => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Usage: tinge [image.png] [--describe]"
                    ));
                }
                path => {
                    if image.replace(path.to_string()).is_some() {
                        return Err(anyhow!(
                            "Only one image path is accepted. Usage: tinge [image.png] [--describe]"
                        ));
                    }
                }
            }
        }
        Ok(Self { image, describe })
    }
}

struct DemoApp {
    image: Option<String>,
    state: Option<DemoState>,
    last_error: Option<anyhow::Error>,
}

struct DemoState {
    renderer: Renderer,
    sprites: Vec<Sprite2d>,
}

impl DemoApp {
    fn new(image: Option<String>) -> Self {
        Self {
            image,
            state: None,
            last_error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(env!("CARGO_PKG_NAME"))
            .with_inner_size(LogicalSize::new(1280.0, 720.0));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let renderer = block_on(Renderer::new(window))?;

        let image = match &self.image {
            Some(path) => {
                let bytes =
                    std::fs::read(path).with_context(|| format!("failed to read {path}"))?;
                Some(decode_rgba(&bytes).with_context(|| format!("failed to decode {path}"))?)
            }
            None => None,
        };
        let size = image
            .as_ref()
            .map(|img| Vec2::new(img.width() as f32, img.height() as f32))
            .unwrap_or(Vec2::splat(256.0));

        // Three overlapping sprites: untinted, warm, cold.
        let tints = [
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 0.35, 0.35),
            Vec3::new(0.4, 0.6, 1.0),
        ];
        let mut sprites = Vec::new();
        for (index, tint) in tints.into_iter().enumerate() {
            let texture = match &image {
                Some(img) => {
                    Texture::from_image(renderer.device(), renderer.queue(), img, "sprite")
                }
                None => Texture::checkerboard(renderer.device(), renderer.queue(), 256, 32),
            };
            let offset = index as f32 * 120.0;
            sprites.push(Sprite2d::new(
                &renderer,
                texture,
                Vec2::new(40.0 + offset, 40.0 + offset),
                size,
                tint,
            ));
        }

        info!("demo initialized with {} sprites", sprites.len());
        self.state = Some(DemoState { renderer, sprites });
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.last_error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(state) = &self.state {
            state.renderer.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        if window_id != state.renderer.window_id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                state.renderer.resize(new_size);
            }
            WindowEvent::RedrawRequested => {
                let mut fatal = None;
                if let Err(err) = state.renderer.render(&state.sprites) {
                    match err {
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                            let size = state.renderer.window().inner_size();
                            state.renderer.resize(size);
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            fatal = Some(anyhow!("GPU is out of memory"));
                        }
                        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => {
                            info!("surface error {err:?}; retrying next frame");
                        }
                    }
                }
                if let Some(err) = fatal {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }
}
