use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use hero_grid::cli::Cli;
use hero_grid::core::{Clock, HeroEngine, InputAdapter, InputEvent, SurfaceRenderer};
use hero_grid::types::SlideDeck;
use hero_grid::EngineOptions;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

struct App {
    cli: Cli,
    engine: HeroEngine,
    input: InputAdapter,
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    clock: Clock,
    frame_count: u32,
    fps_update_timer: f32,
}

impl App {
    fn new(cli: Cli, engine: HeroEngine) -> Self {
        Self {
            cli,
            engine,
            input: InputAdapter::new(),
            window: None,
            renderer: None,
            clock: Clock::new(),
            frame_count: 0,
            fps_update_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_update_timer += delta;

        if self.fps_update_timer >= FPS_UPDATE_INTERVAL {
            info!(
                "fps: {:.1}",
                self.frame_count as f32 / self.fps_update_timer
            );
            self.frame_count = 0;
            self.fps_update_timer = 0.0;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Hero Grid")
                .with_inner_size(winit::dpi::LogicalSize::new(self.cli.width, self.cli.height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let renderer = match SurfaceRenderer::new(window.clone()) {
            Ok(r) => r,
            Err(e) => {
                error!("failed to initialize renderer: {e}");
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.dimensions();
        self.engine.resize(width, height);
        self.window = Some(window);
        self.renderer = Some(renderer);
        self.clock.reset();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.engine.dispose();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let delta = self.clock.tick();

                self.update_fps(delta);
                self.engine.advance(delta);

                if let Some(renderer) = &self.renderer {
                    if let Err(e) = renderer.render_frame(self.engine.frame()) {
                        error!("render error: {e}");
                    }
                }
            }
            other => {
                if let Some(input_event) = self.input.process_event(&other) {
                    if let InputEvent::Resized { width, height } = input_event {
                        if let Some(renderer) = &mut self.renderer {
                            renderer.resize(width, height);
                        }
                    }
                    self.engine.handle_event(input_event);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let deck = match &cli.slides {
        Some(path) => SlideDeck::load(path)?,
        None => SlideDeck::default_deck(),
    };

    let engine = HeroEngine::new(
        &deck,
        EngineOptions {
            grid_size: cli.grid_size,
            seed: cli.seed,
            ..EngineOptions::default()
        },
    )?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, engine);
    event_loop.run_app(&mut app)?;

    Ok(())
}
