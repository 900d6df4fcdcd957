pub mod clock;
pub mod engine;
pub mod gpu_context;
pub mod input_adapter;
pub mod post;
pub mod render_target;
pub mod ripple;
pub mod surface_renderer;
pub mod texture;
pub mod transition;

pub use clock::Clock;
pub use engine::{EngineOptions, HeroEngine, RENDER_TARGET_SIZE};
pub use gpu_context::GpuContext;
pub use input_adapter::{InputAdapter, InputEvent};
pub use render_target::RenderTarget;
pub use ripple::RippleEngine;
pub use surface_renderer::SurfaceRenderer;
pub use transition::{Direction, Tile, TransitionEngine, TransitionEvent};
