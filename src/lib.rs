pub mod cli;
pub mod core;
pub mod error;
pub mod math;
pub mod scenes;
pub mod traits;
pub mod types;

pub use core::{EngineOptions, HeroEngine, InputAdapter, InputEvent};
pub use error::EngineError;
pub use types::{SceneKind, SlideDeck, SlideSource, SlideSpec, TiltShiftSettings};
