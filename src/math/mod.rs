pub mod color;
pub mod ease;
pub mod projection;
pub mod spring;

pub use color::Color;
pub use ease::{ease_in_out_cubic, low_pass};
pub use projection::{grid_extent, pick_tile, tile_center, CoverFrustum};
pub use spring::Spring2;
