use crate::core::render_target::RenderTarget;

/// Direction of a snap-back fling, each component in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapBack {
    pub dir_x: f32,
    pub dir_y: f32,
}

/// Animatable content source abstraction
///
/// Every slide scene and overlay layer implements this. The orchestrator only
/// ever talks to this contract; internal geometry and state stay private.
pub trait Scene {
    /// Advance internal animation state. Safe to call every frame.
    fn update(&mut self, dt: f32);

    /// Draw the current state into the target buffer
    fn render(&mut self, target: &mut RenderTarget);

    /// Release owned resources. Called exactly once; the scene is unusable after.
    fn dispose(&mut self) {}

    /// Recompute viewport-dependent layout (optional)
    fn resize(&mut self, _width: u32, _height: u32, _aspect: f32) {}

    /// Smooth palette interpolation hook, t in [0, 1] (optional)
    fn set_color_scheme(&mut self, _t: f32) {}

    /// Pointer position in normalized device coordinates ([-1, 1], +y up)
    fn pointer_moved(&mut self, _x: f32, _y: f32) {}

    /// Pointer press at normalized device coordinates
    fn pointer_pressed(&mut self, _x: f32, _y: f32) {}

    /// Pointer release; a scene may report a snap-back fling
    fn pointer_released(&mut self) -> Option<SnapBack> {
        None
    }

    /// Scroll-driven materialize/dissolve progress, 0 = fully present
    fn set_scroll_progress(&mut self, _progress: f32) {}

    /// Scene name for debugging
    fn name(&self) -> &str {
        "Scene"
    }
}
