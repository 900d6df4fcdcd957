use glam::Vec2;
use log::{debug, info};

use super::input_adapter::InputEvent;
use super::post::{ChromaticAberration, Glitch, TiltShift};
use super::render_target::RenderTarget;
use super::ripple::{RippleEngine, COLOR_INTENSITY};
use super::texture::load_slide_texture;
use super::transition::{Tile, TransitionEngine, TransitionEvent, CUBE_SIZE, GAP, GRID_SIZE};
use crate::error::EngineError;
use crate::math::{grid_extent, low_pass, pick_tile, tile_center, Color, CoverFrustum};
use crate::scenes::{create_scene, CodeRainScene, PixelTextScene};
use crate::traits::Scene;
use crate::types::{SlideDeck, SlideSource, TiltShiftSettings};

pub const RENDER_TARGET_SIZE: u32 = 1024;

const POINTER_SMOOTHING: f32 = 0.1;
const SCROLL_SMOOTHING: f32 = 0.1;

// Scroll zoom settings
const BACKGROUND_ZOOM_IN: f32 = 0.5; // background grows by up to 50% while scrolling

// Brief distortion burst fired on every slide commit
const GLITCH_BURST: f32 = 0.25;

const PLACEHOLDER_COLOR: u32 = 0x1a1a2e;
const POP_OUT_SCALE: f32 = 0.12; // extra tile scale per unit of z-offset

enum SlideContent {
    Texture(RenderTarget),
    Scene {
        scene: Box<dyn Scene>,
        target: RenderTarget,
    },
}

struct Slide {
    tilt_shift: TiltShiftSettings,
    content: SlideContent,
}

impl Slide {
    fn target(&self) -> &RenderTarget {
        match &self.content {
            SlideContent::Texture(t) => t,
            SlideContent::Scene { target, .. } => target,
        }
    }
}

/// Engine construction knobs, surfaced on the demo binary's CLI
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    pub grid_size: u32,
    /// Seed for the ripple and code-rain RNGs; None draws from entropy
    pub seed: Option<u64>,
    pub scene_target_size: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            seed: None,
            scene_target_size: RENDER_TARGET_SIZE,
        }
    }
}

/// The whole hero visual behind one `advance(dt)` call per frame.
///
/// Owns the slide deck, the tile transition, the ripple engine, the post
/// stack and the overlays, and composites everything into a CPU frame the
/// presentation layer uploads. Runs headless just as well, which is how
/// the integration tests drive it.
pub struct HeroEngine {
    slides: Vec<Slide>,
    transition: TransitionEngine,
    ripple: RippleEngine,

    chromatic: ChromaticAberration,
    tilt_shift: TiltShift,
    glitch: Glitch,
    glitch_stop_in: Option<f32>,

    code_rain: CodeRainScene,
    pixel_text: PixelTextScene,

    frame: RenderTarget,
    scratch: RenderTarget,
    overlay: RenderTarget,

    width: u32,
    height: u32,
    frustum: Option<CoverFrustum>,

    pointer_ndc: Vec2,
    target_pointer_ndc: Vec2,
    scroll: f32,
    target_scroll: f32,
    scroll_px: f32,

    elapsed: f64,
    disposed: bool,
}

impl HeroEngine {
    pub fn new(deck: &SlideDeck, options: EngineOptions) -> Result<Self, EngineError> {
        if deck.slides.is_empty() {
            return Err(EngineError::EmptyDeck);
        }
        if options.grid_size < 2 {
            return Err(EngineError::GridTooSmall(options.grid_size));
        }

        let size = options.scene_target_size;
        let placeholder = Color::from_hex(PLACEHOLDER_COLOR);
        let mut slides = Vec::with_capacity(deck.slides.len());
        for spec in &deck.slides {
            let content = match &spec.source {
                SlideSource::Image { path } => {
                    SlideContent::Texture(load_slide_texture(path, size, placeholder))
                }
                SlideSource::Scene { kind } => {
                    let mut scene = create_scene(*kind);
                    scene.resize(size, size, 1.0);
                    SlideContent::Scene {
                        scene,
                        target: RenderTarget::new(size, size),
                    }
                }
            };
            slides.push(Slide {
                tilt_shift: spec.tilt_shift.unwrap_or_default(),
                content,
            });
        }

        let tilt_settings = slides[0].tilt_shift;
        let ripple = match options.seed {
            Some(seed) => RippleEngine::with_seed(options.grid_size, seed),
            None => RippleEngine::new(options.grid_size),
        };
        let code_rain = match options.seed {
            Some(seed) => CodeRainScene::with_seed(seed),
            None => CodeRainScene::new(),
        };

        info!(
            "hero engine: {} slides, {}x{} grid",
            slides.len(),
            options.grid_size,
            options.grid_size
        );

        Ok(Self {
            transition: TransitionEngine::new(options.grid_size, slides.len()),
            ripple,
            slides,
            chromatic: ChromaticAberration::new(),
            tilt_shift: TiltShift::new(tilt_settings),
            glitch: Glitch::new(),
            glitch_stop_in: None,
            code_rain,
            pixel_text: PixelTextScene::new(&deck.title),
            frame: RenderTarget::new(0, 0),
            scratch: RenderTarget::new(0, 0),
            overlay: RenderTarget::new(0, 0),
            width: 0,
            height: 0,
            frustum: None,
            pointer_ndc: Vec2::ZERO,
            target_pointer_ndc: Vec2::ZERO,
            scroll: 0.0,
            target_scroll: 0.0,
            scroll_px: 0.0,
            elapsed: 0.0,
            disposed: false,
        })
    }

    pub fn frame(&self) -> &RenderTarget {
        &self.frame
    }

    pub fn transition(&self) -> &TransitionEngine {
        &self.transition
    }

    pub fn current_slide(&self) -> usize {
        self.transition.current_slide()
    }

    pub fn active_wave_count(&self) -> usize {
        self.ripple.active_wave_count()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        if self.width == 0 || self.height == 0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            x / self.width as f32 * 2.0 - 1.0,
            1.0 - y / self.height as f32 * 2.0,
        )
    }

    fn for_each_scene(&mut self, mut f: impl FnMut(&mut dyn Scene)) {
        for slide in &mut self.slides {
            if let SlideContent::Scene { scene, .. } = &mut slide.content {
                f(scene.as_mut());
            }
        }
    }

    /// Route one input event to the transition, the scenes and the overlays
    pub fn handle_event(&mut self, event: InputEvent) {
        if self.disposed {
            return;
        }
        match event {
            InputEvent::PointerDown { x, y } => {
                self.transition.begin_drag(x);
                let ndc = self.to_ndc(x, y);
                self.for_each_scene(|scene| scene.pointer_pressed(ndc.x, ndc.y));
                self.pixel_text.pointer_pressed(ndc.x, ndc.y);
            }
            InputEvent::PointerMoved { x, y } => {
                self.transition.drag_to(x);
                let ndc = self.to_ndc(x, y);
                self.target_pointer_ndc = ndc;
                self.for_each_scene(|scene| scene.pointer_moved(ndc.x, ndc.y));
                self.pixel_text.pointer_moved(ndc.x, ndc.y);
            }
            InputEvent::PointerUp { x, y, click } => {
                self.transition.end_drag();
                self.for_each_scene(|scene| {
                    scene.pointer_released();
                });
                if let Some(snap) = self.pixel_text.pointer_released() {
                    self.seed_snap_back_wave(snap.dir_x, snap.dir_y);
                }
                if click {
                    self.trigger_wave_at_pixel(x, y);
                }
            }
            InputEvent::PointerLeft => {
                self.transition.pointer_leave();
            }
            InputEvent::Scrolled { delta } => {
                let viewport = self.height.max(1) as f32;
                self.scroll_px = (self.scroll_px + delta).clamp(0.0, viewport);
                self.target_scroll = self.scroll_px / viewport;
            }
            InputEvent::Resized { width, height } => {
                self.resize(width, height);
            }
        }
    }

    /// Start a ripple under the cursor
    fn trigger_wave_at_pixel(&mut self, x: f32, y: f32) {
        let Some(frustum) = self.frustum else { return };
        let world = frustum.screen_to_world(Vec2::new(x, y), self.width, self.height);
        let n = self.transition.grid_size();
        if let Some((row, col)) = pick_tile(world, n, CUBE_SIZE, GAP) {
            debug!("ripple at tile ({row}, {col})");
            self.ripple.trigger(row, col, self.elapsed);
        }
    }

    /// A title snap-back seeds a wave offset from the grid center along
    /// the snap direction
    fn seed_snap_back_wave(&mut self, dir_x: f32, dir_y: f32) {
        let n = self.transition.grid_size();
        let center = (n / 2) as f32;
        let reach = (n as f32 * 0.4).floor();
        let row = (center + dir_y * reach).round().clamp(0.0, (n - 1) as f32) as u32;
        let col = (center + dir_x * reach).round().clamp(0.0, (n - 1) as f32) as u32;
        self.ripple.trigger(row, col, self.elapsed);
    }

    /// Zero dimensions are tolerated; layout stays deferred until the
    /// container has size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.disposed || width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.frame.resize(width, height);
        self.scratch.resize(width, height);
        self.overlay.resize(width, height);

        let aspect = width as f32 / height as f32;
        let extent = grid_extent(self.transition.grid_size(), CUBE_SIZE, GAP);
        self.frustum = Some(CoverFrustum::cover(aspect, extent));

        self.code_rain.resize(width, height, aspect);
        self.pixel_text.resize(width, height, aspect);
        debug!("engine resized to {width}x{height}");
    }

    /// One simulation-and-composite step. The order is load-bearing:
    /// input smoothing, scene slides, ripple, transition, tile composite,
    /// post stack, overlays.
    pub fn advance(&mut self, dt: f32) {
        if self.disposed {
            return;
        }
        self.elapsed += dt as f64;

        self.pointer_ndc.x = low_pass(self.pointer_ndc.x, self.target_pointer_ndc.x, POINTER_SMOOTHING);
        self.pointer_ndc.y = low_pass(self.pointer_ndc.y, self.target_pointer_ndc.y, POINTER_SMOOTHING);
        self.scroll = low_pass(self.scroll, self.target_scroll, SCROLL_SMOOTHING);

        for slide in &mut self.slides {
            if let SlideContent::Scene { scene, target } = &mut slide.content {
                scene.update(dt);
                scene.render(target);
            }
        }

        self.ripple.process(self.transition.tiles_mut(), self.elapsed);

        if let Some(event) = self.transition.advance(dt) {
            match event {
                TransitionEvent::Committed { slide } => {
                    debug!("slide committed: {slide}");
                    self.code_rain.set_color_scheme((slide % 2) as f32);
                    self.glitch.trigger(1.0);
                    self.glitch_stop_in = Some(GLITCH_BURST);
                }
                TransitionEvent::Cancelled => {
                    debug!("transition snapped back");
                }
            }
        }

        if self.frustum.is_some() {
            self.composite_tiles();
            self.apply_post_stack(dt);
            self.render_overlays(dt);
        } else {
            self.glitch.update(dt);
        }
    }

    fn composite_tiles(&mut self) {
        let Some(frustum) = self.frustum else { return };
        // Scroll zooms the background in by shrinking the frustum
        let frustum = frustum.zoomed(1.0 / (1.0 + self.scroll * BACKGROUND_ZOOM_IN));

        let front = self.slides[self.transition.front_slide()].target();
        let side = self.slides[self.transition.side_slide()].target();
        let n = self.transition.grid_size();

        self.frame.clear(Color::BLACK, 1.0);
        composite_grid(
            &mut self.frame,
            self.transition.tiles(),
            n,
            frustum,
            front,
            side,
        );
    }

    fn apply_post_stack(&mut self, dt: f32) {
        self.chromatic.set_pointer(self.pointer_ndc.x, self.pointer_ndc.y);
        self.chromatic.apply(&self.frame, &mut self.scratch);

        self.tilt_shift.set_pointer(self.pointer_ndc.x, self.pointer_ndc.y);
        self.tilt_shift
            .set_settings(self.slides[self.transition.current_slide()].tilt_shift);
        self.tilt_shift.apply(&self.scratch, &mut self.frame);

        if let Some(remaining) = &mut self.glitch_stop_in {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.glitch_stop_in = None;
                self.glitch.stop();
            }
        }
        self.glitch.update(dt);
        self.glitch.apply(&self.frame, &mut self.scratch);
        std::mem::swap(&mut self.frame, &mut self.scratch);
    }

    fn render_overlays(&mut self, dt: f32) {
        self.code_rain.update(dt);
        self.code_rain.render(&mut self.overlay);
        self.frame.composite_over(&self.overlay);

        self.pixel_text.set_scroll_progress(self.target_scroll);
        self.pixel_text.update(dt);
        self.pixel_text.render(&mut self.overlay);
        self.frame.composite_over(&self.overlay);
    }

    /// Stop the engine and free every scene and buffer. Idempotent;
    /// `advance` becomes a no-op afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for slide in &mut self.slides {
            match &mut slide.content {
                SlideContent::Texture(t) => t.release(),
                SlideContent::Scene { scene, target } => {
                    scene.dispose();
                    target.release();
                }
            }
        }
        self.code_rain.dispose();
        self.pixel_text.dispose();
        self.frame.release();
        self.scratch.release();
        self.overlay.release();
        info!("hero engine disposed");
    }
}

impl Drop for HeroEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Paint every tile as an axis-aligned rect: rotation narrows the tile by
/// `|cos|`, past 45 degrees the incoming face shows mirrored, and the
/// z-offset pops the tile out by scaling it up. Ripple colors add on top
/// as emissive tint.
fn composite_grid(
    frame: &mut RenderTarget,
    tiles: &[Tile],
    grid_size: u32,
    frustum: CoverFrustum,
    front: &RenderTarget,
    side: &RenderTarget,
) {
    let (fw, fh) = (frame.width(), frame.height());
    let n = grid_size as f32;

    for tile in tiles {
        let width_scale = tile.rotation.cos().abs();
        if width_scale < 1.0e-3 {
            continue; // edge-on
        }
        let pop = 1.0 + tile.z_offset * POP_OUT_SCALE;
        let half_w = CUBE_SIZE / 2.0 * width_scale * pop;
        let half_h = CUBE_SIZE / 2.0 * pop;

        let center = tile_center(tile.row, tile.col, grid_size, CUBE_SIZE, GAP);
        let tl = frustum.world_to_screen(center + Vec2::new(-half_w, half_h), fw, fh);
        let br = frustum.world_to_screen(center + Vec2::new(half_w, -half_h), fw, fh);

        let x0 = tl.x.round() as i32;
        let y0 = tl.y.round() as i32;
        let x1 = br.x.round() as i32;
        let y1 = br.y.round() as i32;
        if x1 <= x0 || y1 <= y0 {
            continue;
        }

        let showing_side = tile.rotation.abs() > std::f32::consts::FRAC_PI_4;
        let texture = if showing_side { side } else { front };

        let u0 = tile.col as f32 / n;
        let u1 = (tile.col + 1) as f32 / n;
        let v0 = tile.row as f32 / n;
        let v1 = (tile.row + 1) as f32 / n;

        let emissive = tile
            .ripple_color
            .map(|c| c.scale(tile.ripple_intensity * COLOR_INTENSITY));

        let inv_w = 1.0 / (x1 - x0) as f32;
        let inv_h = 1.0 / (y1 - y0) as f32;
        for py in y0..y1 {
            let fy = (py - y0) as f32 * inv_h;
            let v = v1 - fy * (v1 - v0); // top pixel row samples the cell top
            for px in x0..x1 {
                let mut fx = (px - x0) as f32 * inv_w;
                if showing_side {
                    fx = 1.0 - fx; // incoming face appears mirrored
                }
                let u = u0 + fx * (u1 - u0);
                let mut rgba = texture.sample_uv(u, v);
                if let Some(e) = emissive {
                    rgba[0] = (rgba[0] as f32 + e.r * 255.0).min(255.0) as u8;
                    rgba[1] = (rgba[1] as f32 + e.g * 255.0).min(255.0) as u8;
                    rgba[2] = (rgba[2] as f32 + e.b * 255.0).min(255.0) as u8;
                }
                rgba[3] = 255;
                frame.set_pixel(px, py, rgba);
            }
        }
    }
}
