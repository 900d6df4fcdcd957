use glam::Vec2;

use super::font;
use crate::core::render_target::RenderTarget;
use crate::math::{low_pass, Color, Spring2};
use crate::traits::{Scene, SnapBack};

const COLOR_START: u32 = 0xff6b6b;
const COLOR_END: u32 = 0x4ecdc4;

const DEPTH_LAYERS: u32 = 16;
const PADDING_PERCENT: f32 = 0.2; // of target width, each side

// Squash-and-stretch spring
const SPRING_STIFFNESS: f32 = 180.0;
const SPRING_DAMPING: f32 = 6.0;
/// Drag magnitude (NDC) past which release fires a snap-back event
const SNAP_THRESHOLD: f32 = 0.15;
/// How far the front layer moves per unit of stretch, relative to text size
const STRETCH_REACH: f32 = 0.45;

// Color ripple fired by a snap-back
const RIPPLE_DURATION: f32 = 1.8;
const RIPPLE_BAND_WIDTH: f32 = 14.0; // pixels per concentric band
const RIPPLE_BAND_SPEED: f32 = 9.0; // bands per second

const POINTER_SMOOTHING: f32 = 0.05;
const SCROLL_SMOOTHING: f32 = 0.1;

/// Deterministic block jitter for the ripple and dissolve effects
fn jitter(a: f32, b: f32) -> f32 {
    let dot = a * 12.9898 + b * 78.233;
    (dot.sin() * 43758.5453123).rem_euclid(1.0)
}

/// Title overlay: the same text stacked in parallel depth layers, with a
/// spring-driven squash/stretch on the front layer, a concentric color
/// ripple on snap-back, and a scroll-driven materialize/dissolve built
/// from pixelation, vibration and a late opacity fade.
pub struct PixelTextScene {
    text: String,
    color_start: Color,
    color_end: Color,

    elapsed: f32,
    pointer: Vec2,
    target_pointer: Vec2,

    stretch: Spring2,
    dragging: bool,
    drag_origin: Vec2,
    drag_offset: Vec2,

    /// Time the current color ripple has been running, if any
    ripple_age: Option<f32>,

    scroll: f32,
    target_scroll: f32,
}

impl PixelTextScene {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            color_start: Color::from_hex(COLOR_START),
            color_end: Color::from_hex(COLOR_END),
            elapsed: 0.0,
            pointer: Vec2::ZERO,
            target_pointer: Vec2::ZERO,
            stretch: Spring2::new(SPRING_STIFFNESS, SPRING_DAMPING),
            dragging: false,
            drag_origin: Vec2::ZERO,
            drag_offset: Vec2::ZERO,
            ripple_age: None,
            scroll: 0.0,
            target_scroll: 0.0,
        }
    }

    pub fn stretch_value(&self) -> Vec2 {
        self.stretch.value
    }

    /// Scale and top-left origin that fit the text inside the target with
    /// the configured padding
    fn layout(&self, target: &RenderTarget) -> (u32, i32, i32) {
        let (w1, h1) = font::text_size(&self.text, 1);
        if w1 == 0 {
            return (1, 0, 0);
        }
        // Scrolling zooms the title out while the background zooms in
        let usable = target.width() as f32 * (1.0 - 2.0 * PADDING_PERCENT)
            / (1.0 + self.scroll * 0.5);
        let scale = ((usable / w1 as f32) as u32).max(1);
        let (tw, th) = (w1 * scale, h1 * scale);

        // Centered, with a gentle float
        let float_y = (self.elapsed * 0.5).sin() * 0.02 * target.height() as f32;
        let x = (target.width() as i32 - tw as i32) / 2;
        let y = (target.height() as i32 - th as i32) / 2 + float_y as i32;
        (scale, x, y)
    }

    fn dissolve_alpha(&self) -> f32 {
        // Fully opaque through most of the scroll, fading late
        if self.scroll < 0.6 {
            1.0
        } else {
            ((1.0 - self.scroll) / 0.4).clamp(0.0, 1.0)
        }
    }

    /// Draw one depth layer. The front layer gets the stretch displacement
    /// with radial falloff plus the ripple tint; back layers are flat fills.
    #[allow(clippy::too_many_arguments)]
    fn draw_layer(
        &self,
        target: &mut RenderTarget,
        scale: u32,
        origin_x: i32,
        origin_y: i32,
        layer_offset: Vec2,
        color: Color,
        alpha: f32,
        is_front: bool,
    ) {
        let (tw, th) = font::text_size(&self.text, scale);
        let center = Vec2::new(
            origin_x as f32 + tw as f32 / 2.0,
            origin_y as f32 + th as f32 / 2.0,
        );
        let max_radius = (tw.max(th) as f32 / 2.0).max(1.0);
        let stretch_px = self.stretch.value * STRETCH_REACH * tw as f32;

        // Scroll-driven pixelation: blocks coarsen as the title dissolves
        let block = 1 + (self.scroll * 6.0) as i32;
        let vibration = self.scroll * scale as f32 * 2.0;

        let mut pen_y = origin_y;
        for line in self.text.lines() {
            let mut pen_x = origin_x;
            for c in line.chars() {
                if let Some(rows) = font::glyph(c) {
                    for (row, bits) in rows.iter().enumerate() {
                        for col in 0..font::GLYPH_WIDTH {
                            if bits & (1 << (font::GLYPH_WIDTH - 1 - col)) == 0 {
                                continue;
                            }
                            let mut px = pen_x as f32
                                + col as f32 * scale as f32
                                + layer_offset.x;
                            let mut py = pen_y as f32
                                + row as f32 * scale as f32
                                + layer_offset.y;

                            let mut rgba = color;
                            if is_front {
                                // Stretch with radial falloff from the center
                                let p = Vec2::new(px, py);
                                let falloff =
                                    (1.0 - p.distance(center) / max_radius).clamp(0.0, 1.0);
                                px += stretch_px.x * falloff;
                                py += stretch_px.y * falloff;

                                if let Some(age) = self.ripple_age {
                                    rgba = self.ripple_tint(rgba, p, center, age);
                                }
                            }

                            if block > 1 {
                                // Quantize position and add per-block shake
                                let bx = (px as i32 / block) * block;
                                let by = (py as i32 / block) * block;
                                let shake_x = (jitter(bx as f32, self.elapsed.floor()) - 0.5)
                                    * vibration;
                                let shake_y = (jitter(by as f32, self.elapsed.floor() + 31.0)
                                    - 0.5)
                                    * vibration;
                                px = bx as f32 + shake_x;
                                py = by as f32 + shake_y;
                            }

                            target.fill_rect(
                                px as i32,
                                py as i32,
                                scale,
                                scale,
                                rgba.to_rgba8(alpha),
                            );
                        }
                    }
                }
                pen_x += font::CHAR_ADVANCE as i32 * scale as i32;
            }
            pen_y += font::LINE_ADVANCE as i32 * scale as i32;
        }
    }

    /// Concentric bands radiate outward, each band tinted by a blocky
    /// pseudo-random color, fading out over the ripple duration
    fn ripple_tint(&self, base: Color, p: Vec2, center: Vec2, age: f32) -> Color {
        let fade = 1.0 - age / RIPPLE_DURATION;
        if fade <= 0.0 {
            return base;
        }
        let dist = p.distance(center);
        let band = (dist / RIPPLE_BAND_WIDTH - age * RIPPLE_BAND_SPEED).floor();
        let block = (p.x / RIPPLE_BAND_WIDTH).floor();

        let h = jitter(band, block);
        let tint = self.color_start.lerp(self.color_end, h);
        base.lerp(tint, h * fade * 0.8)
    }
}

impl Scene for PixelTextScene {
    fn update(&mut self, dt: f32) {
        self.elapsed += dt;

        self.pointer.x = low_pass(self.pointer.x, self.target_pointer.x, POINTER_SMOOTHING);
        self.pointer.y = low_pass(self.pointer.y, self.target_pointer.y, POINTER_SMOOTHING);
        self.scroll = low_pass(self.scroll, self.target_scroll, SCROLL_SMOOTHING);

        if self.dragging {
            // Drag drives the displacement directly
            self.stretch.hold(self.drag_offset);
        } else {
            self.stretch.step(dt);
        }

        if let Some(age) = &mut self.ripple_age {
            *age += dt;
            if *age > RIPPLE_DURATION {
                self.ripple_age = None;
            }
        }
    }

    fn render(&mut self, target: &mut RenderTarget) {
        target.clear(Color::BLACK, 0.0);
        let (scale, x, y) = self.layout(target);
        let alpha = self.dissolve_alpha();
        if alpha <= 0.0 {
            return;
        }

        // Back to front: deeper layers darker and offset along the pointer
        let depth_dir = Vec2::new(
            1.0 + self.pointer.x * 2.0,
            1.0 + self.pointer.y * 2.0,
        ) * (scale as f32 * 0.25);

        for i in (1..DEPTH_LAYERS).rev() {
            let progress = i as f32 / (DEPTH_LAYERS - 1) as f32;
            let shade = self.color_start.scale(0.3 - progress * 0.2);
            self.draw_layer(
                target,
                scale,
                x,
                y,
                depth_dir * i as f32,
                shade,
                alpha,
                false,
            );
        }

        // Front face: animated gradient sweep
        let t = ((self.elapsed * 2.0).sin() * 0.2 + 0.5).clamp(0.0, 1.0);
        let front = self.color_start.lerp(self.color_end, t);
        self.draw_layer(target, scale, x, y, Vec2::ZERO, front, alpha, true);
    }

    fn pointer_moved(&mut self, x: f32, y: f32) {
        self.target_pointer = Vec2::new(x, y);
        if self.dragging {
            self.drag_offset = Vec2::new(x, y) - self.drag_origin;
        }
    }

    fn pointer_pressed(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.drag_origin = Vec2::new(x, y);
        self.drag_offset = Vec2::ZERO;
    }

    fn pointer_released(&mut self) -> Option<SnapBack> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;

        let offset = self.drag_offset;
        self.stretch.hold(offset);
        self.stretch.release(Vec2::ZERO);
        self.drag_offset = Vec2::ZERO;

        if offset.length() >= SNAP_THRESHOLD {
            self.ripple_age = Some(0.0);
            let dir = offset.normalize_or_zero();
            // Snaps back opposite the stretch
            return Some(SnapBack {
                dir_x: -dir.x,
                dir_y: -dir.y,
            });
        }
        None
    }

    fn set_scroll_progress(&mut self, p: f32) {
        self.target_scroll = p.clamp(0.0, 1.0);
    }

    fn name(&self) -> &str {
        "PixelText"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_drag_release_stays_quiet() {
        let mut scene = PixelTextScene::new("MAKE\nFUN");
        scene.pointer_pressed(0.0, 0.0);
        scene.pointer_moved(0.05, 0.0);
        let snap = scene.pointer_released();
        assert!(snap.is_none());
        assert!(scene.ripple_age.is_none());
    }

    #[test]
    fn large_drag_release_snaps_back() {
        let mut scene = PixelTextScene::new("MAKE\nFUN");
        scene.pointer_pressed(0.0, 0.0);
        scene.pointer_moved(0.4, 0.0);
        let snap = scene.pointer_released().expect("snap-back event");

        // Direction opposes the stretch
        assert!(snap.dir_x < 0.0);
        assert!(snap.dir_y.abs() < 1e-6);
        assert!(scene.ripple_age.is_some());
    }

    #[test]
    fn spring_settles_to_exactly_zero() {
        let mut scene = PixelTextScene::new("MAKE\nFUN");
        scene.pointer_pressed(0.0, 0.0);
        scene.pointer_moved(0.4, 0.3);
        scene.pointer_released();

        for _ in 0..10_000 {
            scene.update(1.0 / 240.0);
            if scene.stretch_value() == Vec2::ZERO {
                break;
            }
        }
        assert_eq!(scene.stretch_value(), Vec2::ZERO);
    }

    #[test]
    fn drag_drives_stretch_directly() {
        let mut scene = PixelTextScene::new("MAKE\nFUN");
        scene.pointer_pressed(0.0, 0.0);
        scene.pointer_moved(0.3, -0.2);
        scene.update(0.016);
        assert_eq!(scene.stretch_value(), Vec2::new(0.3, -0.2));
    }

    #[test]
    fn ripple_expires() {
        let mut scene = PixelTextScene::new("MAKE\nFUN");
        scene.pointer_pressed(0.0, 0.0);
        scene.pointer_moved(0.5, 0.0);
        scene.pointer_released();
        assert!(scene.ripple_age.is_some());

        for _ in 0..200 {
            scene.update(0.016);
        }
        assert!(scene.ripple_age.is_none());
    }

    #[test]
    fn scroll_fades_late() {
        let mut scene = PixelTextScene::new("MAKE\nFUN");
        scene.set_scroll_progress(0.5);
        for _ in 0..500 {
            scene.update(0.016);
        }
        assert!((scene.dissolve_alpha() - 1.0).abs() < 1e-3);

        scene.set_scroll_progress(1.0);
        for _ in 0..500 {
            scene.update(0.016);
        }
        assert!(scene.dissolve_alpha() < 0.05);
    }

    #[test]
    fn render_clears_stale_target_contents() {
        let mut scene = PixelTextScene::new("MAKE\nFUN");
        scene.update(0.016);
        let mut target = RenderTarget::new(128, 128);
        // Leftovers from a previous pass in a shared buffer must not
        // survive into the next composite
        target.set_pixel(0, 0, [9, 9, 9, 200]);
        scene.render(&mut target);
        assert_eq!(target.get_pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn renders_text_pixels() {
        let mut scene = PixelTextScene::new("MAKE\nFUN");
        scene.update(0.016);
        let mut target = RenderTarget::new(128, 128);
        scene.render(&mut target);
        let lit = target.pixels().chunks_exact(4).filter(|p| p[3] > 0).count();
        assert!(lit > 100, "text pixels drawn: {lit}");
    }
}
