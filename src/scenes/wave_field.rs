use glam::{Vec2, Vec3};

use crate::core::render_target::RenderTarget;
use crate::math::Color;
use crate::traits::Scene;

const COLOR_START: u32 = 0xff6b6b;
const COLOR_END: u32 = 0x4ecdc4;
const BACKGROUND: u32 = 0x1a1a2e;

const GRID_WIDTH: usize = 80;
const GRID_LENGTH: usize = 80;
const FIELD_EXTENT: f32 = 4.0; // world size of the point grid
const POINT_SIZE: f32 = 0.03;

const CAMERA_POS: Vec3 = Vec3::new(0.0, 2.0, 3.0);
const CAMERA_FOV: f32 = 50.0;

// Pointer ripple shape
const RIPPLE_FREQ: f32 = 12.0;
const RIPPLE_SPEED: f32 = 6.0;
const RIPPLE_DECAY: f32 = 3.0;
const RIPPLE_AMPLITUDE: f32 = 0.25;

// Drag response
const DRAG_WAVE_SCALE: f32 = 0.12;
const DRAG_PUSH_DEPTH: f32 = 0.3;
const DRAG_VELOCITY_DECAY: f32 = 0.95; // per frame while not dragging

// Gentle resting motion radiating from the center
const IDLE_FREQ: f32 = 8.0;
const IDLE_SPEED: f32 = 2.0;
const IDLE_AMPLITUDE: f32 = 0.05;

/// Flat grid of points whose heights respond to the pointer: a ripple
/// radiating from the cursor, a second wave scaled by recent drag speed,
/// a local depression while the pointer is held down, and a soft idle
/// pulse so the field never sits perfectly still.
pub struct WaveFieldScene {
    color_start: Color,
    color_end: Color,
    background: Color,

    elapsed: f32,
    pointer: Vec2,       // field UV, [0,1] each axis
    last_pointer: Vec2,
    dragging: bool,
    drag_velocity: f32,
}

impl WaveFieldScene {
    pub fn new(swapped: bool) -> Self {
        let (color_start, color_end) = if swapped {
            (Color::from_hex(COLOR_END), Color::from_hex(COLOR_START))
        } else {
            (Color::from_hex(COLOR_START), Color::from_hex(COLOR_END))
        };
        Self {
            color_start,
            color_end,
            background: Color::from_hex(BACKGROUND),
            elapsed: 0.0,
            pointer: Vec2::new(0.5, 0.5),
            last_pointer: Vec2::new(0.5, 0.5),
            dragging: false,
            drag_velocity: 0.0,
        }
    }

    fn height_at(&self, u: f32, v: f32) -> f32 {
        let t = self.elapsed;
        let d_pointer = Vec2::new(u, v).distance(self.pointer);

        // Primary ripple radiating from the pointer
        let ripple = (d_pointer * RIPPLE_FREQ - t * RIPPLE_SPEED).sin()
            * (-d_pointer * RIPPLE_DECAY).exp()
            * RIPPLE_AMPLITUDE;

        // Same shape again, scaled by how fast the pointer was dragged
        let drag_wave = (d_pointer * RIPPLE_FREQ * 1.5 - t * RIPPLE_SPEED * 1.5).sin()
            * (-d_pointer * RIPPLE_DECAY).exp()
            * self.drag_velocity
            * DRAG_WAVE_SCALE;

        // Held pointer presses the field down locally
        let push = if self.dragging {
            -DRAG_PUSH_DEPTH * (-d_pointer * d_pointer * 40.0).exp()
        } else {
            0.0
        };

        let d_center = Vec2::new(u, v).distance(Vec2::new(0.5, 0.5));
        let idle = (d_center * IDLE_FREQ - t * IDLE_SPEED).sin()
            * (-d_center * 2.0).exp()
            * IDLE_AMPLITUDE;

        ripple + drag_wave + push + idle
    }
}

impl Scene for WaveFieldScene {
    fn update(&mut self, dt: f32) {
        self.elapsed += dt;

        if self.dragging && dt > 0.0 {
            let speed = self.pointer.distance(self.last_pointer) / dt;
            self.drag_velocity = self.drag_velocity.max(speed);
        } else {
            self.drag_velocity *= DRAG_VELOCITY_DECAY;
        }
        self.last_pointer = self.pointer;
    }

    fn render(&mut self, target: &mut RenderTarget) {
        target.clear(self.background, 1.0);

        let w = target.width() as f32;
        let h = target.height() as f32;
        let cx = w / 2.0;
        let cy = h / 2.0;
        let focal = (h / 2.0) / (CAMERA_FOV.to_radians() / 2.0).tan();

        // Look-at basis for a camera above and behind the field
        let forward = (-CAMERA_POS).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);

        for i in 0..GRID_WIDTH {
            for j in 0..GRID_LENGTH {
                let u = i as f32 / GRID_WIDTH as f32;
                let v = j as f32 / GRID_LENGTH as f32;

                let world = Vec3::new(
                    (u - 0.5) * FIELD_EXTENT,
                    self.height_at(u, v),
                    (v - 0.5) * FIELD_EXTENT,
                );

                let rel = world - CAMERA_POS;
                let depth = rel.dot(forward);
                if depth <= 0.1 {
                    continue;
                }
                let sx = cx + rel.dot(right) * focal / depth;
                let sy = cy - rel.dot(up) * focal / depth;

                let size = (POINT_SIZE * focal / depth).max(1.0) as u32;
                let color = self.color_start.lerp(self.color_end, u);
                target.fill_rect(sx as i32, sy as i32, size, size, color.to_rgba8(1.0));
            }
        }
    }

    fn pointer_moved(&mut self, x: f32, y: f32) {
        // NDC to field UV
        self.pointer = Vec2::new(x * 0.5 + 0.5, 0.5 - y * 0.5);
    }

    fn pointer_pressed(&mut self, x: f32, y: f32) {
        self.pointer_moved(x, y);
        self.dragging = true;
    }

    fn pointer_released(&mut self) -> Option<crate::traits::SnapBack> {
        self.dragging = false;
        None
    }

    fn name(&self) -> &str {
        "WaveField"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_velocity_decays_when_idle() {
        let mut scene = WaveFieldScene::new(false);
        scene.pointer_pressed(0.0, 0.0);
        scene.pointer_moved(0.5, 0.0);
        scene.update(0.016);
        assert!(scene.drag_velocity > 0.0);

        let peak = scene.drag_velocity;
        scene.pointer_released();
        scene.update(0.016);
        assert!((scene.drag_velocity - peak * DRAG_VELOCITY_DECAY).abs() < 1e-5);
    }

    #[test]
    fn held_pointer_depresses_field() {
        let mut scene = WaveFieldScene::new(false);
        scene.update(0.016);
        let resting = scene.height_at(0.5, 0.5);

        scene.pointer_pressed(0.0, 0.0); // NDC center maps to UV center
        let pressed = scene.height_at(0.5, 0.5);
        assert!(pressed < resting);
    }

    #[test]
    fn ripple_attenuates_with_distance() {
        let scene = WaveFieldScene::new(false);
        // Envelope bound: far from the pointer the ripple cannot exceed
        // the near-field envelope
        let near_env = (-0.05f32 * RIPPLE_DECAY).exp() * RIPPLE_AMPLITUDE;
        let far = scene.height_at(0.95, 0.95).abs();
        assert!(far < near_env);
    }

    #[test]
    fn renders_points_over_background() {
        let mut scene = WaveFieldScene::new(false);
        scene.update(0.016);
        let mut target = RenderTarget::new(96, 96);
        scene.render(&mut target);

        let bg = Color::from_hex(BACKGROUND).to_rgba8(1.0);
        let points = target
            .pixels()
            .chunks_exact(4)
            .filter(|p| *p != &bg[..])
            .count();
        assert!(points > 200, "point pixels drawn: {points}");
    }
}
