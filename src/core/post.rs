use super::render_target::RenderTarget;
use crate::types::TiltShiftSettings;

// Chromatic aberration strength: a resting baseline plus a radial term
// that grows as the pointer leaves the center.
const ABERRATION_BASE: f32 = 0.004;
const ABERRATION_POINTER: f32 = 0.006;

// Glitch settings
const GLITCH_DECAY_SPEED: f32 = 3.0; // intensity units lost per second when inactive
const GLITCH_MAX_INTENSITY: f32 = 1.5;

/// The classic shader one-liner hash, so the glitch texture has the
/// familiar streaky character
fn hash(x: f32, y: f32) -> f32 {
    let dot = x * 12.9898 + y * 78.233;
    (dot.sin() * 43758.5453123).rem_euclid(1.0)
}

fn copy_frame(src: &RenderTarget, dst: &mut RenderTarget) {
    if dst.width() != src.width() || dst.height() != src.height() {
        dst.resize(src.width(), src.height());
    }
    dst.pixels_mut().copy_from_slice(src.pixels());
}

/// Radial RGB split that strengthens toward the frame edges and with
/// pointer distance from center.
pub struct ChromaticAberration {
    offset: f32,
}

impl ChromaticAberration {
    pub fn new() -> Self {
        Self {
            offset: ABERRATION_BASE,
        }
    }

    /// Pointer position in normalized device coordinates, [-1, 1] each axis
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        let dist = (x * x + y * y).sqrt();
        self.offset = ABERRATION_BASE + dist * ABERRATION_POINTER;
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn apply(&self, src: &RenderTarget, dst: &mut RenderTarget) {
        if dst.width() != src.width() || dst.height() != src.height() {
            dst.resize(src.width(), src.height());
        }
        let w = src.width() as f32;
        let h = src.height() as f32;

        for y in 0..src.height() as i32 {
            for x in 0..src.width() as i32 {
                let u = x as f32 / w - 0.5;
                let v = y as f32 / h - 0.5;
                let dist = (u * u + v * v).sqrt();
                if dist < 1.0e-6 {
                    dst.set_pixel(x, y, src.get_pixel(x, y));
                    continue;
                }

                // Split along the radial direction, scaled by distance
                let shift = self.offset * dist;
                let sx = (u / dist * shift * w) as i32;
                let sy = (v / dist * shift * h) as i32;

                let r = src.get_pixel(x + sx, y + sy)[0];
                let center = src.get_pixel(x, y);
                let b = src.get_pixel(x - sx, y - sy)[2];
                dst.set_pixel(x, y, [r, center[1], b, center[3]]);
            }
        }
    }
}

impl Default for ChromaticAberration {
    fn default() -> Self {
        Self::new()
    }
}

/// Miniature-photography depth of field: a sharp focus band across the
/// frame with blur ramping up outside it. The pointer nudges the band
/// vertically and tilts it.
pub struct TiltShift {
    offset: f32,
    rotation: f32,
    settings: TiltShiftSettings,
}

impl TiltShift {
    pub fn new(settings: TiltShiftSettings) -> Self {
        Self {
            offset: 0.0,
            rotation: 0.0,
            settings,
        }
    }

    /// Pointer position in normalized device coordinates
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.offset = y * 0.3;
        self.rotation = x * 0.5;
    }

    /// Swap in the focus tuning of the slide currently on screen
    pub fn set_settings(&mut self, settings: TiltShiftSettings) {
        self.settings = settings;
    }

    pub fn settings(&self) -> TiltShiftSettings {
        self.settings
    }

    /// Blur factor in [0, 1] for a point in centered UV space
    fn blur_factor(&self, u: f32, v: f32) -> f32 {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        // Signed distance from the (tilted, offset) focus line
        let band = (v - self.offset) * cos_r + u * sin_r;
        let half_focus = self.settings.focus_area * 0.5;
        let outside = (band.abs() - half_focus).max(0.0);
        (outside / self.settings.feather.max(1.0e-3)).min(1.0)
    }

    pub fn apply(&self, src: &RenderTarget, dst: &mut RenderTarget) {
        if dst.width() != src.width() || dst.height() != src.height() {
            dst.resize(src.width(), src.height());
        }
        let w = src.width() as f32;
        let h = src.height() as f32;
        let max_radius = self.settings.blur * h * 0.25;

        for y in 0..src.height() as i32 {
            for x in 0..src.width() as i32 {
                let u = x as f32 / w - 0.5;
                let v = y as f32 / h - 0.5;
                let factor = self.blur_factor(u, v);
                let radius = (factor * max_radius) as i32;

                if radius == 0 {
                    dst.set_pixel(x, y, src.get_pixel(x, y));
                    continue;
                }

                // 9-tap box sample over the blur disc
                let mut acc = [0u32; 4];
                let mut taps = 0u32;
                let step = (radius / 2).max(1);
                for dy in (-radius..=radius).step_by(step as usize) {
                    for dx in (-radius..=radius).step_by(step as usize) {
                        let px = src.get_pixel(x + dx, y + dy);
                        for c in 0..4 {
                            acc[c] += px[c] as u32;
                        }
                        taps += 1;
                    }
                }
                let out = [
                    (acc[0] / taps) as u8,
                    (acc[1] / taps) as u8,
                    (acc[2] / taps) as u8,
                    (acc[3] / taps) as u8,
                ];
                dst.set_pixel(x, y, out);
            }
        }
    }
}

/// Transient digital distortion: horizontal line tears, vertical block
/// displacement, RGB split, scanlines and noise, all scaled by an
/// intensity that eases in on trigger and decays when released.
pub struct Glitch {
    time: f32,
    current_intensity: f32,
    target_intensity: f32,
    active: bool,
    decay_speed: f32,
}

impl Glitch {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            current_intensity: 0.0,
            target_intensity: 0.0,
            active: false,
            decay_speed: GLITCH_DECAY_SPEED,
        }
    }

    pub fn intensity(&self) -> f32 {
        self.current_intensity
    }

    pub fn trigger(&mut self, intensity: f32) {
        self.active = true;
        self.target_intensity = intensity.min(GLITCH_MAX_INTENSITY);
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.target_intensity = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;
        if self.active {
            self.current_intensity +=
                (self.target_intensity - self.current_intensity) * 0.2;
        } else {
            self.current_intensity *= (1.0 - dt * self.decay_speed).max(0.0);
            if self.current_intensity < 0.001 {
                self.current_intensity = 0.0;
            }
        }
    }

    pub fn apply(&self, src: &RenderTarget, dst: &mut RenderTarget) {
        if self.current_intensity < 0.001 {
            copy_frame(src, dst);
            return;
        }
        if dst.width() != src.width() || dst.height() != src.height() {
            dst.resize(src.width(), src.height());
        }

        let w = src.width() as f32;
        let h = src.height() as f32;
        let intensity = self.current_intensity;
        let time = self.time;

        for y in 0..src.height() as i32 {
            let vy = y as f32 / h;

            // Horizontal tear for this scanline band
            let line = if hash((vy * 20.0).floor(), time * 10.0) > 0.99 - intensity * 0.15 {
                1.0
            } else {
                0.0
            };
            let shift_u = (hash(time * 5.0, (vy * 30.0).floor()) - 0.5) * 0.1 * intensity * line;

            // Vertical block displacement
            let block_y = (vy * 8.0).floor() / 8.0;
            let block = if hash(block_y, time * 3.0) > 0.97 - intensity * 0.1 {
                1.0
            } else {
                0.0
            };
            let shift_v = (hash(time, block_y) - 0.5) * 0.05 * intensity * block;

            let rgb_shift = (intensity * 0.02 * w) as i32;
            let scanline = (vy * h * 2.0).sin() * 0.02 * intensity;

            for x in 0..src.width() as i32 {
                let sx = x + (shift_u * w) as i32;
                let sy = y + (shift_v * h) as i32;

                let r = src.get_pixel(sx + rgb_shift, sy)[0];
                let center = src.get_pixel(sx, sy);
                let b = src.get_pixel(sx - rgb_shift, sy)[2];

                let noise =
                    (hash(x as f32 / w + time, vy + time) - 0.5) * 0.1 * intensity;
                let grain = ((scanline + noise) * 255.0) as i32;

                let out = [
                    (r as i32 + grain).clamp(0, 255) as u8,
                    (center[1] as i32 + grain).clamp(0, 255) as u8,
                    (b as i32 + grain).clamp(0, 255) as u8,
                    255,
                ];
                dst.set_pixel(x, y, out);
            }
        }
    }
}

impl Default for Glitch {
    fn default() -> Self {
        Self::new()
    }
}
