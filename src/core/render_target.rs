use crate::math::Color;

/// CPU-side RGBA render surface
///
/// Scenes draw into one of these every frame, the tile compositor samples
/// them as slide textures, and the post-processing passes rewrite the final
/// frame in place.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl RenderTarget {
    /// Create a target cleared to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        }
    }

    /// Create a target filled with an opaque color
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let mut target = Self::new(width, height);
        target.clear(color, 1.0);
        target
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Drop the buffer and zero the dimensions. Used on dispose.
    pub fn release(&mut self) {
        self.pixels = Vec::new();
        self.width = 0;
        self.height = 0;
    }

    /// Reallocate for new dimensions, clearing the contents
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize((width * height * 4) as usize, 0);
    }

    /// Fill the whole target with a color at the given alpha (no blending)
    pub fn clear(&mut self, color: Color, alpha: f32) {
        let px = color.to_rgba8(alpha);
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some(((y as u32 * self.width + x as u32) * 4) as usize)
        }
    }

    /// Read a pixel; out-of-bounds reads return transparent black
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> [u8; 4] {
        match self.index(x, y) {
            Some(i) => [
                self.pixels[i],
                self.pixels[i + 1],
                self.pixels[i + 2],
                self.pixels[i + 3],
            ],
            None => [0, 0, 0, 0],
        }
    }

    /// Write a pixel without blending. Out-of-bounds writes are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&rgba);
        }
    }

    /// Source-over blend a pixel using its alpha
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        let Some(i) = self.index(x, y) else { return };
        let a = rgba[3] as u32;
        if a == 0 {
            return;
        }
        if a == 255 {
            self.pixels[i..i + 4].copy_from_slice(&rgba);
            return;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let src = rgba[c] as u32;
            let dst = self.pixels[i + c] as u32;
            self.pixels[i + c] = ((src * a + dst * inv) / 255) as u8;
        }
        let dst_a = self.pixels[i + 3] as u32;
        self.pixels[i + 3] = (a + dst_a * inv / 255).min(255) as u8;
    }

    /// Additively blend a pixel, scaled by its alpha (glow passes)
    #[inline]
    pub fn add_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        let Some(i) = self.index(x, y) else { return };
        let a = rgba[3] as u32;
        if a == 0 {
            return;
        }
        for c in 0..3 {
            let src = rgba[c] as u32 * a / 255;
            let dst = self.pixels[i + c] as u32;
            self.pixels[i + c] = (dst + src).min(255) as u8;
        }
        let dst_a = self.pixels[i + 3] as u32;
        self.pixels[i + 3] = (dst_a + a).min(255) as u8;
    }

    /// Fill a rectangle with source-over blending
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, rgba: [u8; 4]) {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.blend_pixel(x + dx, y + dy, rgba);
            }
        }
    }

    /// Fill a rectangle additively
    pub fn add_rect(&mut self, x: i32, y: i32, w: u32, h: u32, rgba: [u8; 4]) {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.add_pixel(x + dx, y + dy, rgba);
            }
        }
    }

    /// Draw a dashed line: `dash` pixels on, `gap` pixels off
    pub fn dashed_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        dash: f32,
        gap: f32,
        rgba: [u8; 4],
    ) {
        let period = (dash + gap).max(1.0e-3);
        self.line_with(x1, y1, x2, y2, move |dist| dist % period < dash, rgba);
    }

    /// Bresenham walk with a per-step predicate over accumulated distance
    fn line_with<F>(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, keep: F, rgba: [u8; 4])
    where
        F: Fn(f32) -> bool,
    {
        let (mut x, mut y) = (x1, y1);
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut dist = 0.0f32;

        loop {
            if keep(dist) {
                self.blend_pixel(x, y, rgba);
            }

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            let mut stepped_x = false;
            let mut stepped_y = false;
            if e2 >= dy {
                err += dy;
                x += sx;
                stepped_x = true;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
                stepped_y = true;
            }
            dist += if stepped_x && stepped_y {
                std::f32::consts::SQRT_2
            } else {
                1.0
            };
        }
    }

    /// Sample by UV with nearest filtering. v = 0 is the bottom row,
    /// matching the grid's world orientation. Coordinates clamp to edges.
    pub fn sample_uv(&self, u: f32, v: f32) -> [u8; 4] {
        if self.width == 0 || self.height == 0 {
            return [0, 0, 0, 0];
        }
        let x = (u.clamp(0.0, 1.0) * (self.width - 1) as f32) as i32;
        let y = ((1.0 - v.clamp(0.0, 1.0)) * (self.height - 1) as f32) as i32;
        self.get_pixel(x, y)
    }

    /// Source-over composite another target onto this one at full size,
    /// nearest-scaled if dimensions differ
    pub fn composite_over(&mut self, other: &RenderTarget) {
        if other.width == 0 || other.height == 0 {
            return;
        }
        for y in 0..self.height as i32 {
            let v = 1.0 - y as f32 / (self.height - 1).max(1) as f32;
            for x in 0..self.width as i32 {
                let u = x as f32 / (self.width - 1).max(1) as f32;
                let px = other.sample_uv(u, v);
                self.blend_pixel(x, y, px);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_creation() {
        let t = RenderTarget::new(100, 50);
        assert_eq!(t.width(), 100);
        assert_eq!(t.height(), 50);
        assert_eq!(t.pixels().len(), 100 * 50 * 4);
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut t = RenderTarget::new(10, 10);
        t.clear(Color::from_hex(0xff0000), 1.0);
        assert_eq!(t.get_pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(t.get_pixel(9, 9), [255, 0, 0, 255]);
    }

    #[test]
    fn blend_over_opaque_background() {
        let mut t = RenderTarget::new(4, 4);
        t.clear(Color::BLACK, 1.0);
        t.blend_pixel(1, 1, [255, 255, 255, 128]);
        let px = t.get_pixel(1, 1);
        // Half white over black lands near mid-gray
        assert!(px[0] > 120 && px[0] < 136);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn add_pixel_saturates() {
        let mut t = RenderTarget::new(2, 2);
        t.set_pixel(0, 0, [250, 250, 250, 255]);
        t.add_pixel(0, 0, [100, 100, 100, 255]);
        assert_eq!(t.get_pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn out_of_bounds_writes_dropped() {
        let mut t = RenderTarget::new(4, 4);
        t.set_pixel(100, 100, [255, 0, 0, 255]);
        t.blend_pixel(-1, 0, [255, 0, 0, 255]);
        assert_eq!(t.pixels().len(), 4 * 4 * 4);
    }

    #[test]
    fn solid_line_hits_endpoints() {
        let mut t = RenderTarget::new(32, 32);
        // Zero gap degenerates to a solid line
        t.dashed_line(2, 2, 20, 11, 8.0, 0.0, [255, 255, 255, 255]);
        assert_eq!(t.get_pixel(2, 2)[0], 255);
        assert_eq!(t.get_pixel(20, 11)[0], 255);
    }

    #[test]
    fn dashed_line_has_gaps() {
        let mut t = RenderTarget::new(64, 4);
        t.dashed_line(0, 1, 63, 1, 4.0, 4.0, [255, 255, 255, 255]);
        let lit: usize = (0..64)
            .filter(|&x| t.get_pixel(x, 1)[3] > 0)
            .count();
        assert!(lit > 16, "dashes should light pixels, lit {lit}");
        assert!(lit < 56, "gaps should skip pixels, lit {lit}");
        // Starts on a dash
        assert!(t.get_pixel(0, 1)[3] > 0);
    }

    #[test]
    fn sample_uv_orientation() {
        let mut t = RenderTarget::new(2, 2);
        t.set_pixel(0, 0, [1, 0, 0, 255]); // top-left in pixel space
        t.set_pixel(0, 1, [2, 0, 0, 255]); // bottom-left
        // v = 1 is the top row
        assert_eq!(t.sample_uv(0.0, 1.0)[0], 1);
        assert_eq!(t.sample_uv(0.0, 0.0)[0], 2);
    }

    #[test]
    fn release_frees_buffer() {
        let mut t = RenderTarget::new(8, 8);
        t.release();
        assert_eq!(t.pixels().len(), 0);
        assert_eq!(t.width(), 0);
        // Sampling a released target is a no-op, not a panic
        assert_eq!(t.sample_uv(0.5, 0.5), [0, 0, 0, 0]);
    }
}
