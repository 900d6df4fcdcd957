use glam::{Vec2, Vec3};

use crate::core::render_target::RenderTarget;
use crate::math::{low_pass, Color};
use crate::traits::Scene;

const COLOR_INNER: u32 = 0xff6b6b;
const COLOR_OUTER: u32 = 0x4ecdc4;
const BACKGROUND: u32 = 0x1a1a2e;

const SIZE: f32 = 2.0;
const PROJECTION_DISTANCE: f32 = 4.0; // 4D perspective distance
const CAMERA_DISTANCE: f32 = 6.0;
const CAMERA_FOV: f32 = 50.0; // degrees, vertical

const DASH_SIZE: f32 = 0.15; // world units
const GAP_SIZE: f32 = 0.05;

const POINTER_SMOOTHING: f32 = 0.022;

/// All 16 vertices of a tesseract, one per bit pattern
fn tesseract_vertices() -> [[f32; 4]; 16] {
    let s = SIZE / 2.0;
    let mut vertices = [[0.0; 4]; 16];
    for (i, v) in vertices.iter_mut().enumerate() {
        *v = [
            if i & 1 != 0 { s } else { -s },
            if i & 2 != 0 { s } else { -s },
            if i & 4 != 0 { s } else { -s },
            if i & 8 != 0 { s } else { -s },
        ];
    }
    vertices
}

/// Edges connect vertices differing in exactly one coordinate. Grouped by
/// the w bits of their endpoints: both negative (inner cube), both positive
/// (outer cube), or one of each (connecting struts).
fn tesseract_edges() -> (Vec<(usize, usize)>, Vec<(usize, usize)>, Vec<(usize, usize)>) {
    let mut inner = Vec::new();
    let mut outer = Vec::new();
    let mut connecting = Vec::new();

    for i in 0..16usize {
        for j in (i + 1)..16 {
            let diff = i ^ j;
            if !matches!(diff, 1 | 2 | 4 | 8) {
                continue;
            }
            let i_w = i & 8 != 0;
            let j_w = j & 8 != 0;
            if !i_w && !j_w {
                inner.push((i, j));
            } else if i_w && j_w {
                outer.push((i, j));
            } else {
                connecting.push((i, j));
            }
        }
    }

    (inner, outer, connecting)
}

/// Perspective-project a 4D point to 3D after rotating it through the
/// x-w, y-w and z-w planes by the same angle
fn project_4d(point: [f32; 4], angle: f32) -> Vec3 {
    let [x, y, z, w] = point;
    let (sin_a, cos_a) = angle.sin_cos();

    let xr = x * cos_a - w * sin_a;
    let wr = x * sin_a + w * cos_a;

    let yr = y * cos_a - wr * sin_a;
    let wr = y * sin_a + wr * cos_a;

    let zr = z * cos_a - wr * sin_a;
    let wr = z * sin_a + wr * cos_a;

    let scale = PROJECTION_DISTANCE / (PROJECTION_DISTANCE - wr);
    Vec3::new(xr * scale, yr * scale, zr * scale)
}

/// 4D hypercube wireframe, projected twice: 4D to 3D by perspective
/// division on w, then 3D to the screen through a simple pinhole camera.
/// The pointer perturbs both the 4D rotation rate and the 3D orientation.
pub struct HypercubeScene {
    vertices: [[f32; 4]; 16],
    inner: Vec<(usize, usize)>,
    outer: Vec<(usize, usize)>,
    connecting: Vec<(usize, usize)>,

    color_inner: Color,
    color_outer: Color,
    color_mid: Color,
    background: Color,

    pointer: Vec2,
    target_pointer: Vec2,
    base_rotation: f32,
    angle_4d: f32,
}

impl HypercubeScene {
    pub fn new(swapped: bool) -> Self {
        let (inner, outer, connecting) = tesseract_edges();
        let (color_inner, color_outer) = if swapped {
            (Color::from_hex(COLOR_OUTER), Color::from_hex(COLOR_INNER))
        } else {
            (Color::from_hex(COLOR_INNER), Color::from_hex(COLOR_OUTER))
        };

        Self {
            vertices: tesseract_vertices(),
            inner,
            outer,
            connecting,
            color_mid: color_inner.lerp(color_outer, 0.5),
            color_inner,
            color_outer,
            background: Color::from_hex(BACKGROUND),
            pointer: Vec2::ZERO,
            target_pointer: Vec2::ZERO,
            base_rotation: 0.0,
            angle_4d: 0.0,
        }
    }

    fn draw_edges(
        &self,
        target: &mut RenderTarget,
        projected: &[Vec3; 16],
        edges: &[(usize, usize)],
        color: Color,
        alpha: f32,
        scale: f32,
    ) {
        let w = target.width() as f32;
        let h = target.height() as f32;
        let cx = w / 2.0;
        let cy = h / 2.0;
        let focal = (h / 2.0) / (CAMERA_FOV.to_radians() / 2.0).tan();

        let rgba = color.to_rgba8(alpha);
        for &(a, b) in edges {
            let pa = projected[a] * scale;
            let pb = projected[b] * scale;

            let depth_a = CAMERA_DISTANCE - pa.z;
            let depth_b = CAMERA_DISTANCE - pb.z;
            if depth_a <= 0.1 || depth_b <= 0.1 {
                continue;
            }

            let x1 = cx + pa.x * focal / depth_a;
            let y1 = cy - pa.y * focal / depth_a;
            let x2 = cx + pb.x * focal / depth_b;
            let y2 = cy - pb.y * focal / depth_b;

            // Dash lengths in pixels at the edge's average depth
            let px_per_unit = focal / (0.5 * (depth_a + depth_b));
            target.dashed_line(
                x1 as i32,
                y1 as i32,
                x2 as i32,
                y2 as i32,
                DASH_SIZE * px_per_unit,
                GAP_SIZE * px_per_unit,
                rgba,
            );
        }
    }
}

impl Scene for HypercubeScene {
    fn update(&mut self, dt: f32) {
        self.pointer.x = low_pass(self.pointer.x, self.target_pointer.x, POINTER_SMOOTHING);
        self.pointer.y = low_pass(self.pointer.y, self.target_pointer.y, POINTER_SMOOTHING);

        self.base_rotation += dt * 0.2;
        self.angle_4d += dt * 0.3;
    }

    fn render(&mut self, target: &mut RenderTarget) {
        target.clear(self.background, 1.0);

        // Pointer distance from center speeds the 4D tumble up slightly
        let influence = 1.0 + self.pointer.x.abs() * 0.1;
        let angle = self.angle_4d * influence;

        let rot_x = self.base_rotation + self.pointer.y * std::f32::consts::PI * 0.075;
        let rot_y = self.base_rotation * 0.7 + self.pointer.x * std::f32::consts::PI * 0.115;
        let (sin_x, cos_x) = rot_x.sin_cos();
        let (sin_y, cos_y) = rot_y.sin_cos();

        let mut projected = [Vec3::ZERO; 16];
        for (i, vertex) in self.vertices.iter().enumerate() {
            let p = project_4d(*vertex, angle);
            // Group orientation: rotate about x, then y
            let y1 = p.y * cos_x - p.z * sin_x;
            let z1 = p.y * sin_x + p.z * cos_x;
            let x2 = p.x * cos_y + z1 * sin_y;
            let z2 = -p.x * sin_y + z1 * cos_y;
            projected[i] = Vec3::new(x2, y1, z2);
        }

        // Glow duplicates first, slightly scaled up and faint
        self.draw_edges(target, &projected, &self.inner, self.color_inner, 0.3, 1.02);
        self.draw_edges(target, &projected, &self.outer, self.color_outer, 0.3, 1.02);
        self.draw_edges(target, &projected, &self.connecting, self.color_mid, 0.2, 1.02);

        self.draw_edges(target, &projected, &self.inner, self.color_inner, 0.9, 1.0);
        self.draw_edges(target, &projected, &self.outer, self.color_outer, 0.9, 1.0);
        self.draw_edges(target, &projected, &self.connecting, self.color_mid, 0.7, 1.0);
    }

    fn pointer_moved(&mut self, x: f32, y: f32) {
        self.target_pointer = Vec2::new(x, y);
    }

    fn name(&self) -> &str {
        "Hypercube"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tesseract_has_32_edges() {
        let (inner, outer, connecting) = tesseract_edges();
        assert_eq!(inner.len(), 12);
        assert_eq!(outer.len(), 12);
        assert_eq!(connecting.len(), 8);
    }

    #[test]
    fn projection_at_zero_angle_drops_w() {
        let p = project_4d([1.0, 0.5, -0.5, 0.0], 0.0);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 0.5).abs() < 1e-6);
        assert!((p.z + 0.5).abs() < 1e-6);
    }

    #[test]
    fn outer_cube_projects_larger() {
        // w = +s vertices sit closer to the 4D camera, so they scale up
        let inner = project_4d([1.0, 1.0, 1.0, -1.0], 0.0);
        let outer = project_4d([1.0, 1.0, 1.0, 1.0], 0.0);
        assert!(outer.length() > inner.length());
    }

    #[test]
    fn renders_something_on_the_background() {
        let mut scene = HypercubeScene::new(false);
        let mut target = RenderTarget::new(128, 128);
        scene.update(0.016);
        scene.render(&mut target);

        let bg = Color::from_hex(BACKGROUND).to_rgba8(1.0);
        let non_bg = target
            .pixels()
            .chunks_exact(4)
            .filter(|p| *p != &bg[..])
            .count();
        assert!(non_bg > 100, "wireframe pixels drawn: {non_bg}");
    }

    #[test]
    fn pointer_smoothing_lags_target() {
        let mut scene = HypercubeScene::new(false);
        scene.pointer_moved(1.0, 0.0);
        scene.update(0.016);
        assert!(scene.pointer.x > 0.0);
        assert!(scene.pointer.x < 0.1);
    }
}
