use glam::Vec2;

/// Orthographic frustum sized so a square grid fills the viewport,
/// cropping whichever axis overflows ("cover" framing)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFrustum {
    pub half_width: f32,
    pub half_height: f32,
}

impl CoverFrustum {
    /// Compute the frustum for a viewport aspect ratio and a square grid extent
    /// in world units. The shorter viewport axis sees exactly the grid extent;
    /// the longer axis is cropped.
    pub fn cover(viewport_aspect: f32, grid_extent: f32) -> Self {
        if viewport_aspect > 1.0 {
            let half_width = grid_extent / 2.0;
            Self {
                half_width,
                half_height: half_width / viewport_aspect,
            }
        } else {
            let half_height = grid_extent / 2.0;
            Self {
                half_width: half_height * viewport_aspect,
                half_height,
            }
        }
    }

    /// Shrink the frustum by a zoom factor (smaller frustum = zoomed in)
    pub fn zoomed(self, factor: f32) -> Self {
        Self {
            half_width: self.half_width * factor,
            half_height: self.half_height * factor,
        }
    }

    /// Map a world position (grid centered at origin) to pixel coordinates.
    /// World +y is up; pixel +y is down.
    pub fn world_to_screen(&self, world: Vec2, width: u32, height: u32) -> Vec2 {
        let nx = world.x / self.half_width;
        let ny = world.y / self.half_height;
        Vec2::new(
            (nx * 0.5 + 0.5) * width as f32,
            (0.5 - ny * 0.5) * height as f32,
        )
    }

    /// Inverse of `world_to_screen`
    pub fn screen_to_world(&self, screen: Vec2, width: u32, height: u32) -> Vec2 {
        let nx = screen.x / width as f32 * 2.0 - 1.0;
        let ny = 1.0 - screen.y / height as f32 * 2.0;
        Vec2::new(nx * self.half_width, ny * self.half_height)
    }
}

/// Total world-space extent of an n×n grid of cubes with gaps
pub fn grid_extent(grid_size: u32, cube_size: f32, gap: f32) -> f32 {
    (grid_size - 1) as f32 * (cube_size + gap) + cube_size
}

/// World-space center of a tile, for a grid centered at the origin
pub fn tile_center(row: u32, col: u32, grid_size: u32, cube_size: f32, gap: f32) -> Vec2 {
    let extent = grid_extent(grid_size, cube_size, gap);
    let offset = -extent / 2.0 + cube_size / 2.0;
    Vec2::new(
        offset + col as f32 * (cube_size + gap),
        offset + row as f32 * (cube_size + gap),
    )
}

/// Find the tile under a world position, if any
pub fn pick_tile(
    world: Vec2,
    grid_size: u32,
    cube_size: f32,
    gap: f32,
) -> Option<(u32, u32)> {
    let extent = grid_extent(grid_size, cube_size, gap);
    let local_x = world.x + extent / 2.0;
    let local_y = world.y + extent / 2.0;
    if local_x < 0.0 || local_y < 0.0 {
        return None;
    }
    let col = (local_x / (cube_size + gap)) as u32;
    let row = (local_y / (cube_size + gap)) as u32;
    if row < grid_size && col < grid_size {
        Some((row, col))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_wide_viewport_crops_vertically() {
        let f = CoverFrustum::cover(2.0, 30.0);
        assert_eq!(f.half_width, 15.0);
        assert_eq!(f.half_height, 7.5);
    }

    #[test]
    fn cover_tall_viewport_crops_horizontally() {
        let f = CoverFrustum::cover(0.5, 30.0);
        assert_eq!(f.half_height, 15.0);
        assert_eq!(f.half_width, 7.5);
    }

    #[test]
    fn world_screen_round_trip() {
        let f = CoverFrustum::cover(16.0 / 9.0, 30.0);
        let world = Vec2::new(3.2, -5.1);
        let screen = f.world_to_screen(world, 1920, 1080);
        let back = f.screen_to_world(screen, 1920, 1080);
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn screen_center_is_world_origin() {
        let f = CoverFrustum::cover(1.0, 10.0);
        let world = f.screen_to_world(Vec2::new(400.0, 400.0), 800, 800);
        assert!(world.length() < 1e-4);
    }

    #[test]
    fn grid_extent_matches_layout() {
        // 30 cubes of size 1 with 0.01 gaps
        let e = grid_extent(30, 1.0, 0.01);
        assert!((e - (29.0 * 1.01 + 1.0)).abs() < 1e-5);
    }

    #[test]
    fn pick_tile_corners() {
        let extent = grid_extent(10, 1.0, 0.01);
        let half = extent / 2.0;
        // Just inside the bottom-left corner
        assert_eq!(
            pick_tile(Vec2::new(-half + 0.1, -half + 0.1), 10, 1.0, 0.01),
            Some((0, 0))
        );
        // Just inside the top-right corner
        assert_eq!(
            pick_tile(Vec2::new(half - 0.1, half - 0.1), 10, 1.0, 0.01),
            Some((9, 9))
        );
        // Outside
        assert_eq!(pick_tile(Vec2::new(half + 1.0, 0.0), 10, 1.0, 0.01), None);
    }

    #[test]
    fn pick_tile_matches_tile_center() {
        for row in [0u32, 3, 9] {
            for col in [0u32, 5, 9] {
                let c = tile_center(row, col, 10, 1.0, 0.01);
                assert_eq!(pick_tile(c, 10, 1.0, 0.01), Some((row, col)));
            }
        }
    }
}
