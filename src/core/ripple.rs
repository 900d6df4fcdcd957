use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::transition::Tile;
use crate::math::Color;

// Ripple wave settings
pub const SPREAD_DROPOFF: f32 = 0.85; // probability multiplier per ring (higher = spreads further)
pub const WAVE_SPEED: f32 = 30.0; // tiles per second for the wave front
pub const COLOR_FADE_DURATION: f64 = 0.5; // seconds for an activated color to fade out
pub const WAVE_WIDTH: f32 = 4.0; // width of the glowing wave front, in tiles
pub const COLOR_INTENSITY: f32 = 0.3; // max emissive strength applied to tile faces

/// Bright palette the waves pick tile colors from
pub const RIPPLE_COLORS: [u32; 10] = [
    0xff0055, // hot pink
    0x00ff88, // neon green
    0xff3300, // orange-red
    0x00ffff, // cyan
    0xff00ff, // magenta
    0xffff00, // yellow
    0x0088ff, // electric blue
    0xff0000, // red
    0x00ff00, // green
    0xff8800, // orange
];

#[derive(Debug, Clone)]
struct ActivatedTile {
    color: Color,
    activated_at: f64,
}

/// One expanding wave. Rings are probabilistic: each tile on a newly
/// reached ring joins with probability `SPREAD_DROPOFF^ring`, so waves
/// thin out organically instead of flooding the grid.
#[derive(Debug)]
struct Wave {
    origin_row: u32,
    origin_col: u32,
    start_time: f64,
    affected: HashMap<(u32, u32), ActivatedTile>,
    processed_rings: HashSet<u32>,
}

impl Wave {
    fn radius(&self, now: f64) -> f32 {
        ((now - self.start_time) as f32) * WAVE_SPEED
    }

    fn expired(&self, now: f64, grid_size: u32) -> bool {
        let max_dist = grid_size as f64 * 1.5;
        now - self.start_time > max_dist / WAVE_SPEED as f64 + COLOR_FADE_DURATION
    }
}

/// Drives click-triggered color waves across the tile grid.
///
/// Every frame, `process` resets the per-tile ripple state and rebuilds it
/// from the active waves, so intensities never accumulate between frames.
/// The RNG is injectable so wave shapes can be reproduced in tests.
pub struct RippleEngine {
    grid_size: u32,
    waves: Vec<Wave>,
    rng: StdRng,
}

impl RippleEngine {
    pub fn new(grid_size: u32) -> Self {
        Self::with_rng(grid_size, StdRng::from_entropy())
    }

    pub fn with_seed(grid_size: u32, seed: u64) -> Self {
        Self::with_rng(grid_size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid_size: u32, rng: StdRng) -> Self {
        Self {
            grid_size,
            waves: Vec::new(),
            rng,
        }
    }

    pub fn active_wave_count(&self) -> usize {
        self.waves.len()
    }

    fn random_color(&mut self) -> Color {
        let hex = RIPPLE_COLORS[self.rng.gen_range(0..RIPPLE_COLORS.len())];
        Color::from_hex(hex)
    }

    /// Start a wave at the given tile. The origin activates immediately.
    pub fn trigger(&mut self, row: u32, col: u32, now: f64) {
        let color = self.random_color();
        let mut affected = HashMap::new();
        affected.insert(
            (row, col),
            ActivatedTile {
                color,
                activated_at: now,
            },
        );
        let mut processed_rings = HashSet::new();
        processed_rings.insert(0);

        self.waves.push(Wave {
            origin_row: row,
            origin_col: col,
            start_time: now,
            affected,
            processed_rings,
        });
    }

    /// Expand active waves, rewrite every tile's ripple color and intensity,
    /// and drop waves that have fully faded.
    pub fn process(&mut self, tiles: &mut [Tile], now: f64) {
        for tile in tiles.iter_mut() {
            tile.ripple_intensity = 0.0;
            tile.ripple_color = None;
        }

        for w in 0..self.waves.len() {
            self.expand_wave(w, tiles, now);
            self.apply_wave(w, tiles, now);
        }

        let grid_size = self.grid_size;
        self.waves.retain(|wave| !wave.expired(now, grid_size));
    }

    /// Activate tiles on rings the wave front has newly reached. Each ring
    /// is processed exactly once per wave.
    fn expand_wave(&mut self, w: usize, tiles: &[Tile], now: f64) {
        let radius = self.waves[w].radius(now);
        let max_ring = ((radius.ceil() as u32) + 1).min(self.grid_size * 2 - 1);

        for ring in 0..=max_ring {
            if self.waves[w].processed_rings.contains(&ring) {
                continue;
            }
            if radius < ring as f32 {
                continue;
            }
            self.waves[w].processed_rings.insert(ring);

            let spread_probability = SPREAD_DROPOFF.powi(ring as i32);
            let origin_row = self.waves[w].origin_row;
            let origin_col = self.waves[w].origin_col;

            for tile in tiles {
                let dx = tile.col as f32 - origin_col as f32;
                let dy = tile.row as f32 - origin_row as f32;
                let dist = (dx * dx + dy * dy).sqrt();
                if (dist - ring as f32).abs() >= 0.5 {
                    continue;
                }

                let key = (tile.row, tile.col);
                if self.waves[w].affected.contains_key(&key) {
                    continue;
                }
                if self.rng.gen::<f32>() < spread_probability {
                    let color = self.random_color();
                    self.waves[w].affected.insert(
                        key,
                        ActivatedTile {
                            color,
                            activated_at: now,
                        },
                    );
                }
            }
        }
    }

    /// Write wave intensity into the tiles: strong while the front passes,
    /// then a time-based fade. A brighter wave wins on overlap.
    fn apply_wave(&self, w: usize, tiles: &mut [Tile], now: f64) {
        let wave = &self.waves[w];
        let radius = wave.radius(now);
        let grid_size = self.grid_size;

        for ((row, col), activated) in &wave.affected {
            let index = (row * grid_size + col) as usize;
            let Some(tile) = tiles.get_mut(index) else {
                continue;
            };

            let dx = *col as f32 - wave.origin_col as f32;
            let dy = *row as f32 - wave.origin_row as f32;
            let dist = (dx * dx + dy * dy).sqrt();

            let dist_from_front = (dist - radius).abs();
            let wave_intensity = if dist_from_front < WAVE_WIDTH {
                1.0 - dist_from_front / WAVE_WIDTH
            } else {
                0.0
            };

            let time_fade =
                (1.0 - (now - activated.activated_at) / COLOR_FADE_DURATION).max(0.0) as f32;

            let intensity = (wave_intensity * 0.8).max(time_fade * 0.5);
            if intensity > tile.ripple_intensity {
                tile.ripple_intensity = intensity;
                tile.ripple_color = Some(activated.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: u32) -> Vec<Tile> {
        crate::core::transition::TransitionEngine::new(n, 1)
            .tiles()
            .to_vec()
    }

    fn tile_at(tiles: &[Tile], n: u32, row: u32, col: u32) -> &Tile {
        &tiles[(row * n + col) as usize]
    }

    #[test]
    fn origin_lights_up_immediately() {
        let mut ripple = RippleEngine::with_seed(10, 7);
        let mut tiles = grid(10);

        ripple.trigger(5, 5, 0.0);
        ripple.process(&mut tiles, 0.0);

        let origin = tile_at(&tiles, 10, 5, 5);
        assert!(origin.ripple_color.is_some());
        assert!((origin.ripple_intensity - 0.8).abs() < 1e-6);
    }

    #[test]
    fn intensity_resets_every_frame() {
        let mut ripple = RippleEngine::with_seed(10, 7);
        let mut tiles = grid(10);

        ripple.trigger(0, 0, 0.0);
        ripple.process(&mut tiles, 0.0);
        // Long after every wave is gone
        ripple.process(&mut tiles, 100.0);

        assert!(tiles.iter().all(|t| t.ripple_intensity == 0.0));
        assert!(tiles.iter().all(|t| t.ripple_color.is_none()));
        assert_eq!(ripple.active_wave_count(), 0);
    }

    #[test]
    fn distant_rings_activate_only_after_front_arrives() {
        let mut ripple = RippleEngine::with_seed(20, 1);
        let mut tiles = grid(20);

        ripple.trigger(0, 0, 0.0);
        // Front has moved 3 tiles; ring 10 must still be dark
        ripple.process(&mut tiles, 0.1);

        for tile in &tiles {
            let dist = ((tile.col * tile.col + tile.row * tile.row) as f32).sqrt();
            if dist > 4.5 {
                assert_eq!(
                    tile.ripple_intensity, 0.0,
                    "tile ({}, {}) lit before the front reached it",
                    tile.row, tile.col
                );
            }
        }
    }

    #[test]
    fn activated_tiles_fade_out() {
        let mut ripple = RippleEngine::with_seed(10, 7);
        let mut tiles = grid(10);

        ripple.trigger(5, 5, 0.0);
        ripple.process(&mut tiles, 0.0);
        let fresh = tile_at(&tiles, 10, 5, 5).ripple_intensity;

        // Front well past, fade mostly elapsed
        ripple.process(&mut tiles, 0.45);
        let faded = tile_at(&tiles, 10, 5, 5).ripple_intensity;

        assert!(faded < fresh);
        assert!(faded > 0.0);
    }

    #[test]
    fn overlapping_waves_keep_the_brighter() {
        let mut ripple = RippleEngine::with_seed(10, 3);
        let mut tiles = grid(10);

        // Old wave nearly faded, then a fresh one on the same tile
        ripple.trigger(5, 5, 0.0);
        ripple.trigger(5, 5, 0.4);
        ripple.process(&mut tiles, 0.4);

        let origin = tile_at(&tiles, 10, 5, 5);
        assert!((origin.ripple_intensity - 0.8).abs() < 1e-6);
    }

    #[test]
    fn seeded_waves_reproduce() {
        let mut a = RippleEngine::with_seed(16, 42);
        let mut b = RippleEngine::with_seed(16, 42);
        let mut tiles_a = grid(16);
        let mut tiles_b = grid(16);

        a.trigger(8, 8, 0.0);
        b.trigger(8, 8, 0.0);
        for step in 1..=20 {
            let now = step as f64 * 0.016;
            a.process(&mut tiles_a, now);
            b.process(&mut tiles_b, now);
        }

        for (ta, tb) in tiles_a.iter().zip(&tiles_b) {
            assert_eq!(ta.ripple_intensity, tb.ripple_intensity);
            assert_eq!(ta.ripple_color, tb.ripple_color);
        }
    }

    #[test]
    fn waves_expire() {
        let mut ripple = RippleEngine::with_seed(10, 7);
        let mut tiles = grid(10);

        ripple.trigger(5, 5, 0.0);
        assert_eq!(ripple.active_wave_count(), 1);

        // 1.5 * 10 / 30 + 0.5 = 1.0 seconds of life
        ripple.process(&mut tiles, 0.9);
        assert_eq!(ripple.active_wave_count(), 1);
        ripple.process(&mut tiles, 1.1);
        assert_eq!(ripple.active_wave_count(), 0);
    }
}
