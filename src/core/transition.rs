use crate::math::{ease_in_out_cubic, Color};

// Grid settings
pub const GRID_SIZE: u32 = 30;
pub const CUBE_SIZE: f32 = 1.0;
pub const GAP: f32 = 0.01;

// Drag interaction settings
pub const DRAG_THRESHOLD: f32 = 150.0; // pixels to drag before committing to advance

// Animation settings
pub const ANIMATION_SPEED: f32 = 1.5; // progress units per second while auto-animating
pub const AUTOPLAY_DELAY: f32 = 2.0; // seconds between automatic advances
pub const FIRST_AUTOPLAY_DELAY: f32 = 1.0; // delay before the very first advance

// Fraction of total progress consumed by staggering the diagonal wave.
// Every tile's local window has width 1 - WAVE_SPREAD.
const WAVE_SPREAD: f32 = 0.3;

/// Direction a transition sweeps through the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// One cell of the transition grid
#[derive(Debug, Clone)]
pub struct Tile {
    pub row: u32,
    pub col: u32,
    /// Rotation about the vertical axis, radians
    pub rotation: f32,
    /// Pop-out offset toward the camera
    pub z_offset: f32,
    /// Ripple state, recomputed every frame by the ripple engine
    pub ripple_color: Option<Color>,
    pub ripple_intensity: f32,
}

impl Tile {
    fn new(row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            rotation: 0.0,
            z_offset: 0.0,
            ripple_color: None,
            ripple_intensity: 0.0,
        }
    }
}

/// Outcome of an `advance` step worth reacting to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    /// The flip completed; `slide` is the new current slide
    Committed { slide: usize },
    /// A snapped-back drag settled at zero
    Cancelled,
}

/// Anti-diagonal index of a tile: tiles on the same diagonal flip together,
/// later diagonals start later. Backward sweeps mirror the diagonal.
pub fn diagonal_index(row: u32, col: u32, grid_size: u32, direction: Direction) -> u32 {
    let flipped_row = grid_size - 1 - row;
    match direction {
        Direction::Forward => col + flipped_row,
        Direction::Backward => (grid_size - 1 - col) + row,
    }
}

/// Local progress window [start, end] for a tile's diagonal
pub fn tile_window(diag: u32, max_diag: u32) -> (f32, f32) {
    let normalized = diag as f32 / max_diag as f32;
    let start = normalized * WAVE_SPREAD;
    (start, start + (1.0 - WAVE_SPREAD))
}

/// Owns the tile grid and drives the diagonal-wave flip between slides.
///
/// Exactly one of {idle, dragging, auto-animating} holds at any time.
/// Pointer handlers mutate the drag state; `advance` integrates progress,
/// commits or cancels, and writes per-tile transforms.
pub struct TransitionEngine {
    grid_size: u32,
    slide_count: usize,
    tiles: Vec<Tile>,

    current_slide: usize,
    direction: Direction,
    progress: f32,
    target: f32,
    auto_animating: bool,

    dragging: bool,
    drag_start_x: f32,
    last_drag_direction: Option<Direction>,

    autoplay_countdown: Option<f32>,

    /// Slide shown on the resting faces of every tile
    front_slide: usize,
    /// Slide preloaded on the side faces, revealed mid-flip
    side_slide: usize,
}

impl TransitionEngine {
    /// Precondition: `slide_count >= 1`, `grid_size >= 2`
    pub fn new(grid_size: u32, slide_count: usize) -> Self {
        assert!(slide_count >= 1, "at least one slide is required");
        assert!(grid_size >= 2, "grid needs at least 2x2 tiles");

        let mut tiles = Vec::with_capacity((grid_size * grid_size) as usize);
        for row in 0..grid_size {
            for col in 0..grid_size {
                tiles.push(Tile::new(row, col));
            }
        }

        Self {
            grid_size,
            slide_count,
            tiles,
            current_slide: 0,
            direction: Direction::Forward,
            progress: 0.0,
            target: 0.0,
            auto_animating: false,
            dragging: false,
            drag_start_x: 0.0,
            last_drag_direction: None,
            autoplay_countdown: Some(FIRST_AUTOPLAY_DELAY),
            front_slide: 0,
            side_slide: 1 % slide_count,
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    /// Slide on the resting tile faces
    pub fn front_slide(&self) -> usize {
        self.front_slide
    }

    /// Slide on the side faces (the one a flip reveals)
    pub fn side_slide(&self) -> usize {
        self.side_slide
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_auto_animating(&self) -> bool {
        self.auto_animating
    }

    pub fn is_idle(&self) -> bool {
        !self.dragging && !self.auto_animating
    }

    pub fn autoplay_pending(&self) -> bool {
        self.autoplay_countdown.is_some()
    }

    fn next_index(&self, direction: Direction) -> usize {
        match direction {
            Direction::Forward => (self.current_slide + 1) % self.slide_count,
            Direction::Backward => {
                (self.current_slide + self.slide_count - 1) % self.slide_count
            }
        }
    }

    /// Queue an automatic forward advance after `delay` seconds
    pub fn schedule_autoplay(&mut self, delay: f32) {
        self.autoplay_countdown = Some(delay);
    }

    pub fn cancel_autoplay(&mut self) {
        self.autoplay_countdown = None;
    }

    /// Begin an automatic advance immediately. No-op unless idle at rest.
    pub fn start_auto_advance(&mut self, direction: Direction) -> bool {
        if self.dragging || self.auto_animating || self.progress != 0.0 {
            return false;
        }
        self.direction = direction;
        self.side_slide = self.next_index(direction);
        self.target = 1.0;
        self.auto_animating = true;
        true
    }

    /// Pointer down at pixel x. Ignored while an auto-animation is in flight.
    pub fn begin_drag(&mut self, x: f32) {
        if self.auto_animating {
            return;
        }
        self.dragging = true;
        self.drag_start_x = x;
        self.last_drag_direction = None;
        self.cancel_autoplay();
    }

    /// Pointer moved to pixel x while dragging. Drag only ever controls the
    /// first half of the transition; release decides completion.
    pub fn drag_to(&mut self, x: f32) {
        if !self.dragging || self.auto_animating {
            return;
        }
        let delta = x - self.drag_start_x;
        let new_direction = if delta < 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };

        if self.last_drag_direction != Some(new_direction) {
            self.last_drag_direction = Some(new_direction);
            self.direction = new_direction;
            self.side_slide = self.next_index(new_direction);
        }

        let drag_progress = (delta.abs() / DRAG_THRESHOLD).min(1.0) * 0.5;
        self.progress = drag_progress;
        self.target = drag_progress;
    }

    /// Pointer released: commit past the midpoint, snap back otherwise
    pub fn end_drag(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;

        if self.progress >= 0.5 {
            self.target = 1.0;
            self.auto_animating = true;
        } else if self.progress > 0.0 {
            self.target = 0.0;
            self.auto_animating = true;
        } else {
            // Released at rest: transforms from the last nonzero-progress
            // frame would otherwise linger, since advance skips them at 0
            self.reset_transforms();
            self.schedule_autoplay(AUTOPLAY_DELAY);
        }
    }

    /// Pointer left the container mid-drag
    pub fn pointer_leave(&mut self) {
        if self.dragging {
            self.end_drag();
        }
    }

    /// Advance by `dt` seconds: tick the autoplay countdown, integrate
    /// progress toward the target, commit/cancel at the extremes, and write
    /// per-tile transforms.
    pub fn advance(&mut self, dt: f32) -> Option<TransitionEvent> {
        if let Some(remaining) = self.autoplay_countdown {
            if self.is_idle() && self.progress == 0.0 {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.autoplay_countdown = None;
                    self.start_auto_advance(Direction::Forward);
                } else {
                    self.autoplay_countdown = Some(remaining);
                }
            }
        }

        let mut event = None;
        if self.auto_animating {
            if self.progress < self.target {
                self.progress = (self.progress + dt * ANIMATION_SPEED).min(self.target);
            } else if self.progress > self.target {
                self.progress = (self.progress - dt * ANIMATION_SPEED).max(self.target);
            }

            if self.progress == self.target {
                if self.target >= 1.0 {
                    event = Some(self.complete_transition());
                } else if self.target == 0.0 {
                    self.auto_animating = false;
                    self.reset_transforms();
                    self.schedule_autoplay(AUTOPLAY_DELAY);
                    event = Some(TransitionEvent::Cancelled);
                }
            }
        }

        if (self.dragging || self.auto_animating) && self.progress > 0.0 {
            self.apply_transforms();
        }

        event
    }

    fn complete_transition(&mut self) -> TransitionEvent {
        self.current_slide = self.next_index(self.direction);
        self.progress = 0.0;
        self.target = 0.0;
        self.front_slide = self.current_slide;
        self.reset_transforms();
        self.auto_animating = false;
        self.schedule_autoplay(AUTOPLAY_DELAY);
        TransitionEvent::Committed {
            slide: self.current_slide,
        }
    }

    fn apply_transforms(&mut self) {
        let max_diagonal = (self.grid_size - 1) * 2;
        let sign = self.direction.sign();
        let progress = self.progress;
        let direction = self.direction;
        let grid_size = self.grid_size;

        for tile in &mut self.tiles {
            let diag = diagonal_index(tile.row, tile.col, grid_size, direction);
            let (start, end) = tile_window(diag, max_diagonal);

            let local = if progress > start {
                ((progress - start) / (end - start)).min(1.0)
            } else {
                0.0
            };

            if local > 0.0 {
                let eased = ease_in_out_cubic(local);
                tile.rotation = eased * std::f32::consts::FRAC_PI_2 * sign;
                tile.z_offset = (local * std::f32::consts::PI).sin() * CUBE_SIZE;
            } else {
                tile.rotation = 0.0;
                tile.z_offset = 0.0;
            }
        }
    }

    fn reset_transforms(&mut self) {
        for tile in &mut self.tiles {
            tile.rotation = 0.0;
            tile.z_offset = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_index_forward_sweeps_from_top_left() {
        // Top-left tile (row N-1, col 0) is on diagonal 0
        assert_eq!(diagonal_index(3, 0, 4, Direction::Forward), 0);
        // Bottom-right tile is on the last diagonal
        assert_eq!(diagonal_index(0, 3, 4, Direction::Forward), 6);
    }

    #[test]
    fn diagonal_index_backward_mirrors() {
        assert_eq!(diagonal_index(3, 0, 4, Direction::Backward), 6);
        assert_eq!(diagonal_index(0, 3, 4, Direction::Backward), 0);
    }

    #[test]
    fn windows_share_width() {
        let (s0, e0) = tile_window(0, 6);
        let (s6, e6) = tile_window(6, 6);
        assert!((e0 - s0 - (e6 - s6)).abs() < 1e-6);
        assert_eq!(s0, 0.0);
        assert!((e6 - 1.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "at least one slide")]
    fn zero_slides_is_invalid() {
        TransitionEngine::new(4, 0);
    }

    #[test]
    fn starts_idle_with_autoplay_scheduled() {
        let engine = TransitionEngine::new(4, 2);
        assert!(engine.is_idle());
        assert!(engine.autoplay_pending());
        assert_eq!(engine.current_slide(), 0);
        assert_eq!(engine.side_slide(), 1);
    }

    #[test]
    fn autoplay_fires_after_delay() {
        let mut engine = TransitionEngine::new(4, 2);
        engine.advance(FIRST_AUTOPLAY_DELAY - 0.1);
        assert!(engine.is_idle());
        engine.advance(0.2);
        assert!(engine.is_auto_animating());
        assert_eq!(engine.direction(), Direction::Forward);
    }

    #[test]
    fn drag_ignored_while_auto_animating() {
        let mut engine = TransitionEngine::new(4, 2);
        engine.cancel_autoplay();
        engine.start_auto_advance(Direction::Forward);
        engine.advance(0.1);

        let progress_before = engine.progress();
        engine.begin_drag(100.0);
        assert!(!engine.is_dragging());
        engine.drag_to(300.0);
        assert_eq!(engine.progress(), progress_before);
    }

    #[test]
    fn drag_direction_can_flip_mid_drag() {
        let mut engine = TransitionEngine::new(4, 3);
        engine.cancel_autoplay();
        engine.begin_drag(100.0);

        engine.drag_to(40.0); // leftward: forward
        assert_eq!(engine.direction(), Direction::Forward);
        assert_eq!(engine.side_slide(), 1);

        engine.drag_to(160.0); // rightward: backward, re-fetch incoming face
        assert_eq!(engine.direction(), Direction::Backward);
        assert_eq!(engine.side_slide(), 2);
    }

    #[test]
    fn release_at_rest_just_reschedules() {
        let mut engine = TransitionEngine::new(4, 2);
        engine.begin_drag(50.0);
        assert!(!engine.autoplay_pending());
        engine.end_drag();
        assert!(engine.is_idle());
        assert!(engine.autoplay_pending());
    }

    #[test]
    fn release_at_rest_clears_lingering_transforms() {
        let mut engine = TransitionEngine::new(4, 2);
        engine.begin_drag(100.0);
        engine.drag_to(40.0);
        engine.advance(0.016);
        assert!(engine.tiles().iter().any(|t| t.rotation != 0.0));

        // Back to the start pixel, then release at exactly zero progress
        engine.drag_to(100.0);
        engine.end_drag();
        assert!(engine.is_idle());
        assert!(engine.tiles().iter().all(|t| t.rotation == 0.0 && t.z_offset == 0.0));
    }

    #[test]
    fn pointer_leave_acts_as_release() {
        let mut engine = TransitionEngine::new(4, 2);
        engine.begin_drag(200.0);
        engine.drag_to(200.0 - DRAG_THRESHOLD);
        engine.pointer_leave();
        assert!(!engine.is_dragging());
        assert!(engine.is_auto_animating());
    }

    #[test]
    fn transforms_reset_when_cancelled() {
        let mut engine = TransitionEngine::new(4, 2);
        engine.begin_drag(100.0);
        engine.drag_to(60.0);
        engine.advance(0.016);
        assert!(engine.tiles().iter().any(|t| t.rotation != 0.0));

        engine.end_drag();
        // Let the snap-back settle
        for _ in 0..200 {
            engine.advance(0.016);
        }
        assert!(engine.is_idle());
        assert!(engine.tiles().iter().all(|t| t.rotation == 0.0 && t.z_offset == 0.0));
    }

    #[test]
    fn backward_commit_wraps_to_last_slide() {
        let mut engine = TransitionEngine::new(4, 3);
        engine.cancel_autoplay();
        engine.start_auto_advance(Direction::Backward);
        let mut committed = None;
        for _ in 0..200 {
            if let Some(TransitionEvent::Committed { slide }) = engine.advance(0.016) {
                committed = Some(slide);
                break;
            }
        }
        assert_eq!(committed, Some(2));
        assert_eq!(engine.current_slide(), 2);
        assert_eq!(engine.front_slide(), 2);
    }
}
