use glam::Vec2;

/// Threshold below which the spring is considered settled
const SETTLE_EPSILON: f32 = 1e-4;

/// Underdamped 2D spring: F = -stiffness * x - damping * v, returning toward zero
#[derive(Debug, Clone, Copy)]
pub struct Spring2 {
    pub value: Vec2,
    pub velocity: Vec2,
    pub stiffness: f32,
    pub damping: f32,
}

impl Spring2 {
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            value: Vec2::ZERO,
            velocity: Vec2::ZERO,
            stiffness,
            damping,
        }
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        let force = -self.stiffness * self.value - self.damping * self.velocity;
        self.velocity += force * dt;
        self.value += self.velocity * dt;

        // Clamp to exactly zero once the motion is imperceptible
        if self.value.length_squared() < SETTLE_EPSILON * SETTLE_EPSILON
            && self.velocity.length_squared() < SETTLE_EPSILON * SETTLE_EPSILON
        {
            self.value = Vec2::ZERO;
            self.velocity = Vec2::ZERO;
        }
    }

    /// Pull the spring to a fixed displacement, killing any velocity
    pub fn hold(&mut self, value: Vec2) {
        self.value = value;
        self.velocity = Vec2::ZERO;
    }

    /// Release with an initial velocity (e.g. from a drag fling)
    pub fn release(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn is_settled(&self) -> bool {
        self.value == Vec2::ZERO && self.velocity == Vec2::ZERO
    }
}
