/// Cubic ease-in-out over [0, 1]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// One step of exponential smoothing: move `current` toward `target` by factor `k`
pub fn low_pass(current: f32, target: f32, k: f32) -> f32 {
    current + (target - current) * k
}
