use rand::Rng;

use crate::config::AxisRange;

/// Candidate rotation rates, -1.0 to 1.0 in steps of 0.1
pub const ROTATION_GRID: [f32; 21] = [
    -1.0, -0.9, -0.8, -0.7, -0.6, -0.5, -0.4, -0.3, -0.2, -0.1, 0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7,
    0.8, 0.9, 1.0,
];

/// Picks a grid value uniformly, then clamps it into the range.
/// Out-of-range picks collapse onto the nearest bound instead of being re-rolled.
pub fn clamped_random_pick<R: Rng + ?Sized>(range: &AxisRange, rng: &mut R) -> f32 {
    let value = ROTATION_GRID[rng.random_range(0..ROTATION_GRID.len())];
    return range.clamp(value);
}

/// Rounds to the nearest tenth (half away from zero)
pub fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
