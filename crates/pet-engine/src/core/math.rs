// core/math.rs
//
// Small vector helpers shared by every system.
// No dependencies on simulation state.

use glam::Vec2;
use rand::Rng;

/// Squared distance between two points.
#[inline]
pub fn dist2(a: Vec2, b: Vec2) -> f32 {
    let d = a - b;
    d.x * d.x + d.y * d.y
}

/// Clamp `val` into `[min, max]`.
/// Unlike `f32::clamp` this never panics when `min > max`; the lower bound wins,
/// which happens when the viewport is smaller than the sprite being bounded.
#[inline]
pub fn clamp(val: f32, min: f32, max: f32) -> f32 {
    min.max(val.min(max))
}

/// Clamp each component of `v` into `[-limit, limit]`.
#[inline]
pub fn clamp_components(v: Vec2, limit: f32) -> Vec2 {
    Vec2::new(clamp(v.x, -limit, limit), clamp(v.y, -limit, limit))
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Unit vector and length of `v`.
/// A zero-length vector is treated as having length 1 so callers never divide by zero.
#[inline]
pub fn direction(v: Vec2) -> (Vec2, f32) {
    let len = v.length();
    let safe = if len == 0.0 { 1.0 } else { len };
    (v / safe, len)
}

/// Uniform noise centred on zero: a draw from `[-width/2, width/2)`.
#[inline]
pub fn noise<R: Rng + ?Sized>(rng: &mut R, width: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * width
}

/// Uniform draw from `[min, max)`. Returns `min` for an empty range.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}
