//! Per-color force rules.
//!
//! Each rule only computes a velocity increment for this tick; the caller adds
//! it. Dispatch is a total `match` on [`FoodColor`], so every particle always
//! resolves to exactly one rule.

use glam::Vec2;
use rand::Rng;

use crate::api::config::PetConfig;
use crate::api::types::FoodColor;
use crate::components::food::FoodParticle;
use crate::core::math::{direction, dist2, noise};

/// Velocity increment for `foods[index]` this tick.
pub fn impulse<R: Rng + ?Sized>(
    foods: &[FoodParticle],
    index: usize,
    pet_pos: Vec2,
    config: &PetConfig,
    rng: &mut R,
) -> Vec2 {
    let food = &foods[index];
    match food.color {
        FoodColor::Homing => homing(food.pos, pet_pos, config),
        FoodColor::Jitter => Vec2::new(
            noise(rng, config.jitter_strength),
            noise(rng, config.jitter_strength),
        ),
        FoodColor::Floater => Vec2::new(noise(rng, config.floater_drift), -config.floater_lift),
        FoodColor::Flocking => flocking(foods, index, config),
    }
}

fn homing(pos: Vec2, pet_pos: Vec2, config: &PetConfig) -> Vec2 {
    let (dir, d) = direction(pet_pos - pos);
    if d > config.homing_min_distance {
        dir * config.homing_strength
    } else {
        Vec2::ZERO
    }
}

fn flocking(foods: &[FoodParticle], index: usize, config: &PetConfig) -> Vec2 {
    match nearest_same_color(foods, index) {
        Some((j, d2)) if d2 < config.flock_radius_sq => (foods[j].pos - foods[index].pos) * config.flock_strength,
        _ => Vec2::ZERO,
    }
}

/// Index and squared distance of the closest other particle sharing
/// `foods[index]`'s color. Ties go to the lowest index.
pub fn nearest_same_color(foods: &[FoodParticle], index: usize) -> Option<(usize, f32)> {
    let me = &foods[index];
    let mut best: Option<(usize, f32)> = None;
    for (j, other) in foods.iter().enumerate() {
        if j == index || other.color != me.color {
            continue;
        }
        let d2 = dist2(me.pos, other.pos);
        match best {
            Some((_, best_d2)) if d2 >= best_d2 => {}
            _ => best = Some((j, d2)),
        }
    }
    best
}
