//! Food particle physics: integration, gravity, wall bounces and
//! particle-particle overlap resolution.
//!
//! Everything here mutates particle state only. Visual handles are never
//! touched; the simulation syncs them in a separate pass.

use glam::Vec2;

use crate::api::config::PetConfig;
use crate::components::food::FoodParticle;
use crate::core::math::dist2;

/// Advance position by velocity, then apply gravity unless the color is exempt.
pub fn integrate(food: &mut FoodParticle, config: &PetConfig) {
    food.pos += food.vel;
    if food.color.feels_gravity() {
        food.vel.y += config.gravity;
    }
}

/// Keep the particle inside `[0, viewport - food_size]` on both axes.
///
/// Left, right and top walls reflect with `wall_restitution`. The floor is
/// softer and rougher, and snaps slow motion to rest so settled food does not
/// micro-bounce forever.
pub fn collide_walls(food: &mut FoodParticle, viewport: Vec2, config: &PetConfig) {
    let max = viewport - Vec2::splat(config.food_size);

    if food.pos.x < 0.0 {
        food.pos.x = 0.0;
        food.vel.x *= -config.wall_restitution;
    }
    if food.pos.x > max.x {
        food.pos.x = max.x;
        food.vel.x *= -config.wall_restitution;
    }
    if food.pos.y < 0.0 {
        food.pos.y = 0.0;
        food.vel.y *= -config.wall_restitution;
    }
    if food.pos.y > max.y {
        food.pos.y = max.y;
        food.vel.y *= -config.floor_restitution;
        food.vel.x *= config.floor_friction;
        if food.vel.y.abs() < config.floor_snap_vy {
            food.vel.y = 0.0;
        }
        if food.vel.x.abs() < config.floor_snap_vx {
            food.vel.x = 0.0;
        }
    }
}

/// Resolve overlap between two particles. Returns true if they were touching.
///
/// Both are pushed apart along the line of centres by half the overlap, then
/// their velocities are swapped wholesale. The swap is not momentum-exact; it
/// is the intended response.
pub fn resolve_pair(a: &mut FoodParticle, b: &mut FoodParticle, config: &PetConfig) -> bool {
    let min_dist = config.collision_distance;
    let delta = a.pos - b.pos;
    let d2 = dist2(a.pos, b.pos);
    if d2 >= min_dist * min_dist {
        return false;
    }

    // Coincident centres have no line between them: treat the distance as 1
    // and separate along +x.
    let (normal, d) = if d2 == 0.0 {
        (Vec2::X, 1.0)
    } else {
        let d = d2.sqrt();
        (delta / d, d)
    };
    let overlap = min_dist - d;
    let push = normal * (overlap / 2.0);
    a.pos += push;
    b.pos -= push;
    std::mem::swap(&mut a.vel, &mut b.vel);
    true
}

/// Check `foods[index]` against every particle stored before it.
///
/// Walking the store from the back and calling this for each index visits
/// every unordered pair exactly once per tick. Returns the number of contacts.
pub fn collide_with_earlier(foods: &mut [FoodParticle], index: usize, config: &PetConfig) -> usize {
    let (head, tail) = foods.split_at_mut(index);
    let Some(food) = tail.first_mut() else {
        return 0;
    };
    let mut contacts = 0;
    for other in head.iter_mut().rev() {
        if resolve_pair(food, other, config) {
            contacts += 1;
        }
    }
    contacts
}

/// Whether the pet at `pet_pos` is close enough to eat `food`.
pub fn within_reach(food: &FoodParticle, pet_pos: Vec2, config: &PetConfig) -> bool {
    dist2(food.pos, pet_pos) < config.consume_radius * config.consume_radius
}
