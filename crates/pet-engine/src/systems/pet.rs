//! Pet controller: seek a pointer target or wander, then integrate and bounce
//! off the viewport edges.

use glam::Vec2;
use rand::Rng;

use crate::api::config::PetConfig;
use crate::components::pet::Pet;
use crate::core::math::{clamp_components, direction, noise};

/// Advance the pet by one tick inside a viewport of size `viewport`.
pub fn update_pet<R: Rng + ?Sized>(pet: &mut Pet, viewport: Vec2, config: &PetConfig, rng: &mut R) {
    steer(pet, config, rng);
    pet.vel = clamp_components(pet.vel, config.pet_max_speed);
    pet.pos += pet.vel;
    bounce(pet, viewport, config.pet_size);
}

/// Add this tick's impulse: toward the target while seeking, random while wandering.
/// Reaching the target clears it.
pub fn steer<R: Rng + ?Sized>(pet: &mut Pet, config: &PetConfig, rng: &mut R) {
    match pet.target {
        Some(target) => {
            let (dir, d) = direction(target - pet.pos);
            if d > config.arrive_radius {
                pet.vel += dir * config.seek_impulse;
            } else {
                log::debug!("pet reached target ({:.1}, {:.1})", target.x, target.y);
                pet.target = None;
            }
        }
        None => {
            pet.vel += Vec2::new(
                noise(rng, config.wander_strength),
                noise(rng, config.wander_strength),
            );
        }
    }
}

/// Elastic wall bounce: clamp into `[0, extent - size]` and flip the velocity
/// component of any axis that was out of bounds.
pub fn bounce(pet: &mut Pet, viewport: Vec2, size: f32) {
    let max = viewport - Vec2::splat(size);
    if pet.pos.x < 0.0 {
        pet.pos.x = 0.0;
        pet.vel.x = -pet.vel.x;
    }
    if pet.pos.y < 0.0 {
        pet.pos.y = 0.0;
        pet.vel.y = -pet.vel.y;
    }
    if pet.pos.x > max.x {
        pet.pos.x = max.x;
        pet.vel.x = -pet.vel.x;
    }
    if pet.pos.y > max.y {
        pet.pos.y = max.y;
        pet.vel.y = -pet.vel.y;
    }
}
