use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::api::config::PetConfig;
use crate::api::host::Host;
use crate::api::types::FoodColor;
use crate::components::food::FoodParticle;
use crate::core::math::{noise, uniform};
use crate::core::store::ParticleStore;

/// Sprinkle a batch of `config.food_batch` particles of one color in a ring
/// around `center`. Returns the number spawned.
pub fn spawn_batch<H: Host + ?Sized, R: Rng + ?Sized>(
    foods: &mut ParticleStore<FoodParticle>,
    host: &mut H,
    center: Vec2,
    color: FoodColor,
    config: &PetConfig,
    rng: &mut R,
) -> usize {
    for _ in 0..config.food_batch {
        let angle = rng.gen::<f32>() * TAU;
        let dist = uniform(rng, config.spawn_distance.0, config.spawn_distance.1);
        let pos = center + Vec2::new(angle.cos(), angle.sin()) * dist;
        let vel = Vec2::new(noise(rng, config.spawn_speed), noise(rng, config.spawn_speed));
        let life = uniform(rng, config.food_life.0, config.food_life.1);
        foods.push(FoodParticle::spawn(host, pos, vel, color, life));
    }
    config.food_batch
}
