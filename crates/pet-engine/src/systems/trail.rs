//! Trail markers: one per meal, orbiting the pet while they fade and shrink.

use glam::Vec2;
use rand::Rng;

use crate::api::config::PetConfig;
use crate::api::host::{Host, VisualUpdate};
use crate::api::types::{FoodColor, SimEvent};
use crate::components::trail::TrailParticle;
use crate::core::math::{lerp, noise};
use crate::core::store::ParticleStore;

/// Owns every live trail marker.
#[derive(Debug, Default)]
pub struct TrailManager {
    trails: ParticleStore<TrailParticle>,
}

impl TrailManager {
    pub fn new() -> Self {
        Self {
            trails: ParticleStore::new(),
        }
    }

    /// Record a meal: snapshot the pet position and allocate a marker visual.
    pub fn spawn<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        color: FoodColor,
        pet_pos: Vec2,
        now_ms: f64,
        config: &PetConfig,
    ) {
        let trail = TrailParticle::spawn(host, color, pet_pos, now_ms);
        host.update_visual(
            trail.handle(),
            VisualUpdate::default()
                .with_opacity(config.trail_opacity)
                .with_size(config.trail_initial_size),
        );
        self.trails.push(trail);
    }

    /// Age every marker. Expired markers are released and removed; the rest are
    /// drawn around the pet's current position with fresh jitter.
    pub fn tick<H: Host + ?Sized, R: Rng + ?Sized>(
        &mut self,
        host: &mut H,
        pet_pos: Vec2,
        now_ms: f64,
        config: &PetConfig,
        rng: &mut R,
        events: &mut Vec<SimEvent>,
    ) {
        for i in (0..self.trails.len()).rev() {
            let Some(trail) = self.trails.get(i) else {
                continue;
            };
            let age = trail.age(now_ms);
            if age > config.trail_duration_ms {
                if let Some(trail) = self.trails.remove(i) {
                    events.push(SimEvent::TrailFaded { color: trail.color });
                    trail.release(host);
                }
                continue;
            }

            let t = (age / config.trail_duration_ms) as f32;
            let jitter_width = config.trail_jitter * 2.0;
            let pos = pet_pos + Vec2::new(noise(rng, jitter_width), noise(rng, jitter_width));
            host.update_visual(
                trail.handle(),
                VisualUpdate::at(pos)
                    .with_opacity(config.trail_opacity * (1.0 - t))
                    .with_size(lerp(config.trail_size.0, config.trail_size.1, t)),
            );
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailParticle> {
        self.trails.iter()
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    /// Release every marker at once.
    pub fn clear<H: Host + ?Sized>(&mut self, host: &mut H) {
        for trail in self.trails.drain() {
            trail.release(host);
        }
    }
}
