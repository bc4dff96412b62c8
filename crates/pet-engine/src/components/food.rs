use glam::Vec2;

use crate::api::host::{Host, VisualHandle, VisualKind};
use crate::api::types::FoodColor;

/// A physics-simulated food particle.
/// Owns its visual handle; the two are created and released together.
#[derive(Debug)]
pub struct FoodParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: FoodColor,
    /// Remaining life in ticks.
    pub life: f32,
    handle: VisualHandle,
}

impl FoodParticle {
    /// Allocate the particle's visual and build the particle around it.
    pub fn spawn<H: Host + ?Sized>(host: &mut H, pos: Vec2, vel: Vec2, color: FoodColor, life: f32) -> Self {
        let handle = host.create_visual(VisualKind::Food, Some(color), pos);
        Self::with_handle(handle, pos, vel, color, life)
    }

    /// Build a particle around an already allocated handle.
    pub fn with_handle(handle: VisualHandle, pos: Vec2, vel: Vec2, color: FoodColor, life: f32) -> Self {
        Self {
            pos,
            vel,
            color,
            life,
            handle,
        }
    }

    pub fn handle(&self) -> &VisualHandle {
        &self.handle
    }

    /// Opacity derived from remaining life: fades over the last `fade_life` ticks.
    pub fn opacity(&self, fade_life: f32) -> f32 {
        (self.life / fade_life).max(0.0)
    }

    /// Destroy the particle, handing its visual back to the host.
    pub fn release<H: Host + ?Sized>(self, host: &mut H) {
        host.destroy_visual(self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::host::recording::RecordingHost;

    #[test]
    fn spawn_allocates_exactly_one_visual() {
        let mut host = RecordingHost::new(800.0, 600.0);
        let food = FoodParticle::spawn(&mut host, Vec2::new(5.0, 5.0), Vec2::ZERO, FoodColor::Homing, 500.0);
        assert_eq!(host.live_of_kind(VisualKind::Food), 1);
        assert_eq!(host.visual(food.handle()).unwrap().color, Some(FoodColor::Homing));
    }

    #[test]
    fn release_returns_visual_once() {
        let mut host = RecordingHost::new(800.0, 600.0);
        let food = FoodParticle::spawn(&mut host, Vec2::ZERO, Vec2::ZERO, FoodColor::Jitter, 500.0);
        let id = food.handle().id();
        food.release(&mut host);
        assert!(host.live.is_empty());
        assert_eq!(host.released[&id], 1);
    }

    #[test]
    fn opacity_fades_and_never_goes_negative() {
        let mut food = FoodParticle::with_handle(VisualHandle::new(1), Vec2::ZERO, Vec2::ZERO, FoodColor::Floater, 500.0);
        assert_eq!(food.opacity(1000.0), 0.5);
        food.life = -3.0;
        assert_eq!(food.opacity(1000.0), 0.0);
    }
}
