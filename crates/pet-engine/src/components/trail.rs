use glam::Vec2;

use crate::api::host::{Host, VisualHandle, VisualKind};
use crate::api::types::FoodColor;

/// A decaying marker left behind each time the pet eats.
#[derive(Debug)]
pub struct TrailParticle {
    pub color: FoodColor,
    /// Host clock at creation, in milliseconds.
    pub created_ms: f64,
    /// Pet position when the marker was created.
    pub origin: Vec2,
    handle: VisualHandle,
}

impl TrailParticle {
    pub fn spawn<H: Host + ?Sized>(host: &mut H, color: FoodColor, origin: Vec2, now_ms: f64) -> Self {
        let handle = host.create_visual(VisualKind::Trail, Some(color), origin);
        Self {
            color,
            created_ms: now_ms,
            origin,
            handle,
        }
    }

    pub fn handle(&self) -> &VisualHandle {
        &self.handle
    }

    /// Milliseconds since creation.
    pub fn age(&self, now_ms: f64) -> f64 {
        now_ms - self.created_ms
    }

    pub fn release<H: Host + ?Sized>(self, host: &mut H) {
        host.destroy_visual(self.handle);
    }
}
