use glam::Vec2;

use crate::api::host::{Host, VisualHandle, VisualKind};
use crate::api::types::FoodColor;

/// A fixed control that releases food of one color when activated.
#[derive(Debug)]
pub struct Feeder {
    pub color: FoodColor,
    /// Top-left corner.
    pub corner: Vec2,
    pub size: f32,
    handle: VisualHandle,
}

impl Feeder {
    pub fn spawn<H: Host + ?Sized>(host: &mut H, color: FoodColor, corner: Vec2, size: f32) -> Self {
        let handle = host.create_visual(VisualKind::Feeder, Some(color), corner);
        Self {
            color,
            corner,
            size,
            handle,
        }
    }

    pub fn handle(&self) -> &VisualHandle {
        &self.handle
    }

    /// Spawn origin for food batches.
    pub fn center(&self) -> Vec2 {
        self.corner + Vec2::splat(self.size / 2.0)
    }

    /// Whether a pointer at `point` lands on this feeder.
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.corner + Vec2::splat(self.size);
        point.x >= self.corner.x && point.x <= max.x && point.y >= self.corner.y && point.y <= max.y
    }

    pub fn release<H: Host + ?Sized>(self, host: &mut H) {
        host.destroy_visual(self.handle);
    }
}
