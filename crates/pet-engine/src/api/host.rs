//! Host contract: the drawing surface the simulation pushes state into.
//!
//! The engine never renders. It asks the host for a visual when a particle is
//! born, updates it every tick, and hands it back when the particle dies.

use glam::Vec2;

use crate::api::types::FoodColor;

/// What a visual represents. Hosts use it for size, color and stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    Pet,
    Food,
    Trail,
    Feeder,
}

/// Opaque reference to a drawable owned by the host.
///
/// Not `Clone`/`Copy`: the simulation holds exactly one per particle and
/// releasing it via [`Host::destroy_visual`] moves it, so a handle cannot be
/// released twice.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct VisualHandle(u32);

impl VisualHandle {
    /// Wrap a host-side identifier. Only hosts should mint handles.
    pub fn new(id: u32) -> Self {
        VisualHandle(id)
    }

    /// The host-side identifier.
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Partial update of a visual. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisualUpdate {
    pub position: Option<Vec2>,
    pub opacity: Option<f32>,
    pub size: Option<f32>,
}

impl VisualUpdate {
    pub fn at(position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }
}

/// The host environment's drawing surface.
pub trait Host {
    /// Allocate a drawable at `position`. `color` is `None` for the pet.
    fn create_visual(&mut self, kind: VisualKind, color: Option<FoodColor>, position: Vec2) -> VisualHandle;

    /// Mutate visible properties of a live visual.
    fn update_visual(&mut self, handle: &VisualHandle, update: VisualUpdate);

    /// Remove the visual permanently.
    fn destroy_visual(&mut self, handle: VisualHandle);

    /// Current drawable area (width, height). May change between frames.
    fn viewport(&self) -> Vec2;
}
