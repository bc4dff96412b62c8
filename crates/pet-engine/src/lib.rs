pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{PetConfig, ConfigError};
pub use api::host::{Host, VisualHandle, VisualKind, VisualUpdate};
pub use api::sim::Simulation;
pub use api::types::{FoodColor, SimEvent};
pub use components::feeder::Feeder;
pub use components::food::FoodParticle;
pub use components::pet::{Pet, PetMode};
pub use components::trail::TrailParticle;
pub use core::store::ParticleStore;
pub use input::queue::{InputEvent, InputQueue};
pub use systems::trail::TrailManager;
