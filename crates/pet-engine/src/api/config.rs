use std::fmt;

use serde::{Deserialize, Serialize};

/// Every tunable of the simulation, provided by the host.
/// Loaded from JSON at runtime; missing fields fall back to [`PetConfig::default`].
///
/// Speeds and impulses are in units per tick, durations of trails in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    // -- Pet --
    /// Pet sprite size; the pet is bounded to `[0, extent - pet_size]`.
    pub pet_size: f32,
    /// Per-axis velocity cap for the pet.
    pub pet_max_speed: f32,
    /// Impulse toward the target while seeking.
    pub seek_impulse: f32,
    /// Distance at which a target counts as reached.
    pub arrive_radius: f32,
    /// Width of the wander noise window (noise is in `[-w/2, w/2]`).
    pub wander_strength: f32,
    /// Width of the initial velocity window per axis.
    pub pet_initial_speed: f32,

    // -- Behaviors --
    pub homing_strength: f32,
    /// Homing only pushes when farther than this from the pet.
    pub homing_min_distance: f32,
    /// Width of the jitter noise window.
    pub jitter_strength: f32,
    /// Upward pull subtracted from a floater's vertical velocity.
    pub floater_lift: f32,
    /// Width of a floater's horizontal drift window.
    pub floater_drift: f32,
    pub flock_strength: f32,
    /// Squared distance under which a same-color neighbour attracts.
    pub flock_radius_sq: f32,

    // -- Physics --
    pub gravity: f32,
    pub food_size: f32,
    /// Restitution on the left, right and top walls.
    pub wall_restitution: f32,
    /// Vertical restitution on the floor.
    pub floor_restitution: f32,
    /// Horizontal damping applied on floor contact.
    pub floor_friction: f32,
    /// Vertical speed below which a floor bounce settles to zero.
    pub floor_snap_vy: f32,
    /// Horizontal speed below which floor sliding stops.
    pub floor_snap_vx: f32,
    /// Centre distance under which two food particles overlap.
    pub collision_distance: f32,
    /// Distance under which the pet eats a food particle.
    pub consume_radius: f32,

    // -- Feeding --
    /// Food particles released per feeder activation.
    pub food_batch: usize,
    /// Min/max spawn distance from the feeder centre.
    pub spawn_distance: (f32, f32),
    /// Width of the initial food velocity window per axis.
    pub spawn_speed: f32,
    /// Min/max initial life in ticks.
    pub food_life: (f32, f32),
    /// Life below which food starts fading out.
    pub fade_life: f32,

    // -- Trails --
    pub trail_duration_ms: f64,
    pub trail_opacity: f32,
    /// Size at birth, before the first aging pass.
    pub trail_initial_size: f32,
    /// Start/end size over the trail's lifetime.
    pub trail_size: (f32, f32),
    /// Per-axis jitter radius around the pet.
    pub trail_jitter: f32,

    // -- Feeders --
    /// Top-left corner of the first feeder.
    pub feeder_origin: (f32, f32),
    pub feeder_spacing: f32,
    pub feeder_size: f32,

    /// Fixed RNG seed. `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            pet_size: 20.0,
            pet_max_speed: 3.0,
            seek_impulse: 0.2,
            arrive_radius: 10.0,
            wander_strength: 0.5,
            pet_initial_speed: 4.0,

            homing_strength: 0.03,
            homing_min_distance: 1.0,
            jitter_strength: 0.2,
            floater_lift: 0.01,
            floater_drift: 0.05,
            flock_strength: 0.001,
            flock_radius_sq: 4000.0,

            gravity: 0.02,
            food_size: 10.0,
            wall_restitution: 0.6,
            floor_restitution: 0.3,
            floor_friction: 0.7,
            floor_snap_vy: 0.2,
            floor_snap_vx: 0.05,
            collision_distance: 10.0,
            consume_radius: 20.0,

            food_batch: 10,
            spawn_distance: (40.0, 70.0),
            spawn_speed: 1.0,
            food_life: (300.0, 1000.0),
            fade_life: 1000.0,

            trail_duration_ms: 2000.0,
            trail_opacity: 0.4,
            trail_initial_size: 10.0,
            trail_size: (8.0, 2.0),
            trail_jitter: 5.0,

            feeder_origin: (20.0, 20.0),
            feeder_spacing: 40.0,
            feeder_size: 24.0,

            seed: None,
        }
    }
}

impl PetConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the simulation's invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("pet_size", self.pet_size),
            ("pet_max_speed", self.pet_max_speed),
            ("arrive_radius", self.arrive_radius),
            ("food_size", self.food_size),
            ("collision_distance", self.collision_distance),
            ("fade_life", self.fade_life),
            ("feeder_size", self.feeder_size),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::invalid(field, "must be positive"));
            }
        }
        if !(self.trail_duration_ms > 0.0) {
            return Err(ConfigError::invalid("trail_duration_ms", "must be positive"));
        }
        if self.food_batch == 0 {
            return Err(ConfigError::invalid("food_batch", "must release at least one particle"));
        }
        if self.spawn_distance.0 > self.spawn_distance.1 {
            return Err(ConfigError::invalid("spawn_distance", "min exceeds max"));
        }
        if self.food_life.0 > self.food_life.1 || self.food_life.0 <= 0.0 {
            return Err(ConfigError::invalid("food_life", "needs 0 < min <= max"));
        }
        Ok(())
    }

    /// Top-left corner of feeder `index`.
    pub fn feeder_corner(&self, index: usize) -> glam::Vec2 {
        glam::Vec2::new(
            self.feeder_origin.0 + index as f32 * self.feeder_spacing,
            self.feeder_origin.1,
        )
    }
}

/// Errors raised while loading a [`PetConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with.
    Invalid { field: &'static str, reason: &'static str },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &'static str) -> Self {
        ConfigError::Invalid { field, reason }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Failed to parse pet config: {}", e),
            ConfigError::Invalid { field, reason } => write!(f, "Invalid pet config field `{}`: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PetConfig::default().validate().is_ok());
    }

    #[test]
    fn parse_partial_config_keeps_defaults() {
        let json = r#"{ "food_batch": 3, "seed": 7, "spawn_distance": [10.0, 20.0] }"#;
        let config = PetConfig::from_json(json).unwrap();
        assert_eq!(config.food_batch, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.spawn_distance, (10.0, 20.0));
        assert_eq!(config.pet_size, 20.0);
        assert_eq!(config.trail_duration_ms, 2000.0);
    }

    #[test]
    fn parse_empty_object_is_default() {
        let config = PetConfig::from_json("{}").unwrap();
        assert_eq!(config, PetConfig::default());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = PetConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_batch_is_rejected() {
        let err = PetConfig::from_json(r#"{ "food_batch": 0 }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "food_batch"),
            other => panic!("Expected Invalid, got {other}"),
        }
    }

    #[test]
    fn inverted_life_range_is_rejected() {
        let err = PetConfig::from_json(r#"{ "food_life": [500.0, 100.0] }"#).unwrap_err();
        assert!(err.to_string().contains("food_life"));
    }

    #[test]
    fn feeder_corners_step_right() {
        let config = PetConfig::default();
        assert_eq!(config.feeder_corner(0), glam::Vec2::new(20.0, 20.0));
        assert_eq!(config.feeder_corner(3), glam::Vec2::new(140.0, 20.0));
    }
}
